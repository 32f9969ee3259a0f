use crate::models::PropertyId;
use std::fmt;
use thiserror::Error;

/// Result type returned by every store operation.
pub type StoreResult<T> = Result<T, StoreError>;

/// Listing field named by a validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Location,
    Price,
    Description,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Title => "title",
            Field::Location => "location",
            Field::Price => "price",
            Field::Description => "description",
        };
        f.write_str(name)
    }
}

/// Rejected create/update input. The store is never mutated when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(Field),

    #[error("{0} must not be empty")]
    EmptyField(Field),

    #[error("price must be a number, got {0:?}")]
    PriceNotNumeric(String),

    #[error("price must be a finite number greater than 0, got {0}")]
    PriceNotPositive(f64),
}

impl ValidationError {
    /// The field whose constraint was violated.
    pub fn field(&self) -> Field {
        match self {
            ValidationError::MissingField(field) | ValidationError::EmptyField(field) => *field,
            ValidationError::PriceNotNumeric(_) | ValidationError::PriceNotPositive(_) => {
                Field::Price
            }
        }
    }
}

/// Store-level failure.
///
/// `Validation` and `NotFound` describe the caller's request; the remaining
/// variants mean the backing service could not be reached or misbehaved.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("property {0} not found")]
    NotFound(PropertyId),

    #[error("no numeric id left above {last}")]
    IdsExhausted { last: i64 },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }

    /// True for failures of the backing service rather than of the request.
    pub fn is_backend(&self) -> bool {
        matches!(
            self,
            StoreError::Transport { .. }
                | StoreError::UnexpectedStatus { .. }
                | StoreError::Decode { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn validation_errors_name_their_field() {
        assert_eq!(ValidationError::EmptyField(Field::Title).field(), Field::Title);
        assert_eq!(
            ValidationError::PriceNotNumeric("abc".to_string()).field(),
            Field::Price
        );
        assert_eq!(
            ValidationError::MissingField(Field::Location).to_string(),
            "location is required"
        );
    }

    #[test]
    fn store_error_classification() {
        let err = StoreError::from(ValidationError::PriceNotPositive(0.0));
        assert!(err.is_validation());
        assert!(!err.is_backend());

        let err = StoreError::NotFound(PropertyId::from(3));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "property 3 not found");

        let err = StoreError::IdsExhausted { last: i64::MAX };
        assert!(!err.is_backend());
        assert!(!err.is_validation());
    }
}
