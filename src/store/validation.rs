use crate::error::{Field, ValidationError};
use crate::models::{PriceInput, Property, PropertyDraft, PropertyId, PropertyPatch};

/// Draft fields after validation, with the price coerced to a number
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDraft {
    pub title: String,
    pub location: String,
    pub price: f64,
    pub description: String,
}

impl ValidDraft {
    pub fn into_property(self, id: PropertyId) -> Property {
        Property {
            id,
            title: self.title,
            location: self.location,
            price: self.price,
            description: self.description,
        }
    }
}

/// Check every create constraint and coerce the price.
pub fn validate_draft(draft: &PropertyDraft) -> Result<ValidDraft, ValidationError> {
    let title = required_text(draft.title.as_deref(), Field::Title)?;
    let location = required_text(draft.location.as_deref(), Field::Location)?;
    let price = draft
        .price
        .as_ref()
        .ok_or(ValidationError::MissingField(Field::Price))
        .and_then(coerce_price)?;
    let description = required_text(draft.description.as_deref(), Field::Description)?;

    Ok(ValidDraft {
        title: title.to_string(),
        location: location.to_string(),
        price,
        description: description.to_string(),
    })
}

/// Apply `patch` to a copy of `current`, validating only the fields it changes.
pub fn apply_patch(current: &Property, patch: &PropertyPatch) -> Result<Property, ValidationError> {
    let mut next = current.clone();

    if let Some(title) = &patch.title {
        next.title = non_empty(title, Field::Title)?.to_string();
    }
    if let Some(location) = &patch.location {
        next.location = non_empty(location, Field::Location)?.to_string();
    }
    if let Some(price) = &patch.price {
        next.price = coerce_price(price)?;
    }
    if let Some(description) = &patch.description {
        next.description = non_empty(description, Field::Description)?.to_string();
    }

    Ok(next)
}

/// Coerce a caller-supplied price to a finite number greater than zero.
pub fn coerce_price(input: &PriceInput) -> Result<f64, ValidationError> {
    let value = match input {
        PriceInput::Number(n) => *n,
        PriceInput::Text(text) => {
            let text = non_empty(text, Field::Price)?;
            text.trim()
                .parse::<f64>()
                .map_err(|_| ValidationError::PriceNotNumeric(text.to_string()))?
        }
    };

    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::PriceNotPositive(value))
    }
}

fn required_text(value: Option<&str>, field: Field) -> Result<&str, ValidationError> {
    let value = value.ok_or(ValidationError::MissingField(field))?;
    non_empty(value, field)
}

fn non_empty(value: &str, field: Field) -> Result<&str, ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stored() -> Property {
        Property {
            id: PropertyId::from(1),
            title: "Modern Apartment".to_string(),
            location: "Paris".to_string(),
            price: 350_000.0,
            description: "A stylish apartment in the city center.".to_string(),
        }
    }

    #[test]
    fn text_price_is_coerced() {
        let draft = PropertyDraft::new("Loft", "Lille", "350000", "Bright");
        let valid = validate_draft(&draft).unwrap();
        assert_eq!(valid.price, 350_000.0);

        let draft = PropertyDraft::new("Loft", "Lille", " 99.5 ", "Bright");
        let valid = validate_draft(&draft).unwrap();
        assert_eq!(valid.price, 99.5);
    }

    #[test]
    fn rejects_empty_and_missing_fields() {
        let err = validate_draft(&PropertyDraft::new("", "Lyon", "100", "x")).unwrap_err();
        assert_eq!(err, ValidationError::EmptyField(Field::Title));

        let err = validate_draft(&PropertyDraft::new("T", "   ", "100", "x")).unwrap_err();
        assert_eq!(err, ValidationError::EmptyField(Field::Location));

        let mut draft = PropertyDraft::new("T", "Lyon", "100", "x");
        draft.description = None;
        assert_eq!(
            validate_draft(&draft).unwrap_err(),
            ValidationError::MissingField(Field::Description)
        );

        let err = validate_draft(&PropertyDraft::new("T", "Lyon", "", "x")).unwrap_err();
        assert_eq!(err, ValidationError::EmptyField(Field::Price));
    }

    #[test]
    fn rejects_bad_prices() {
        assert_eq!(
            coerce_price(&"abc".into()).unwrap_err(),
            ValidationError::PriceNotNumeric("abc".to_string())
        );
        assert_eq!(
            coerce_price(&PriceInput::Number(0.0)).unwrap_err(),
            ValidationError::PriceNotPositive(0.0)
        );
        assert!(coerce_price(&"-5".into()).is_err());
        assert!(coerce_price(&"inf".into()).is_err());
        assert!(coerce_price(&"NaN".into()).is_err());
        assert!(coerce_price(&PriceInput::Number(f64::INFINITY)).is_err());
    }

    #[test]
    fn patch_merges_only_given_fields() {
        let patch = PropertyPatch::default().price("400000").title("Penthouse");
        let next = apply_patch(&stored(), &patch).unwrap();

        assert_eq!(next.title, "Penthouse");
        assert_eq!(next.price, 400_000.0);
        assert_eq!(next.location, "Paris");
        assert_eq!(next.id, PropertyId::from(1));
    }

    #[test]
    fn invalid_patch_field_is_rejected() {
        let err = apply_patch(&stored(), &PropertyPatch::default().location("")).unwrap_err();
        assert_eq!(err.field(), Field::Location);
    }
}
