use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Identifier assigned to a listing by its store.
///
/// Opaque text: the in-memory store issues numeric ids, JSON collection
/// servers may issue numbers or short strings. Numeric ids order by value
/// and sort before non-numeric ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PropertyId(String);

impl PropertyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id as a number, when it is one.
    pub fn as_number(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for PropertyId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for PropertyId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Ord for PropertyId {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_value = match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        // "01" and "1" are distinct ids, so fall back to the text.
        by_value.then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for PropertyId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// JSON collection servers hand ids back either as numbers or as strings.
impl<'de> Deserialize<'de> for PropertyId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Ok(Self::from(n)),
            RawId::Text(s) if s.trim().is_empty() => {
                Err(serde::de::Error::custom("property id must not be empty"))
            }
            RawId::Text(s) => Ok(Self(s)),
        }
    }
}

/// A stored real-estate listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub title: String,
    pub location: String,
    pub price: f64,
    pub description: String,
}

impl Property {
    /// Description cut to at most `max_chars` characters, with `…` appended when cut.
    /// The stored description is left untouched.
    pub fn summary(&self, max_chars: usize) -> String {
        match self.description.char_indices().nth(max_chars) {
            Some((end, _)) => format!("{}…", &self.description[..end]),
            None => self.description.clone(),
        }
    }
}

/// Price as supplied by a caller: already numeric, or text from a form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl From<f64> for PriceInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for PriceInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PriceInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Listing input for `create`; the store assigns the id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub price: Option<PriceInput>,
    #[serde(default)]
    pub description: Option<String>,
}

impl PropertyDraft {
    pub fn new(
        title: impl Into<String>,
        location: impl Into<String>,
        price: impl Into<PriceInput>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            location: Some(location.into()),
            price: Some(price.into()),
            description: Some(description.into()),
        }
    }
}

/// Partial change set for `update`; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PropertyPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn price(mut self, price: impl Into<PriceInput>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.location.is_none()
            && self.price.is_none()
            && self.description.is_none()
    }
}
