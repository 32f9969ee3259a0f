pub mod config;
pub mod error;
pub mod listing;
pub mod models;
pub mod store;

pub use config::{open_store, Backend, CatalogConfig};
pub use error::{Field, StoreError, StoreResult, ValidationError};
pub use models::{PriceInput, Property, PropertyDraft, PropertyId, PropertyPatch};
pub use store::{HttpStore, InMemoryStore, PropertyStore};
