use crate::error::{StoreError, StoreResult};
use crate::models::{Property, PropertyDraft, PropertyId, PropertyPatch};
use crate::store::traits::PropertyStore;
use crate::store::validation::{apply_patch, validate_draft};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// In-process listing store keyed by id
#[derive(Debug, Default)]
pub struct InMemoryStore {
    properties: HashMap<PropertyId, Property>,
    /// Highest numeric id ever issued or loaded; never decreases, so deleted ids are not reused.
    last_id: i64,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the two starter listings
    pub fn with_seed_data() -> Self {
        Self::from_properties(seed_properties())
    }

    /// Create a store from existing records. Later duplicates of an id replace earlier ones.
    pub fn from_properties(properties: impl IntoIterator<Item = Property>) -> Self {
        let mut store = Self::new();
        for property in properties {
            if let Some(n) = property.id.as_number() {
                store.last_id = store.last_id.max(n);
            }
            store.properties.insert(property.id.clone(), property);
        }
        store
    }

    /// Millisecond wall-clock id, bumped past the last one issued.
    /// The counter only moves once the id is known to be valid.
    fn next_id(&mut self) -> StoreResult<PropertyId> {
        let bumped = self
            .last_id
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted { last: self.last_id })?;
        self.last_id = Utc::now().timestamp_millis().max(bumped);
        Ok(PropertyId::from(self.last_id))
    }
}

#[async_trait]
impl PropertyStore for InMemoryStore {
    async fn list(&self) -> StoreResult<Vec<Property>> {
        debug!("Listing {} properties", self.properties.len());
        Ok(self.properties.values().cloned().collect())
    }

    async fn get_by_id(&self, id: &PropertyId) -> StoreResult<Option<Property>> {
        let found = self.properties.get(id).cloned();
        debug!("Lookup of property {}: found={}", id, found.is_some());
        Ok(found)
    }

    async fn create(&mut self, draft: PropertyDraft) -> StoreResult<Property> {
        let valid = validate_draft(&draft).map_err(|e| {
            warn!("Rejected new property: {}", e);
            e
        })?;

        let id = self.next_id().map_err(|e| {
            warn!("Could not assign an id: {}", e);
            e
        })?;
        let property = valid.into_property(id.clone());
        self.properties.insert(id, property.clone());

        info!("Created property {} ({})", property.id, property.title);
        Ok(property)
    }

    async fn update(&mut self, id: &PropertyId, patch: PropertyPatch) -> StoreResult<Property> {
        let current = self.properties.get(id).ok_or_else(|| {
            warn!("Update of unknown property {}", id);
            StoreError::NotFound(id.clone())
        })?;

        let updated = apply_patch(current, &patch).map_err(|e| {
            warn!("Rejected update of property {}: {}", id, e);
            e
        })?;
        self.properties.insert(id.clone(), updated.clone());

        info!("Updated property {}", id);
        Ok(updated)
    }

    async fn delete(&mut self, id: &PropertyId) -> StoreResult<bool> {
        let removed = self.properties.remove(id).is_some();
        if removed {
            info!("Deleted property {}", id);
        } else {
            debug!("Delete of property {} was a no-op", id);
        }
        Ok(removed)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

/// Starter listings the catalog ships with
pub fn seed_properties() -> Vec<Property> {
    vec![
        Property {
            id: PropertyId::from(1),
            title: "Modern Apartment".to_string(),
            location: "Paris".to_string(),
            price: 350_000.0,
            description: "A stylish apartment in the city center.".to_string(),
        },
        Property {
            id: PropertyId::from(2),
            title: "Family House".to_string(),
            location: "Lyon".to_string(),
            price: 480_000.0,
            description: "A spacious home perfect for families.".to_string(),
        },
    ]
}
