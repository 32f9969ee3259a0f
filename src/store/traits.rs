use crate::error::StoreResult;
use crate::models::{Property, PropertyDraft, PropertyId, PropertyPatch};
use async_trait::async_trait;

/// Common trait for every listing backend.
///
/// The store is the only owner of the collection. Mutations take `&mut self`,
/// so a store has exactly one writer at a time.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// All current listings, in no particular order.
    async fn list(&self) -> StoreResult<Vec<Property>>;

    /// The listing with `id`, or `None` when there is none.
    async fn get_by_id(&self, id: &PropertyId) -> StoreResult<Option<Property>>;

    /// Validate `draft`, assign a fresh id and store it.
    async fn create(&mut self, draft: PropertyDraft) -> StoreResult<Property>;

    /// Merge `patch` into the listing with `id`.
    async fn update(&mut self, id: &PropertyId, patch: PropertyPatch) -> StoreResult<Property>;

    /// Remove the listing with `id`. Returns whether anything was removed;
    /// an unknown id is not an error.
    async fn delete(&mut self, id: &PropertyId) -> StoreResult<bool>;

    /// Name of the backend, for logs
    fn backend_name(&self) -> &'static str;
}
