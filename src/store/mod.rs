mod eval;
mod filter;
mod memory;

pub use filter::{Filter, FindOptions, Order, SortSpec};
pub use memory::MemoryStore;

use async_trait::async_trait;
use bson::Document;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("malformed document: {0}")]
    Malformed(#[from] bson::de::Error),
}

/// Document store holding astrologer profiles. The store assigns `id` on
/// insert and maintains `createdAt`/`updatedAt` on every write.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find(&self, filter: &Filter, opts: &FindOptions) -> Result<Vec<Document>, StoreError>;

    async fn count(&self, filter: &Filter) -> Result<u64, StoreError>;

    async fn find_one(&self, filter: &Filter) -> Result<Option<Document>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Document>, StoreError>;

    /// Returns the assigned id.
    async fn insert(&self, doc: Document) -> Result<String, StoreError>;

    /// Overwrites the fields in `set` on the matching document. Returns
    /// whether a document matched.
    async fn update_by_id(&self, id: &str, set: Document) -> Result<bool, StoreError>;

    /// Returns whether a document was removed.
    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError>;
}
