use crate::{entities::item, errors::ServiceError};
use async_trait::async_trait;
use uuid::Uuid;

pub mod item_repository;
pub mod memory;

pub use item_repository::SeaOrmItemRepository;
pub use memory::InMemoryItemRepository;

/// Storage for catalog items.
///
/// Implementations persist whatever they are given; callers validate first.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Stores a new item. Fails with `Conflict` if the id is already taken.
    async fn insert(&self, item: item::Model) -> Result<item::Model, ServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<item::Model>, ServiceError>;

    /// Returns a page of items ordered by id.
    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<item::Model>, ServiceError>;

    async fn count(&self) -> Result<u64, ServiceError>;

    /// Overwrites every field of the stored item with the same id.
    /// Fails with `NotFound` if there is no such item.
    async fn update(&self, item: item::Model) -> Result<item::Model, ServiceError>;

    /// Removes the item, returning whether anything was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}
