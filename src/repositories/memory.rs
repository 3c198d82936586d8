use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use std::sync::Arc;
use uuid::Uuid;

use super::ItemRepository;
use crate::entities::item::Model as ItemModel;
use crate::errors::ServiceError;

/// In-memory item repository; contents live as long as the value does.
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemRepository {
    items: Arc<DashMap<Uuid, ItemModel>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn insert(&self, item: ItemModel) -> Result<ItemModel, ServiceError> {
        match self.items.entry(item.id) {
            Entry::Occupied(_) => Err(ServiceError::Conflict(format!(
                "Item {} already exists",
                item.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(item.clone());
                Ok(item)
            }
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ItemModel>, ServiceError> {
        Ok(self.items.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<ItemModel>, ServiceError> {
        let mut items: Vec<ItemModel> = self.items.iter().map(|e| e.value().clone()).collect();
        items.sort_by_key(|item| item.id);

        Ok(items
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(self.items.len() as u64)
    }

    async fn update(&self, item: ItemModel) -> Result<ItemModel, ServiceError> {
        match self.items.get_mut(&item.id) {
            Some(mut stored) => {
                *stored = item.clone();
                Ok(item)
            }
            None => Err(ServiceError::NotFound(format!("Item {} not found", item.id))),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(self.items.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample(id: Uuid) -> ItemModel {
        ItemModel {
            id,
            isbn: "978-1-59327-828-1".to_string(),
            title: "The Rust Programming Language".to_string(),
            author: "Klabnik & Nichols".to_string(),
            price: dec!(39.95),
        }
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_ids() {
        let repo = InMemoryItemRepository::new();
        let id = Uuid::new_v4();

        repo.insert(sample(id)).await.unwrap();
        let err = repo.insert(sample(id)).await.unwrap_err();

        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn update_of_missing_item_is_not_found() {
        let repo = InMemoryItemRepository::new();
        let err = repo.update(sample(Uuid::new_v4())).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_is_sorted_by_id_and_paged() {
        let repo = InMemoryItemRepository::new();
        let mut ids: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();
        for id in &ids {
            repo.insert(sample(*id)).await.unwrap();
        }
        ids.sort();

        let page: Vec<Uuid> = repo.list(2, 1).await.unwrap().iter().map(|i| i.id).collect();
        assert_eq!(page, ids[1..3].to_vec());

        let tail = repo.list(10, 4).await.unwrap();
        assert_eq!(tail.len(), 1);
        assert!(repo.list(10, 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clones_share_storage() {
        let repo = InMemoryItemRepository::new();
        let other = repo.clone();
        let id = Uuid::new_v4();

        repo.insert(sample(id)).await.unwrap();
        assert!(other.find_by_id(id).await.unwrap().is_some());
        assert!(other.delete(id).await.unwrap());
        assert!(repo.find_by_id(id).await.unwrap().is_none());
    }
}
