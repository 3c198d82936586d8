use crate::{
    entities::item,
    errors::ServiceError,
    repositories::{InMemoryItemRepository, ItemRepository, SeaOrmItemRepository},
    validation::validate_item,
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

pub const DEFAULT_LIMIT: u64 = 20;
pub const MAX_LIMIT: u64 = 100;

/// Catalog item service: id assignment, validation and CRUD
#[derive(Clone)]
pub struct ItemService {
    repository: Arc<dyn ItemRepository>,
}

impl ItemService {
    pub fn new(repository: Arc<dyn ItemRepository>) -> Self {
        Self { repository }
    }

    /// Service persisting through SeaORM.
    pub fn with_database(db: Arc<DatabaseConnection>) -> Self {
        Self::new(Arc::new(SeaOrmItemRepository::new(db)))
    }

    /// Service over a fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryItemRepository::new()))
    }

    /// Create a new item, generating a random id when none is given
    #[instrument(skip(self))]
    pub async fn create_item(&self, input: CreateItemInput) -> Result<item::Model, ServiceError> {
        let item_id = input.id.unwrap_or_else(Uuid::new_v4);

        let model = validate_item(item::Model {
            id: item_id,
            isbn: input.isbn,
            title: input.title,
            author: input.author,
            price: input.price,
        })
        .map_err(|e| {
            warn!("Rejected new item {}: {}", item_id, e);
            e
        })?;

        let item = self.repository.insert(model).await?;

        info!("Created item: {}", item_id);
        Ok(item)
    }

    /// Get an item by ID
    #[instrument(skip(self))]
    pub async fn get_item(&self, item_id: Uuid) -> Result<item::Model, ServiceError> {
        self.repository
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Item {} not found", item_id)))
    }

    /// List items ordered by id
    #[instrument(skip(self))]
    pub async fn list_items(&self, query: ItemListQuery) -> Result<ItemListResult, ServiceError> {
        let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = query.offset.unwrap_or(0);

        let total = self.repository.count().await?;
        let items = self.repository.list(limit, offset).await?;

        Ok(ItemListResult { items, total })
    }

    /// Overwrite the given fields of an existing item
    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        item_id: Uuid,
        input: UpdateItemInput,
    ) -> Result<item::Model, ServiceError> {
        let mut model = self.get_item(item_id).await?;

        if let Some(isbn) = input.isbn {
            model.isbn = isbn;
        }
        if let Some(title) = input.title {
            model.title = title;
        }
        if let Some(author) = input.author {
            model.author = author;
        }
        if let Some(price) = input.price {
            model.price = price;
        }

        let model = validate_item(model).map_err(|e| {
            warn!("Rejected update of item {}: {}", item_id, e);
            e
        })?;

        let item = self.repository.update(model).await?;
        info!("Updated item: {}", item_id);
        Ok(item)
    }

    /// Delete an item
    #[instrument(skip(self))]
    pub async fn delete_item(&self, item_id: Uuid) -> Result<(), ServiceError> {
        if !self.repository.delete(item_id).await? {
            return Err(ServiceError::NotFound(format!("Item {} not found", item_id)));
        }

        info!("Deleted item {}", item_id);
        Ok(())
    }
}

/// Input for creating an item
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateItemInput {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub price: Decimal,
}

/// Input for updating an item; `None` leaves a field as it is
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateItemInput {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub price: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemListQuery {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct ItemListResult {
    pub items: Vec<item::Model>,
    pub total: u64,
}
