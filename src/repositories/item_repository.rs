use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryOrder, QuerySelect, Set, SqlErr,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::ItemRepository;
use crate::entities::item::{self, Column, Entity as Item, Model as ItemModel, PRICE_DECIMAL_PLACES};
use crate::errors::ServiceError;

/// Item repository backed by a SeaORM connection
#[derive(Debug, Clone)]
pub struct SeaOrmItemRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmItemRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// SQLite hands decimals back through `f64`, which drops the column scale.
fn with_column_scale(mut model: ItemModel) -> ItemModel {
    model.price.rescale(PRICE_DECIMAL_PLACES);
    model
}

fn conflict(id: Uuid) -> ServiceError {
    ServiceError::Conflict(format!("Item {} already exists", id))
}

#[async_trait]
impl ItemRepository for SeaOrmItemRepository {
    async fn insert(&self, item: ItemModel) -> Result<ItemModel, ServiceError> {
        // Duplicate ids are a Conflict, never a raw database error.
        let id = item.id;
        if Item::find_by_id(id).one(&*self.db).await?.is_some() {
            return Err(conflict(id));
        }

        let active = item::ActiveModel {
            id: Set(item.id),
            isbn: Set(item.isbn),
            title: Set(item.title),
            author: Set(item.author),
            price: Set(item.price),
        };

        // A concurrent insert of the same id can still win between the check
        // and the write.
        let inserted = active.insert(&*self.db).await.map_err(|e| {
            match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => conflict(id),
                _ => ServiceError::DatabaseError(e),
            }
        })?;
        debug!("Inserted item row {}", inserted.id);
        Ok(with_column_scale(inserted))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ItemModel>, ServiceError> {
        let found = Item::find_by_id(id).one(&*self.db).await?;
        Ok(found.map(with_column_scale))
    }

    async fn list(&self, limit: u64, offset: u64) -> Result<Vec<ItemModel>, ServiceError> {
        let rows = Item::find()
            .order_by_asc(Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&*self.db)
            .await?;
        Ok(rows.into_iter().map(with_column_scale).collect())
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Item::find()
            .count(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)
    }

    async fn update(&self, item: ItemModel) -> Result<ItemModel, ServiceError> {
        let id = item.id;
        let active = item::ActiveModel {
            id: ActiveValue::Unchanged(id),
            isbn: Set(item.isbn),
            title: Set(item.title),
            author: Set(item.author),
            price: Set(item.price),
        };

        match active.update(&*self.db).await {
            Ok(updated) => Ok(with_column_scale(updated)),
            Err(DbErr::RecordNotUpdated) | Err(DbErr::RecordNotFound(_)) => {
                Err(ServiceError::NotFound(format!("Item {} not found", id)))
            }
            Err(e) => Err(ServiceError::DatabaseError(e)),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        let result = Item::delete_by_id(id).exec(&*self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
