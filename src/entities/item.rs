use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Maximum ISBN length, in characters.
pub const ISBN_MAX_LENGTH: u32 = 64;
/// Maximum title length, in characters.
pub const TITLE_MAX_LENGTH: u32 = 1024;
/// Maximum author length, in characters.
pub const AUTHOR_MAX_LENGTH: u32 = 1024;
/// Total significant digits allowed in a price.
pub const PRICE_MAX_DIGITS: u32 = 6;
/// Digits allowed after the decimal point in a price.
pub const PRICE_DECIMAL_PLACES: u32 = 2;

/// A single catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "items")]
pub struct Model {
    /// Primary key, never reassigned
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(column_type = "String(StringLen::N(64))")]
    #[validate(length(max = 64, message = "ISBN cannot exceed 64 characters"))]
    pub isbn: String,

    #[sea_orm(column_type = "String(StringLen::N(1024))")]
    #[validate(length(max = 1024, message = "Title cannot exceed 1024 characters"))]
    pub title: String,

    #[sea_orm(column_type = "String(StringLen::N(1024))")]
    #[validate(length(max = 1024, message = "Author cannot exceed 1024 characters"))]
    pub author: String,

    /// decimal(6, 2); see `validation::check_price`
    #[sea_orm(column_type = "Decimal(Some((6, 2)))")]
    pub price: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
