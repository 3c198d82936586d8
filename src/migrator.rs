use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_create_items_table::Migration)]
    }
}

mod m20240101_000001_create_items_table {

    use crate::entities::item::{
        AUTHOR_MAX_LENGTH, ISBN_MAX_LENGTH, PRICE_DECIMAL_PLACES, PRICE_MAX_DIGITS,
        TITLE_MAX_LENGTH,
    };
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_items_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Column sizes mirror entities::item
            manager
                .create_table(
                    Table::create()
                        .table(Items::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Items::Id).uuid().not_null().primary_key())
                        .col(
                            ColumnDef::new(Items::Isbn)
                                .string_len(ISBN_MAX_LENGTH)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Items::Title)
                                .string_len(TITLE_MAX_LENGTH)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Items::Author)
                                .string_len(AUTHOR_MAX_LENGTH)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Items::Price)
                                .decimal_len(PRICE_MAX_DIGITS, PRICE_DECIMAL_PLACES)
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Items::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Items {
        Table,
        Id,
        Isbn,
        Title,
        Author,
        Price,
    }
}
