#![allow(dead_code)]

use std::sync::Arc;

use bookstore::{config::AppConfig, db, CreateItemInput, ItemService};
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

/// Storage backend a test runs against.
#[derive(Debug, Clone, Copy)]
pub enum Backend {
    Sqlite,
    Memory,
}

/// Helper harness wiring an `ItemService` to a fresh store.
pub struct TestApp {
    pub items: ItemService,
    pub db: Option<Arc<DatabaseConnection>>,
    _dir: Option<TempDir>,
}

impl TestApp {
    pub async fn new(backend: Backend) -> Self {
        match backend {
            Backend::Sqlite => Self::sqlite().await,
            Backend::Memory => Self {
                items: ItemService::in_memory(),
                db: None,
                _dir: None,
            },
        }
    }

    /// SQLite database file in a temporary directory, migrated and empty.
    pub async fn sqlite() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let db_file = dir.path().join("bookstore_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_file.display()),
            "test".to_string(),
        );
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db = Arc::new(pool);
        Self {
            items: ItemService::with_database(db.clone()),
            db: Some(db),
            _dir: Some(dir),
        }
    }
}

pub fn pragmatic_programmer() -> CreateItemInput {
    CreateItemInput {
        id: None,
        isbn: "978-0-13-468599-1".to_string(),
        title: "The Pragmatic Programmer".to_string(),
        author: "Hunt & Thomas".to_string(),
        price: dec!(39.99),
    }
}
