//! Bookstore catalog library
//!
//! Declares the catalog `Item` schema, enforces its field constraints and
//! provides create/read/update/delete over SeaORM or an in-memory store.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod logging;
pub mod migrator;
pub mod repositories;
pub mod services;
pub mod validation;

pub use entities::item::Model as Item;
pub use errors::ServiceError;
pub use services::items::{CreateItemInput, ItemListQuery, ItemListResult, ItemService, UpdateItemInput};
