//! # velo-store: Storage Boundary for Velo
//!
//! In-memory catalog and cart stores. The service layer (velo-shop) talks to
//! these and to nothing else for persistence; swapping in a database-backed
//! implementation would not touch velo-core or the services' pricing logic.
//!
//! ## Modules
//! - [`catalog`] - Products, option groups, options, rules, inventory
//! - [`cart`] - One cart per user with serialized mutations
//! - [`seed`] - Demo bicycle catalog for tests and the demo binary
//! - [`error`] - Storage error types

pub mod cart;
pub mod catalog;
pub mod error;
pub mod seed;

pub use cart::CartStore;
pub use catalog::{CatalogStore, GroupWithOptions};
pub use error::{StoreError, StoreResult};
pub use seed::{seed_demo_catalog, SeededCatalog};
