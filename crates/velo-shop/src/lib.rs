//! # velo-shop: Service Layer for Velo
//!
//! The operations a storefront or admin transport calls, composed from
//! `velo-core` (pure rule and price evaluation) and `velo-store` (catalog
//! and cart storage).
//!
//! ## Services
//! ```text
//! ConfiguratorService  validate selections, configurator payloads
//! PricingService       option/product pricing, price-rule creation
//! CartService          cart mutations + snapshot repricing
//! InventoryService     stock lookups and level maintenance
//! ```
//!
//! Services are cheap to clone: each holds `Arc`s to the shared stores, so
//! a transport layer can hand one clone to every request handler.
//!
//! No transport lives here. [`ShopError::kind`] exists so an HTTP layer can
//! map errors onto status codes without matching every variant.

pub mod cart;
pub mod configurator;
pub mod error;
pub mod inventory;
pub mod pricing;

pub use cart::CartService;
pub use configurator::{ConfiguratorService, ProductConfiguration};
pub use error::{ErrorKind, ShopError, ShopResult};
pub use inventory::{InventoryService, OptionStockStatus};
pub use pricing::{PricingService, ProductPriceBreakdown};
