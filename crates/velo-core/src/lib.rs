//! # velo-core: Pure Business Logic for Velo
//!
//! This crate is the heart of the Velo configurator. It contains the option
//! compatibility rule engine and the price rule resolver as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │            storefront / admin HTTP layer (not here)          │
//! └──────────────────────────────┬───────────────────────────────┘
//! ┌──────────────────────────────▼───────────────────────────────┐
//! │          velo-shop: Configurator / Pricing / Cart /          │
//! │                     Inventory services                       │
//! └──────────────┬────────────────────────────────┬──────────────┘
//! ┌──────────────▼──────────────┐  ┌──────────────▼──────────────┐
//! │  ★ velo-core (THIS CRATE) ★ │  │  velo-store: catalog + cart │
//! │  types · money · rules ·    │  │  storage boundary           │
//! │  pricing · validation       │  │                             │
//! │  NO I/O · PURE FUNCTIONS    │  │                             │
//! └─────────────────────────────┘  └─────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`types`] - Domain types (Product, ProductOption, Cart, ...)
//! - [`money`] - Money as integer cents, no floating point
//! - [`rules`] - Compatibility rule evaluator (REQUIRES/EXCLUDES/ONLY_ALLOWS)
//! - [`pricing`] - Pair-dependent price rule resolver
//! - [`error`] - Domain error types
//! - [`validation`] - Structural input validation
//!
//! ## Design Principles
//! 1. **Pure functions**: same catalog snapshot in, same answer out
//! 2. **No I/O**: database, network, file system access is forbidden here
//! 3. **Integer money**: every amount is cents in an i64
//! 4. **Explicit errors**: typed enums, never strings or panics

pub mod error;
pub mod money;
pub mod pricing;
pub mod rules;
pub mod types;
pub mod validation;

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::OptionPriceRule;
pub use rules::{OptionRule, RuleKind};
pub use types::*;

/// Maximum quantity of a single line in a cart.
///
/// Guards against fat-finger orders (1000 instead of 10). Could become
/// per-merchant configuration later.
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Maximum number of distinct lines in one cart.
pub const MAX_CART_LINES: usize = 100;

/// Maximum length for catalog names and display names.
pub const MAX_NAME_LENGTH: usize = 200;
