//! # Domain Types
//!
//! Core domain types for the Velo configurator.
//!
//! ## Type Hierarchy
//! ```text
//! Product ──< OptionGroup ──< ProductOption >── InventoryLevel
//!                                  │
//!               referenced by OptionRule / OptionPriceRule (see rules/pricing)
//!
//! Cart ──< CartItem ──< CartLineOption
//! ```
//!
//! ## Ownership Direction
//! Relationships are modeled with the child carrying the id of its parent
//! (`ProductOption.option_group_id`, `OptionGroup.product_id`,
//! `CartItem.product_id`). There are no bidirectional object pointers; any
//! traversal in the other direction goes through an [`OptionSet`] or a store
//! query. Only the child-to-parent id is authoritative.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Catalog Types
// =============================================================================

/// A configurable product (e.g., one bicycle model).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown in the storefront.
    pub name: String,

    /// Longer marketing description.
    pub description: String,

    /// Price of the bare product before any options, in cents.
    pub base_price: Money,

    /// Whether the product is purchasable (soft delete).
    pub is_active: bool,

    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, base_price: Money) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            base_price,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}

/// A named slot on a product grouping mutually-presented options
/// (e.g., "Frame Finish").
///
/// Sibling resolution for ONLY_ALLOWS rules goes through
/// `ProductOption.option_group_id`, never through a nested option list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionGroup {
    pub id: String,

    /// Machine name (e.g., "frame_finish").
    pub name: String,

    /// Human-facing name (e.g., "Frame Finish").
    pub display_name: String,

    /// Product this group belongs to.
    pub product_id: String,
}

/// A purchasable variant within an [`OptionGroup`] (e.g., "Matte" finish).
///
/// Inactive options are excluded from catalog listings and contribute nothing
/// to rule or price resolution against current state; historical rules may
/// still reference them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOption {
    pub id: String,

    /// Machine name (e.g., "full_suspension").
    pub name: String,

    /// Human-facing name (e.g., "Full-suspension").
    pub display_name: String,

    /// Price contributed by this option unless a price rule overrides it.
    pub base_price: Money,

    /// Whether the option is selectable (soft delete).
    pub is_active: bool,

    /// The one group this option belongs to.
    pub option_group_id: String,

    pub created_at: DateTime<Utc>,
}

impl ProductOption {
    pub fn new(
        id: impl Into<String>,
        option_group_id: impl Into<String>,
        name: impl Into<String>,
        display_name: impl Into<String>,
        base_price: Money,
    ) -> Self {
        ProductOption {
            id: id.into(),
            name: name.into(),
            display_name: display_name.into(),
            base_price,
            is_active: true,
            option_group_id: option_group_id.into(),
            created_at: Utc::now(),
        }
    }
}

/// Stock bookkeeping for one option: a quantity plus an explicit
/// out-of-stock flag (an option can be flagged unavailable while units
/// remain on the shelf).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLevel {
    pub product_option_id: String,
    pub quantity: i64,
    pub out_of_stock: bool,
}

// =============================================================================
// Option Set
// =============================================================================

/// The selected options of one configuration, indexed by option id.
///
/// Built once per operation from a batch catalog query; rule evaluation and
/// price resolution do id lookups against it instead of navigating lazy
/// object graphs.
#[derive(Debug, Clone, Default)]
pub struct OptionSet {
    by_id: HashMap<String, ProductOption>,
}

impl OptionSet {
    /// Indexes a batch query result. Later duplicates of an id replace
    /// earlier ones.
    pub fn from_options<I>(options: I) -> Self
    where
        I: IntoIterator<Item = ProductOption>,
    {
        OptionSet {
            by_id: options.into_iter().map(|o| (o.id.clone(), o)).collect(),
        }
    }

    pub fn contains(&self, option_id: &str) -> bool {
        self.by_id.contains_key(option_id)
    }

    pub fn get(&self, option_id: &str) -> Option<&ProductOption> {
        self.by_id.get(option_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductOption> {
        self.by_id.values()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Options in the same group as `option`, excluding the given ids.
    /// Used by ONLY_ALLOWS sibling checks.
    pub fn group_siblings<'a>(
        &'a self,
        option: &'a ProductOption,
        excluded_ids: &'a [&str],
    ) -> impl Iterator<Item = &'a ProductOption> {
        self.by_id.values().filter(move |candidate| {
            candidate.option_group_id == option.option_group_id
                && !excluded_ids.contains(&candidate.id.as_str())
        })
    }
}

// =============================================================================
// Cart Types
// =============================================================================

/// Resolved per-option price snapshot on a cart line, frozen at the last
/// recomputation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineOption {
    pub option_id: String,
    pub price: Money,
}

/// One product configuration and quantity within a cart.
///
/// `unit_price` and `total_price` are snapshots written by the pricing
/// recomputation that follows every cart mutation, not live views.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub product_id: String,
    pub quantity: i64,

    /// Product base price + resolved option prices for this line's options.
    pub unit_price: Money,

    /// `unit_price` x `quantity`.
    pub total_price: Money,

    pub options: Vec<CartLineOption>,
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a line with provisional zero prices; the caller recomputes
    /// real prices immediately after attaching it to the cart.
    pub fn new(id: impl Into<String>, product_id: impl Into<String>, quantity: i64) -> Self {
        CartItem {
            id: id.into(),
            product_id: product_id.into(),
            quantity,
            unit_price: Money::zero(),
            total_price: Money::zero(),
            options: Vec::new(),
            added_at: Utc::now(),
        }
    }

    /// Whether this line carries exactly the given option ids (as a set).
    pub fn has_option_set(&self, option_ids: &[String]) -> bool {
        let mine: BTreeSet<&str> = self.options.iter().map(|o| o.option_id.as_str()).collect();
        let theirs: BTreeSet<&str> = option_ids.iter().map(String::as_str).collect();
        mine == theirs
    }
}

/// A user's cart: the only persisted consumer of computed prices.
///
/// `total` is a snapshot: recomputed and stored whenever lines change,
/// never derived on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: String,
    pub user_id: String,
    pub total: Money,
    pub items: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates an empty cart for a user (total 0, no lines).
    pub fn new(id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Cart {
            id: id.into(),
            user_id: user_id.into(),
            total: Money::zero(),
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Finds the line for an exact (product, option-set) pair, if any.
    /// Adding the same configuration twice merges into this line.
    pub fn line_matching(
        &mut self,
        product_id: &str,
        option_ids: &[String],
    ) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|item| item.product_id == product_id && item.has_option_set(option_ids))
    }

    pub fn item_mut(&mut self, cart_item_id: &str) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.id == cart_item_id)
    }

    /// Removes a line by id. Returns false if no such line exists.
    pub fn remove_line(&mut self, cart_item_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != cart_item_id);
        self.items.len() != before
    }

    /// Rebuilds the stored total from the stored line totals.
    pub fn recompute_total(&mut self) {
        self.total = self.items.iter().map(|item| item.total_price).sum();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
