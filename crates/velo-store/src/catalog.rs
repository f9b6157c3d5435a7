//! # Catalog Store
//!
//! Read-mostly reference data: products, option groups, options,
//! compatibility rules, price rules, and inventory levels.
//!
//! ## Query Contract
//! The rule engine never navigates object graphs; it asks this store for
//! batches and builds id-indexed lookups from the results:
//! - `options_by_ids` drops unknown ids silently and filters inactive
//!   options unless explicitly asked otherwise
//! - `rules_touching` returns active compatibility rules with either side
//!   in the id set
//! - `price_rules_touching` returns active price rules with BOTH sides in
//!   the id set
//!
//! Rules are returned in creation order, which keeps the resolver's
//! first-match tie-break stable across calls.

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

use serde::Serialize;
use tracing::debug;

use velo_core::{InventoryLevel, OptionGroup, OptionPriceRule, OptionRule, Product, ProductOption};

use crate::error::{StoreError, StoreResult};

/// One option group with its active options, as a storefront configurator
/// wants to render it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupWithOptions {
    pub group: OptionGroup,
    pub options: Vec<ProductOption>,
}

#[derive(Debug, Default)]
struct CatalogInner {
    products: HashMap<String, Product>,
    groups: HashMap<String, OptionGroup>,
    options: HashMap<String, ProductOption>,
    // Vec keeps creation order; rule sets are small and scans are bounded
    // by the rules touching one product's options.
    rules: Vec<OptionRule>,
    price_rules: Vec<OptionPriceRule>,
    inventory: HashMap<String, InventoryLevel>,
}

/// In-memory catalog store. All reads return owned clones; concurrent reads
/// only contend on the map lock for the duration of the copy.
#[derive(Debug, Default)]
pub struct CatalogStore {
    inner: Mutex<CatalogInner>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Admin inserts (catalog administration writes through these)
    // =========================================================================

    pub fn insert_product(&self, product: Product) -> StoreResult<()> {
        let mut inner = self.lock();
        if inner.products.contains_key(&product.id) {
            return Err(StoreError::duplicate("Product", &product.id));
        }
        debug!(id = %product.id, name = %product.name, "Inserting product");
        inner.products.insert(product.id.clone(), product);
        Ok(())
    }

    pub fn insert_group(&self, group: OptionGroup) -> StoreResult<()> {
        let mut inner = self.lock();
        if inner.groups.contains_key(&group.id) {
            return Err(StoreError::duplicate("OptionGroup", &group.id));
        }
        if !inner.products.contains_key(&group.product_id) {
            return Err(StoreError::missing_parent(
                "OptionGroup",
                "Product",
                &group.product_id,
            ));
        }
        inner.groups.insert(group.id.clone(), group);
        Ok(())
    }

    pub fn insert_option(&self, option: ProductOption) -> StoreResult<()> {
        let mut inner = self.lock();
        if inner.options.contains_key(&option.id) {
            return Err(StoreError::duplicate("ProductOption", &option.id));
        }
        if !inner.groups.contains_key(&option.option_group_id) {
            return Err(StoreError::missing_parent(
                "ProductOption",
                "OptionGroup",
                &option.option_group_id,
            ));
        }
        debug!(id = %option.id, name = %option.name, "Inserting product option");
        inner.options.insert(option.id.clone(), option);
        Ok(())
    }

    /// Compatibility rules may reference options that no longer exist or are
    /// inactive (historical rules), so no parent check here.
    pub fn insert_rule(&self, rule: OptionRule) -> StoreResult<()> {
        let mut inner = self.lock();
        if inner.rules.iter().any(|r| r.id == rule.id) {
            return Err(StoreError::duplicate("OptionRule", &rule.id));
        }
        inner.rules.push(rule);
        Ok(())
    }

    /// Pair-level uniqueness for price rules is a business rule enforced by
    /// the pricing service; the store only guards id uniqueness.
    pub fn insert_price_rule(&self, rule: OptionPriceRule) -> StoreResult<()> {
        let mut inner = self.lock();
        if inner.price_rules.iter().any(|r| r.id == rule.id) {
            return Err(StoreError::duplicate("OptionPriceRule", &rule.id));
        }
        debug!(
            id = %rule.id,
            target = %rule.target_option_id,
            dependent = %rule.dependent_option_id,
            "Inserting price rule"
        );
        inner.price_rules.push(rule);
        Ok(())
    }

    pub fn upsert_inventory(&self, level: InventoryLevel) {
        let mut inner = self.lock();
        debug!(
            option_id = %level.product_option_id,
            quantity = level.quantity,
            out_of_stock = level.out_of_stock,
            "Upserting inventory level"
        );
        inner
            .inventory
            .insert(level.product_option_id.clone(), level);
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// An active product by id, or None (missing and soft-deleted products
    /// look the same to callers).
    pub fn product(&self, product_id: &str) -> Option<Product> {
        self.lock()
            .products
            .get(product_id)
            .filter(|p| p.is_active)
            .cloned()
    }

    /// Options for an id set. Unknown ids are dropped silently; duplicate
    /// ids in the input yield one row.
    pub fn options_by_ids(&self, option_ids: &[String], include_inactive: bool) -> Vec<ProductOption> {
        let wanted: BTreeSet<&str> = option_ids.iter().map(String::as_str).collect();
        let inner = self.lock();

        let options: Vec<ProductOption> = wanted
            .iter()
            .filter_map(|id| inner.options.get(*id))
            .filter(|o| include_inactive || o.is_active)
            .cloned()
            .collect();

        debug!(requested = wanted.len(), found = options.len(), "Loaded options by ids");
        options
    }

    /// A product's groups with their active options, both sorted by name for
    /// stable output.
    pub fn option_groups_for_product(&self, product_id: &str) -> Vec<GroupWithOptions> {
        let inner = self.lock();

        let mut groups: Vec<OptionGroup> = inner
            .groups
            .values()
            .filter(|g| g.product_id == product_id)
            .cloned()
            .collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name));

        groups
            .into_iter()
            .map(|group| {
                let mut options: Vec<ProductOption> = inner
                    .options
                    .values()
                    .filter(|o| o.option_group_id == group.id && o.is_active)
                    .cloned()
                    .collect();
                options.sort_by(|a, b| a.name.cmp(&b.name));
                GroupWithOptions { group, options }
            })
            .collect()
    }

    /// Ids of every active option attached to a product, across all groups.
    pub fn option_ids_for_product(&self, product_id: &str) -> Vec<String> {
        self.option_groups_for_product(product_id)
            .into_iter()
            .flat_map(|g| g.options)
            .map(|o| o.id)
            .collect()
    }

    /// Active compatibility rules with either side in the id set, in
    /// creation order.
    pub fn rules_touching(&self, option_ids: &[String]) -> Vec<OptionRule> {
        let wanted: BTreeSet<&str> = option_ids.iter().map(String::as_str).collect();
        let rules: Vec<OptionRule> = self
            .lock()
            .rules
            .iter()
            .filter(|r| {
                r.is_active
                    && (wanted.contains(r.if_option_id.as_str())
                        || wanted.contains(r.then_option_id.as_str()))
            })
            .cloned()
            .collect();

        debug!(count = rules.len(), "Loaded compatibility rules touching selection");
        rules
    }

    /// Active price rules whose target AND dependent are both in the id set,
    /// in creation order.
    pub fn price_rules_touching(&self, option_ids: &[String]) -> Vec<OptionPriceRule> {
        let wanted: BTreeSet<&str> = option_ids.iter().map(String::as_str).collect();
        let rules: Vec<OptionPriceRule> = self
            .lock()
            .price_rules
            .iter()
            .filter(|r| {
                r.is_active
                    && wanted.contains(r.target_option_id.as_str())
                    && wanted.contains(r.dependent_option_id.as_str())
            })
            .cloned()
            .collect();

        debug!(count = rules.len(), "Loaded price rules applicable to selection");
        rules
    }

    /// The active price rule for an exact (target, dependent) pair, if one
    /// exists. Used to reject duplicates at creation.
    pub fn price_rule_for_pair(
        &self,
        target_option_id: &str,
        dependent_option_id: &str,
    ) -> Option<OptionPriceRule> {
        self.lock()
            .price_rules
            .iter()
            .find(|r| {
                r.is_active
                    && r.target_option_id == target_option_id
                    && r.dependent_option_id == dependent_option_id
            })
            .cloned()
    }

    /// Inventory levels for an id set. Options without a record are absent
    /// from the result; callers decide what absence means.
    pub fn inventory_for(&self, option_ids: &[String]) -> Vec<InventoryLevel> {
        let wanted: BTreeSet<&str> = option_ids.iter().map(String::as_str).collect();
        self.lock()
            .inventory
            .values()
            .filter(|level| wanted.contains(level.product_option_id.as_str()))
            .cloned()
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CatalogInner> {
        self.inner.lock().expect("catalog store mutex poisoned")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use velo_core::{Money, RuleKind};

    fn store_with_product() -> CatalogStore {
        let store = CatalogStore::new();
        store
            .insert_product(Product::new("bike", "Trailblazer", Money::from_cents(80_000)))
            .unwrap();
        store
            .insert_group(OptionGroup {
                id: "g-frame".into(),
                name: "frame_type".into(),
                display_name: "Frame Type".into(),
                product_id: "bike".into(),
            })
            .unwrap();
        store
    }

    fn option(id: &str, group: &str, cents: i64) -> ProductOption {
        ProductOption::new(id, group, id, id, Money::from_cents(cents))
    }

    #[test]
    fn insert_enforces_uniqueness_and_parents() {
        let store = store_with_product();

        let err = store
            .insert_product(Product::new("bike", "Again", Money::zero()))
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));

        let err = store
            .insert_option(option("o1", "no-such-group", 100))
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingParent { .. }));

        store.insert_option(option("o1", "g-frame", 100)).unwrap();
        let err = store.insert_option(option("o1", "g-frame", 100)).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { .. }));
    }

    #[test]
    fn options_by_ids_drops_unknown_and_inactive() {
        let store = store_with_product();
        store.insert_option(option("live", "g-frame", 100)).unwrap();
        let mut dead = option("dead", "g-frame", 200);
        dead.is_active = false;
        store.insert_option(dead).unwrap();

        let found = store.options_by_ids(
            &["live".into(), "dead".into(), "ghost".into(), "live".into()],
            false,
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "live");

        let with_inactive = store.options_by_ids(&["live".into(), "dead".into()], true);
        assert_eq!(with_inactive.len(), 2);
    }

    #[test]
    fn product_read_hides_inactive() {
        let store = CatalogStore::new();
        let mut archived = Product::new("old", "Old Model", Money::zero());
        archived.is_active = false;
        store.insert_product(archived).unwrap();

        assert!(store.product("old").is_none());
        assert!(store.product("ghost").is_none());
    }

    #[test]
    fn rules_touching_matches_either_side() {
        let store = store_with_product();
        store
            .insert_rule(OptionRule::new("r1", RuleKind::Requires, "a", "b"))
            .unwrap();
        store
            .insert_rule(OptionRule::new("r2", RuleKind::Excludes, "c", "d"))
            .unwrap();
        let mut inactive = OptionRule::new("r3", RuleKind::Requires, "a", "d");
        inactive.is_active = false;
        store.insert_rule(inactive).unwrap();

        let touching = store.rules_touching(&["b".into(), "x".into()]);
        assert_eq!(touching.len(), 1);
        assert_eq!(touching[0].id, "r1");

        assert!(store.rules_touching(&["x".into()]).is_empty());
    }

    #[test]
    fn price_rules_touching_requires_both_sides() {
        let store = store_with_product();
        store
            .insert_price_rule(OptionPriceRule::new("pr1", "t", "d", Money::from_cents(5000)))
            .unwrap();

        assert_eq!(store.price_rules_touching(&["t".into(), "d".into()]).len(), 1);
        assert!(store.price_rules_touching(&["t".into()]).is_empty());
        assert!(store.price_rules_touching(&["d".into()]).is_empty());

        assert!(store.price_rule_for_pair("t", "d").is_some());
        assert!(store.price_rule_for_pair("d", "t").is_none());
    }

    #[test]
    fn groups_nest_only_active_options_of_their_product() {
        let store = store_with_product();
        store.insert_option(option("o1", "g-frame", 100)).unwrap();
        let mut dead = option("o2", "g-frame", 200);
        dead.is_active = false;
        store.insert_option(dead).unwrap();

        let groups = store.option_groups_for_product("bike");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group.name, "frame_type");
        assert_eq!(groups[0].options.len(), 1);

        assert!(store.option_groups_for_product("other").is_empty());
        assert_eq!(store.option_ids_for_product("bike"), vec!["o1".to_string()]);
    }

    #[test]
    fn inventory_roundtrip() {
        let store = CatalogStore::new();
        store.upsert_inventory(InventoryLevel {
            product_option_id: "o1".into(),
            quantity: 15,
            out_of_stock: false,
        });
        store.upsert_inventory(InventoryLevel {
            product_option_id: "o1".into(),
            quantity: 0,
            out_of_stock: true,
        });

        let levels = store.inventory_for(&["o1".into(), "o2".into()]);
        assert_eq!(levels.len(), 1);
        assert!(levels[0].out_of_stock);
    }
}
