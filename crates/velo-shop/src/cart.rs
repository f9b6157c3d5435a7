//! # Cart Service
//!
//! Cart mutations and the snapshot repricing that follows every one of them.
//!
//! ## Mutation Protocol
//! ```text
//! add / update / remove
//!   1. validate the request (quantity bounds, selection completeness,
//!      compatibility rules)
//!   2. under the cart store lock:
//!        a. apply the mutation to a draft copy of the cart
//!        b. reprice the whole draft: every line's unit/total, cart total
//!        c. on success, write the draft back; on failure, write nothing
//! ```
//! Step 2 runs inside [`CartStore::upsert_mut`] / [`CartStore::try_mut`], so
//! mutations for one user are serialized by the store lock and none is lost
//! to a race. The draft copy keeps failures atomic: a persisted total never
//! disagrees with its persisted lines.
//!
//! Adding the same (product, option-set) configuration twice merges into the
//! existing line by summing quantities. Updating a quantity to zero or below
//! removes the line.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use velo_core::pricing::resolve_option_price;
use velo_core::validation::validate_quantity;
use velo_core::{Cart, CartItem, CartLineOption, Money, OptionSet, MAX_CART_LINES};
use velo_store::{CartStore, CatalogStore};

use crate::configurator::ConfiguratorService;
use crate::error::{ShopError, ShopResult};

/// Orchestrates cart mutations against the catalog and cart stores.
#[derive(Debug, Clone)]
pub struct CartService {
    catalog: Arc<CatalogStore>,
    carts: Arc<CartStore>,
    configurator: ConfiguratorService,
}

impl CartService {
    pub fn new(catalog: Arc<CatalogStore>, carts: Arc<CartStore>) -> Self {
        let configurator = ConfiguratorService::new(Arc::clone(&catalog));
        CartService {
            catalog,
            carts,
            configurator,
        }
    }

    /// The user's cart, created empty on first access.
    pub fn get_cart(&self, user_id: &str) -> Cart {
        self.carts.get_or_create(user_id)
    }

    /// Adds a configured product to the user's cart. An existing line with
    /// the same product and exact option set is merged by summing quantities.
    pub fn add_item(
        &self,
        user_id: &str,
        product_id: &str,
        option_ids: &[String],
        quantity: i64,
    ) -> ShopResult<Cart> {
        if option_ids.is_empty() {
            return Err(ShopError::NoOptionsSelected);
        }
        validate_quantity(quantity)?;

        if self.catalog.product(product_id).is_none() {
            return Err(ShopError::ProductUnavailable(product_id.to_string()));
        }

        // Every requested option must resolve to an active catalog row.
        let options = self.catalog.options_by_ids(option_ids, false);
        let requested: std::collections::BTreeSet<&str> =
            option_ids.iter().map(String::as_str).collect();
        if options.len() != requested.len() {
            warn!(
                product_id = %product_id,
                requested = requested.len(),
                found = options.len(),
                "Rejected cart add: selection references unknown or inactive options"
            );
            return Err(ShopError::InvalidOptionSelection);
        }

        if !self
            .configurator
            .validate_configuration(product_id, option_ids)?
        {
            return Err(ShopError::InvalidOptionSelection);
        }

        let line_option_ids: Vec<String> = options.iter().map(|o| o.id.clone()).collect();

        let cart = self.carts.upsert_mut(user_id, |cart| {
            let mut draft = cart.clone();
            match draft.line_matching(product_id, &line_option_ids) {
                Some(line) => {
                    line.quantity += quantity;
                }
                None => {
                    if draft.items.len() >= MAX_CART_LINES {
                        return Err(ShopError::CartTooLarge {
                            max: MAX_CART_LINES,
                        });
                    }
                    let mut line =
                        CartItem::new(Uuid::new_v4().to_string(), product_id, quantity);
                    line.options = line_option_ids
                        .iter()
                        .map(|id| CartLineOption {
                            option_id: id.clone(),
                            price: Money::zero(),
                        })
                        .collect();
                    draft.items.push(line);
                }
            }
            self.reprice(&mut draft)?;
            *cart = draft.clone();
            Ok(draft)
        })?;

        info!(
            user_id = %user_id,
            product_id = %product_id,
            quantity,
            total = %cart.total,
            "Added item to cart"
        );
        Ok(cart)
    }

    /// Removes a line from the user's cart by line id.
    pub fn remove_item(&self, user_id: &str, cart_item_id: &str) -> ShopResult<Cart> {
        let cart = self
            .carts
            .try_mut(user_id, |cart| {
                let mut draft = cart.clone();
                if !draft.remove_line(cart_item_id) {
                    return Err(ShopError::CartItemNotFound(cart_item_id.to_string()));
                }
                self.reprice(&mut draft)?;
                *cart = draft.clone();
                Ok(draft)
            })
            .ok_or(ShopError::CartNotFound)??;

        info!(user_id = %user_id, cart_item_id = %cart_item_id, "Removed cart line");
        Ok(cart)
    }

    /// Sets a line's quantity. Zero or below removes the line instead.
    pub fn update_item_quantity(
        &self,
        user_id: &str,
        cart_item_id: &str,
        quantity: i64,
    ) -> ShopResult<Cart> {
        if quantity <= 0 {
            return self.remove_item(user_id, cart_item_id);
        }
        validate_quantity(quantity)?;

        let cart = self
            .carts
            .try_mut(user_id, |cart| {
                let mut draft = cart.clone();
                let line = draft
                    .item_mut(cart_item_id)
                    .ok_or_else(|| ShopError::CartItemNotFound(cart_item_id.to_string()))?;
                line.quantity = quantity;

                self.reprice(&mut draft)?;
                *cart = draft.clone();
                Ok::<Cart, ShopError>(draft)
            })
            .ok_or(ShopError::CartNotFound)??;

        info!(user_id = %user_id, cart_item_id = %cart_item_id, quantity, "Updated line quantity");
        Ok(cart)
    }

    /// Recomputes every line's option prices, unit price, and total, then
    /// the cart total, against the current catalog. Options that have been
    /// retired since the line was added contribute zero; a retired product
    /// fails the whole mutation.
    fn reprice(&self, cart: &mut Cart) -> ShopResult<()> {
        for item in &mut cart.items {
            let product = self
                .catalog
                .product(&item.product_id)
                .ok_or_else(|| ShopError::ProductUnavailable(item.product_id.clone()))?;

            let line_ids: Vec<String> =
                item.options.iter().map(|o| o.option_id.clone()).collect();
            let options = self.catalog.options_by_ids(&line_ids, false);
            let selected = OptionSet::from_options(options);
            let rules = self.catalog.price_rules_touching(&line_ids);

            let mut options_total = Money::zero();
            for line_option in &mut item.options {
                let price = match selected.get(&line_option.option_id) {
                    Some(option) => resolve_option_price(option, &selected, &rules),
                    None => Money::zero(),
                };
                line_option.price = price;
                options_total += price;
            }

            item.unit_price = product.base_price + options_total;
            item.total_price = item.unit_price.times(item.quantity);
        }
        cart.recompute_total();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use velo_store::seed_demo_catalog;

    fn service() -> (CartService, velo_store::SeededCatalog) {
        let catalog = Arc::new(CatalogStore::new());
        let seeded = seed_demo_catalog(&catalog).unwrap();
        (CartService::new(catalog, Arc::new(CartStore::new())), seeded)
    }

    #[test]
    fn get_cart_is_lazy_and_empty() {
        let (service, _) = service();
        let cart = service.get_cart("u1");
        assert!(cart.is_empty());
        assert!(cart.total.is_zero());
    }

    #[test]
    fn add_rejects_bad_selections() {
        let (service, seeded) = service();

        let err = service
            .add_item("u1", &seeded.trailblazer, &[], 1)
            .unwrap_err();
        assert_eq!(err.to_string(), "No options selected for the product.");

        let err = service
            .add_item("u1", &seeded.trailblazer, &["ghost".into()], 1)
            .unwrap_err();
        assert!(matches!(err, ShopError::InvalidOptionSelection));

        // full-suspension without mountain wheels violates a REQUIRES rule
        let err = service
            .add_item("u1", &seeded.trailblazer, &[seeded.full_suspension.clone()], 1)
            .unwrap_err();
        assert!(matches!(err, ShopError::InvalidOptionSelection));

        let err = service
            .add_item("u1", "ghost", &[seeded.matte.clone()], 1)
            .unwrap_err();
        assert!(matches!(err, ShopError::ProductUnavailable(_)));

        let err = service
            .add_item("u1", &seeded.trailblazer, &[seeded.matte.clone()], 0)
            .unwrap_err();
        assert!(matches!(err, ShopError::Validation(_)));

        // nothing above created a cart line
        assert!(service.get_cart("u1").is_empty());
    }

    #[test]
    fn mutations_on_missing_carts_and_lines_fail() {
        let (service, seeded) = service();

        assert!(matches!(
            service.remove_item("ghost", "line").unwrap_err(),
            ShopError::CartNotFound
        ));

        service
            .add_item("u1", &seeded.trailblazer, &[seeded.matte.clone()], 1)
            .unwrap();
        let err = service.remove_item("u1", "no-such-line").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cart item with ID no-such-line not found in your cart."
        );
        assert!(matches!(
            service
                .update_item_quantity("u1", "no-such-line", 2)
                .unwrap_err(),
            ShopError::CartItemNotFound(_)
        ));
    }
}
