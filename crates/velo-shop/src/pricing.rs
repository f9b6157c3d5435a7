//! # Pricing Service
//!
//! Price calculation over the catalog, and price-rule administration.
//!
//! ## Calculation
//! ```text
//! product price = product.base_price
//!               + Σ resolved price of each selected active option
//!
//! resolved price of option O:
//!   an active price rule has dependent == O and its target selected
//!     ──► the rule's price
//!   otherwise ──► O.base_price
//! ```
//! Unknown and inactive option ids contribute nothing; they are dropped when
//! the options are loaded rather than rejected. Rejection is the cart's job,
//! where a selection becomes an order line.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use velo_core::pricing::options_price;
use velo_core::validation::validate_price;
use velo_core::{Money, OptionPriceRule, OptionSet};
use velo_store::CatalogStore;

use crate::error::{ShopError, ShopResult};

/// A priced product configuration, with the base/options split a storefront
/// shows next to the total.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPriceBreakdown {
    pub product_id: String,
    pub base_price: Money,
    pub options_price: Money,
    pub total: Money,
}

/// Computes configuration prices and administers price rules.
#[derive(Debug, Clone)]
pub struct PricingService {
    catalog: Arc<CatalogStore>,
}

impl PricingService {
    pub fn new(catalog: Arc<CatalogStore>) -> Self {
        PricingService { catalog }
    }

    /// Total contributed by a set of options, price rules applied. An empty
    /// selection (or one that resolves to nothing) prices at zero.
    pub fn calculate_options_price(&self, option_ids: &[String]) -> ShopResult<Money> {
        if option_ids.is_empty() {
            return Ok(Money::zero());
        }

        let options = self.catalog.options_by_ids(option_ids, false);
        let selected = OptionSet::from_options(options);
        let rules = self.catalog.price_rules_touching(option_ids);

        Ok(options_price(&selected, &rules))
    }

    /// Full price of one configured product: base price plus options.
    pub fn calculate_product_price(
        &self,
        product_id: &str,
        option_ids: &[String],
    ) -> ShopResult<ProductPriceBreakdown> {
        if product_id.trim().is_empty() || option_ids.is_empty() {
            return Err(ShopError::MissingSelection);
        }

        let product = self
            .catalog
            .product(product_id)
            .ok_or_else(|| ShopError::ProductNotFound(product_id.to_string()))?;
        let options_price = self.calculate_options_price(option_ids)?;
        let total = product.base_price + options_price;

        info!(
            product_id = %product_id,
            base = %product.base_price,
            options = %options_price,
            total = %total,
            "Calculated product price"
        );

        Ok(ProductPriceBreakdown {
            product_id: product.id,
            base_price: product.base_price,
            options_price,
            total,
        })
    }

    /// Creates a price rule: selecting `dependent` together with `target`
    /// reprices the dependent to `price`. At most one active rule per
    /// (target, dependent) pair; self-pairs are rejected.
    pub fn create_price_rule(
        &self,
        target_option_id: &str,
        dependent_option_id: &str,
        price: Money,
    ) -> ShopResult<OptionPriceRule> {
        validate_price("price", price)?;

        // Inactive options may still carry rules, so lookups here include them.
        if self
            .catalog
            .options_by_ids(&[target_option_id.to_string()], true)
            .is_empty()
        {
            return Err(ShopError::TargetOptionNotFound(target_option_id.to_string()));
        }
        if target_option_id == dependent_option_id {
            return Err(ShopError::SelfReferentialPriceRule);
        }
        if self
            .catalog
            .options_by_ids(&[dependent_option_id.to_string()], true)
            .is_empty()
        {
            return Err(ShopError::DependentOptionNotFound(
                dependent_option_id.to_string(),
            ));
        }
        if self
            .catalog
            .price_rule_for_pair(target_option_id, dependent_option_id)
            .is_some()
        {
            return Err(ShopError::DuplicatePriceRule);
        }

        let rule = OptionPriceRule::new(
            Uuid::new_v4().to_string(),
            target_option_id,
            dependent_option_id,
            price,
        );
        self.catalog.insert_price_rule(rule.clone())?;

        info!(
            rule_id = %rule.id,
            target = %target_option_id,
            dependent = %dependent_option_id,
            price = %price,
            "Created price rule"
        );
        Ok(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use velo_store::seed_demo_catalog;

    fn service() -> (PricingService, velo_store::SeededCatalog) {
        let catalog = Arc::new(CatalogStore::new());
        let seeded = seed_demo_catalog(&catalog).unwrap();
        (PricingService::new(catalog), seeded)
    }

    #[test]
    fn empty_selection_prices_at_zero() {
        let (service, _) = service();
        assert!(service.calculate_options_price(&[]).unwrap().is_zero());
        assert!(service
            .calculate_options_price(&["ghost".into()])
            .unwrap()
            .is_zero());
    }

    #[test]
    fn product_price_adds_base_and_options() {
        let (service, seeded) = service();

        // matte alone keeps its base price
        let quote = service
            .calculate_product_price(&seeded.trailblazer, &[seeded.matte.clone()])
            .unwrap();
        assert_eq!(quote.base_price.cents(), 80_000);
        assert_eq!(quote.options_price.cents(), 3500);
        assert_eq!(quote.total.cents(), 83_500);

        let err = service
            .calculate_product_price("ghost", &[seeded.matte.clone()])
            .unwrap_err();
        assert_eq!(err.to_string(), "Product with ID ghost not found");
    }

    #[test]
    fn matte_reprices_over_full_suspension() {
        let (service, seeded) = service();
        let pair = service
            .calculate_options_price(&[seeded.matte.clone(), seeded.full_suspension.clone()])
            .unwrap();
        // matte 35.00 -> 50.00 beside the 130.00 frame
        assert_eq!(pair.cents(), 18_000);
    }

    #[test]
    fn price_rule_creation_guards() {
        let (service, seeded) = service();

        let err = service
            .create_price_rule("ghost", &seeded.matte, Money::from_cents(100))
            .unwrap_err();
        assert!(matches!(err, ShopError::TargetOptionNotFound(_)));

        let err = service
            .create_price_rule(&seeded.matte, &seeded.matte, Money::from_cents(100))
            .unwrap_err();
        assert!(matches!(err, ShopError::SelfReferentialPriceRule));

        let err = service
            .create_price_rule(&seeded.matte, "ghost", Money::from_cents(100))
            .unwrap_err();
        assert!(matches!(err, ShopError::DependentOptionNotFound(_)));

        // the seeder already created (full_suspension, matte)
        let err = service
            .create_price_rule(&seeded.full_suspension, &seeded.matte, Money::from_cents(100))
            .unwrap_err();
        assert!(matches!(err, ShopError::DuplicatePriceRule));

        let err = service
            .create_price_rule(&seeded.shiny, &seeded.matte, Money::from_cents(-1))
            .unwrap_err();
        assert!(matches!(err, ShopError::Validation(_)));

        let rule = service
            .create_price_rule(&seeded.step_through, &seeded.matte, Money::from_cents(4200))
            .unwrap();
        assert_eq!(rule.price.cents(), 4200);
    }
}
