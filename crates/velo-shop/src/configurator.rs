//! # Configurator Service
//!
//! Compatibility validation for partial or complete option selections, and
//! the payload a storefront needs to render one product's configurator.
//!
//! ## Validation Flow
//! ```text
//! (product_id, option_ids)
//!   ├─ empty product id or empty selection ──► MissingSelection
//!   ├─ product missing / inactive ──────────► ProductNotFound
//!   └─ otherwise
//!        load active options for the ids      (unknown ids drop out)
//!        load active rules touching the ids
//!        every rule holds? ──────────────────► Ok(true) / Ok(false)
//! ```
//! Validity is advisory here; callers that must refuse invalid selections
//! (the cart) turn `Ok(false)` into their own error.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use velo_core::rules::all_rules_hold;
use velo_core::{OptionRule, OptionSet, Product};
use velo_store::{CatalogStore, GroupWithOptions};

use crate::error::{ShopError, ShopResult};

/// Everything a storefront needs to render one product's configurator:
/// the product, its groups with active options, and the compatibility
/// rules a client-side validator can pre-apply.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConfiguration {
    pub product: Product,
    pub groups: Vec<GroupWithOptions>,
    pub rules: Vec<OptionRule>,
}

/// Validates option selections against the catalog's compatibility rules.
#[derive(Debug, Clone)]
pub struct ConfiguratorService {
    catalog: Arc<CatalogStore>,
}

impl ConfiguratorService {
    pub fn new(catalog: Arc<CatalogStore>) -> Self {
        ConfiguratorService { catalog }
    }

    /// Whether a selection satisfies every active compatibility rule it
    /// touches. Partial selections are fine: a rule whose if-side is not
    /// selected holds vacuously.
    pub fn validate_configuration(
        &self,
        product_id: &str,
        option_ids: &[String],
    ) -> ShopResult<bool> {
        if product_id.trim().is_empty() || option_ids.is_empty() {
            return Err(ShopError::MissingSelection);
        }
        if self.catalog.product(product_id).is_none() {
            return Err(ShopError::ProductNotFound(product_id.to_string()));
        }

        let options = self.catalog.options_by_ids(option_ids, false);
        let selected = OptionSet::from_options(options);
        let rules = self.catalog.rules_touching(option_ids);
        let valid = all_rules_hold(&rules, &selected);

        info!(
            product_id = %product_id,
            selected = selected.len(),
            rules = rules.len(),
            valid,
            "Validated configuration"
        );
        Ok(valid)
    }

    /// The full configurator payload for one product.
    pub fn product_configuration(&self, product_id: &str) -> ShopResult<ProductConfiguration> {
        let product = self
            .catalog
            .product(product_id)
            .ok_or_else(|| ShopError::ProductNotFound(product_id.to_string()))?;

        let groups = self.catalog.option_groups_for_product(product_id);
        let option_ids = self.catalog.option_ids_for_product(product_id);
        let rules = self.catalog.rules_touching(&option_ids);

        Ok(ProductConfiguration {
            product,
            groups,
            rules,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use velo_store::seed_demo_catalog;

    fn service() -> (ConfiguratorService, velo_store::SeededCatalog) {
        let catalog = Arc::new(CatalogStore::new());
        let seeded = seed_demo_catalog(&catalog).unwrap();
        (ConfiguratorService::new(catalog), seeded)
    }

    #[test]
    fn empty_input_is_rejected() {
        let (service, seeded) = service();

        let err = service
            .validate_configuration("", &[seeded.matte.clone()])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = service
            .validate_configuration(&seeded.trailblazer, &[])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Product ID and at least one option ID are required"
        );
    }

    #[test]
    fn unknown_product_is_not_found() {
        let (service, seeded) = service();
        let err = service
            .validate_configuration("ghost", &[seeded.matte.clone()])
            .unwrap_err();
        assert!(matches!(err, ShopError::ProductNotFound(id) if id == "ghost"));
    }

    #[test]
    fn requires_rule_gates_the_selection() {
        let (service, seeded) = service();

        // full-suspension REQUIRES mountain wheels
        assert!(!service
            .validate_configuration(
                &seeded.trailblazer,
                &[seeded.full_suspension.clone(), seeded.road_wheels.clone()],
            )
            .unwrap());
        assert!(service
            .validate_configuration(
                &seeded.trailblazer,
                &[
                    seeded.full_suspension.clone(),
                    seeded.mountain_wheels.clone(),
                ],
            )
            .unwrap());
    }

    #[test]
    fn configuration_payload_contains_groups_and_rules() {
        let (service, seeded) = service();
        let config = service.product_configuration(&seeded.trailblazer).unwrap();

        assert_eq!(config.product.name, "Trailblazer Pro");
        assert_eq!(config.groups.len(), 5);
        assert_eq!(config.rules.len(), 3);

        assert!(service.product_configuration("ghost").is_err());
    }
}
