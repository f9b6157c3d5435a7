//! # Inventory Service
//!
//! Stock lookups over the catalog's per-option inventory records.
//!
//! An option with no inventory record counts as untracked: it reads as
//! quantity zero / not in stock, and it fails availability checks until a
//! record is written for it.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use velo_core::InventoryLevel;
use velo_store::CatalogStore;

use crate::error::{ShopError, ShopResult};

/// Stock state of one option as the storefront presents it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionStockStatus {
    pub product_option_id: String,
    pub quantity: i64,
    pub in_stock: bool,
}

/// Stock lookups and level maintenance.
#[derive(Debug, Clone)]
pub struct InventoryService {
    catalog: Arc<CatalogStore>,
}

impl InventoryService {
    pub fn new(catalog: Arc<CatalogStore>) -> Self {
        InventoryService { catalog }
    }

    /// Stock status for every active option of a product, in the order the
    /// configurator lists them.
    pub fn inventory_status_for_product(
        &self,
        product_id: &str,
    ) -> ShopResult<Vec<OptionStockStatus>> {
        if self.catalog.product(product_id).is_none() {
            return Err(ShopError::ProductNotFound(product_id.to_string()));
        }

        let option_ids = self.catalog.option_ids_for_product(product_id);
        let levels: std::collections::HashMap<String, InventoryLevel> = self
            .catalog
            .inventory_for(&option_ids)
            .into_iter()
            .map(|level| (level.product_option_id.clone(), level))
            .collect();

        Ok(option_ids
            .into_iter()
            .map(|id| match levels.get(&id) {
                Some(level) => OptionStockStatus {
                    product_option_id: id,
                    quantity: level.quantity,
                    in_stock: !level.out_of_stock,
                },
                None => OptionStockStatus {
                    product_option_id: id,
                    quantity: 0,
                    in_stock: false,
                },
            })
            .collect())
    }

    /// Writes an option's stock level. When `out_of_stock` is not given, it
    /// follows from the quantity.
    pub fn set_level(
        &self,
        option_id: &str,
        quantity: i64,
        out_of_stock: Option<bool>,
    ) -> ShopResult<()> {
        // Inventory may be maintained for inactive options too.
        if self
            .catalog
            .options_by_ids(&[option_id.to_string()], true)
            .is_empty()
        {
            return Err(ShopError::OptionNotFound(option_id.to_string()));
        }

        let out_of_stock = out_of_stock.unwrap_or(quantity <= 0);
        self.catalog.upsert_inventory(InventoryLevel {
            product_option_id: option_id.to_string(),
            quantity,
            out_of_stock,
        });

        info!(option_id = %option_id, quantity, out_of_stock, "Set inventory level");
        Ok(())
    }

    /// Whether every given option has an inventory record and none of them
    /// is flagged out of stock.
    pub fn check_availability(&self, option_ids: &[String]) -> bool {
        let records = self.catalog.inventory_for(option_ids);
        let levels: std::collections::HashMap<&str, &InventoryLevel> = records
            .iter()
            .map(|level| (level.product_option_id.as_str(), level))
            .collect();

        option_ids
            .iter()
            .all(|id| levels.get(id.as_str()).is_some_and(|l| !l.out_of_stock))
    }
}
