//! # Demo Catalog Seeder
//!
//! Populates a [`CatalogStore`] with the canonical bicycle catalog used by
//! the demo binary and the integration tests.
//!
//! ## Seeded Data
//! - "Trailblazer Pro" ($800.00): frame type / frame finish / wheels /
//!   rim color / chain groups with thirteen options
//! - "Road Master" ($700.00): a small handlebar group
//! - Compatibility rules:
//!   - full-suspension REQUIRES mountain wheels
//!   - mountain wheels ONLY_ALLOWS a full-suspension frame
//!   - fat bike wheels EXCLUDES red rims
//! - Price rules: matte finish costs $50.00 over a full-suspension frame
//!   and $35.00 over a diamond frame (base $35.00 otherwise)
//! - Inventory for most options; red rims are flagged out of stock and fat
//!   bike wheels carry no inventory record at all

use uuid::Uuid;

use velo_core::{
    InventoryLevel, Money, OptionGroup, OptionPriceRule, OptionRule, Product, ProductOption,
    RuleKind,
};

use crate::catalog::CatalogStore;
use crate::error::StoreResult;

/// Ids of everything the seeder created, for tests and demos that need to
/// reference specific records.
#[derive(Debug, Clone)]
pub struct SeededCatalog {
    pub trailblazer: String,
    pub road_master: String,

    pub full_suspension: String,
    pub diamond: String,
    pub step_through: String,
    pub matte: String,
    pub shiny: String,
    pub road_wheels: String,
    pub mountain_wheels: String,
    pub fat_bike_wheels: String,
    pub red_rim: String,
    pub black_rim: String,
    pub blue_rim: String,
    pub single_speed: String,
    pub eight_speed: String,

    pub drop_bar: String,
    pub flat_bar: String,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn seed_group(
    store: &CatalogStore,
    product_id: &str,
    name: &str,
    display_name: &str,
) -> StoreResult<String> {
    let id = new_id();
    store.insert_group(OptionGroup {
        id: id.clone(),
        name: name.into(),
        display_name: display_name.into(),
        product_id: product_id.into(),
    })?;
    Ok(id)
}

fn seed_option(
    store: &CatalogStore,
    group_id: &str,
    name: &str,
    display_name: &str,
    price: Money,
) -> StoreResult<String> {
    let id = new_id();
    store.insert_option(ProductOption::new(&id, group_id, name, display_name, price))?;
    Ok(id)
}

/// Seeds the demo catalog and returns the created ids.
pub fn seed_demo_catalog(store: &CatalogStore) -> StoreResult<SeededCatalog> {
    let trailblazer = new_id();
    let mut product = Product::new(&trailblazer, "Trailblazer Pro", Money::from_major_minor(800, 0));
    product.description = "A rugged mountain bike for every trail.".into();
    store.insert_product(product)?;

    let road_master = new_id();
    let mut product = Product::new(&road_master, "Road Master", Money::from_major_minor(700, 0));
    product.description = "A fast road bike for paved routes.".into();
    store.insert_product(product)?;

    // Trailblazer groups and options
    let frame_type = seed_group(store, &trailblazer, "frame_type", "Frame Type")?;
    let frame_finish = seed_group(store, &trailblazer, "frame_finish", "Frame Finish")?;
    let wheels = seed_group(store, &trailblazer, "wheels", "Wheels")?;
    let rim_color = seed_group(store, &trailblazer, "rim_color", "Rim Color")?;
    let chain = seed_group(store, &trailblazer, "chain", "Chain")?;

    let full_suspension = seed_option(
        store,
        &frame_type,
        "full_suspension",
        "Full-suspension",
        Money::from_major_minor(130, 0),
    )?;
    let diamond = seed_option(
        store,
        &frame_type,
        "diamond",
        "Diamond",
        Money::from_major_minor(100, 0),
    )?;
    let step_through = seed_option(
        store,
        &frame_type,
        "step_through",
        "Step-through",
        Money::from_major_minor(90, 0),
    )?;
    let matte = seed_option(
        store,
        &frame_finish,
        "matte",
        "Matte",
        Money::from_major_minor(35, 0),
    )?;
    let shiny = seed_option(
        store,
        &frame_finish,
        "shiny",
        "Shiny",
        Money::from_major_minor(30, 0),
    )?;
    let road_wheels = seed_option(
        store,
        &wheels,
        "road_wheels",
        "Road Wheels",
        Money::from_major_minor(80, 0),
    )?;
    let mountain_wheels = seed_option(
        store,
        &wheels,
        "mountain_wheels",
        "Mountain Wheels",
        Money::from_major_minor(95, 0),
    )?;
    let fat_bike_wheels = seed_option(
        store,
        &wheels,
        "fat_bike_wheels",
        "Fat Bike Wheels",
        Money::from_major_minor(120, 0),
    )?;
    let red_rim = seed_option(store, &rim_color, "red", "Red", Money::from_major_minor(25, 0))?;
    let black_rim = seed_option(
        store,
        &rim_color,
        "black",
        "Black",
        Money::from_major_minor(15, 0),
    )?;
    let blue_rim = seed_option(store, &rim_color, "blue", "Blue", Money::from_major_minor(20, 0))?;
    let single_speed = seed_option(
        store,
        &chain,
        "single_speed",
        "Single-speed Chain",
        Money::from_major_minor(43, 0),
    )?;
    let eight_speed = seed_option(
        store,
        &chain,
        "eight_speed",
        "8-speed Chain",
        Money::from_major_minor(65, 0),
    )?;

    // Road Master groups and options
    let handlebar = seed_group(store, &road_master, "handlebar", "Handlebar")?;
    let drop_bar = seed_option(
        store,
        &handlebar,
        "drop_bar",
        "Drop Bar",
        Money::from_major_minor(30, 0),
    )?;
    let flat_bar = seed_option(
        store,
        &handlebar,
        "flat_bar",
        "Flat Bar",
        Money::from_major_minor(25, 0),
    )?;

    // Compatibility rules
    store.insert_rule(OptionRule::new(
        new_id(),
        RuleKind::Requires,
        &full_suspension,
        &mountain_wheels,
    ))?;
    store.insert_rule(OptionRule::new(
        new_id(),
        RuleKind::OnlyAllows,
        &mountain_wheels,
        &full_suspension,
    ))?;
    store.insert_rule(OptionRule::new(
        new_id(),
        RuleKind::Excludes,
        &fat_bike_wheels,
        &red_rim,
    ))?;

    // Price rules: the matte finish price depends on the frame type
    store.insert_price_rule(OptionPriceRule::new(
        new_id(),
        &full_suspension,
        &matte,
        Money::from_major_minor(50, 0),
    ))?;
    store.insert_price_rule(OptionPriceRule::new(
        new_id(),
        &diamond,
        &matte,
        Money::from_major_minor(35, 0),
    ))?;

    // Inventory: red rims are sold out, fat bike wheels have no record
    for (option_id, quantity) in [
        (&full_suspension, 15),
        (&diamond, 20),
        (&step_through, 8),
        (&matte, 40),
        (&shiny, 40),
        (&road_wheels, 12),
        (&mountain_wheels, 9),
        (&black_rim, 25),
        (&blue_rim, 18),
        (&single_speed, 30),
        (&eight_speed, 22),
    ] {
        store.upsert_inventory(InventoryLevel {
            product_option_id: option_id.clone(),
            quantity,
            out_of_stock: false,
        });
    }
    store.upsert_inventory(InventoryLevel {
        product_option_id: red_rim.clone(),
        quantity: 0,
        out_of_stock: true,
    });

    Ok(SeededCatalog {
        trailblazer,
        road_master,
        full_suspension,
        diamond,
        step_through,
        matte,
        shiny,
        road_wheels,
        mountain_wheels,
        fat_bike_wheels,
        red_rim,
        black_rim,
        blue_rim,
        single_speed,
        eight_speed,
        drop_bar,
        flat_bar,
    })
}
