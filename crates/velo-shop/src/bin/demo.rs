//! Seeds the demo bicycle catalog and walks one configure -> price -> cart
//! session, printing the final cart as JSON.
//!
//! Run with `cargo run --bin demo`; set `RUST_LOG=debug` to watch the store
//! queries behind each step.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use velo_shop::{CartService, ConfiguratorService, InventoryService, PricingService};
use velo_store::{seed_demo_catalog, CartStore, CatalogStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let catalog = Arc::new(CatalogStore::new());
    let carts = Arc::new(CartStore::new());
    let seeded = seed_demo_catalog(&catalog)?;

    let configurator = ConfiguratorService::new(Arc::clone(&catalog));
    let pricing = PricingService::new(Arc::clone(&catalog));
    let inventory = InventoryService::new(Arc::clone(&catalog));
    let cart_service = CartService::new(Arc::clone(&catalog), Arc::clone(&carts));

    // What the storefront would render for the Trailblazer Pro.
    let config = configurator.product_configuration(&seeded.trailblazer)?;
    info!(
        product = %config.product.name,
        groups = config.groups.len(),
        rules = config.rules.len(),
        "Loaded configurator payload"
    );

    // A mountain build: full-suspension frame, matte finish, mountain
    // wheels, blue rims, single-speed chain.
    let selection = vec![
        seeded.full_suspension.clone(),
        seeded.matte.clone(),
        seeded.mountain_wheels.clone(),
        seeded.blue_rim.clone(),
        seeded.single_speed.clone(),
    ];

    let valid = configurator.validate_configuration(&seeded.trailblazer, &selection)?;
    info!(valid, "Checked the mountain build against compatibility rules");

    let quote = pricing.calculate_product_price(&seeded.trailblazer, &selection)?;
    info!(
        base = %quote.base_price,
        options = %quote.options_price,
        total = %quote.total,
        "Priced the mountain build (matte repriced beside full-suspension)"
    );

    let in_stock = inventory.check_availability(&selection);
    info!(in_stock, "Checked stock for the selection");

    let user = "demo-user";
    cart_service.add_item(user, &seeded.trailblazer, &selection, 1)?;
    let cart = cart_service.add_item(user, &seeded.trailblazer, &selection, 1)?;
    info!(
        lines = cart.items.len(),
        quantity = cart.items[0].quantity,
        total = %cart.total,
        "Added the build twice; the lines merged"
    );

    println!("{}", serde_json::to_string_pretty(&cart)?);
    Ok(())
}
