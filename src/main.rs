use std::sync::Arc;
use tracing::info;

use storefront_rs::{
    init_observability,
    repositories::{InMemoryAuthRepository, InMemoryProductRepository, JsonFileCartStorage, JsonFileOrderStore},
    services::{AuthService, CartService, OrderService, ProductService},
    Config,
};

/// Wires one storefront session through explicit dependency injection and
/// walks it end to end: register, browse, fill the cart, check out.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_environment()?;

    init_observability(
        &config.observability.service_name,
        &config.observability.service_version,
        &config.observability.log_level,
        config.observability.enable_json_logging,
    )?;

    info!("Starting storefront session");
    info!(
        "Service: {} v{}",
        config.observability.service_name, config.observability.service_version
    );
    info!("Data directory: {}", config.storage.data_dir);

    tokio::fs::create_dir_all(&config.storage.data_dir).await?;

    // Every consumer receives its collaborators explicitly; nothing here is a
    // process-wide singleton.
    let catalog = Arc::new(InMemoryProductRepository::with_seed_catalog());
    let product_service = ProductService::new(catalog.clone());

    let cart_storage = Arc::new(JsonFileCartStorage::new(
        config.storage.cart_path(),
        catalog.clone(),
    ));
    let mut cart_service = CartService::new(cart_storage).await;

    let auth_service = AuthService::new(Arc::new(InMemoryAuthRepository::new()));
    let order_service = OrderService::new(Arc::new(JsonFileOrderStore::new(
        config.storage.orders_path(),
    )));

    // Scripted walkthrough of one shopping session
    let session = auth_service
        .register("Demo Shopper", "shopper@example.com", "correct-horse")
        .await?;
    info!("Registered {} (token {} bytes)", session.user.email, session.token.len());

    let products = product_service.all_products().await?;
    for product in &products {
        info!("Catalog: #{} {} - {}", product.id, product.name, product.price);
    }

    if let Some(first) = products.first() {
        cart_service.add_to_cart(first.clone(), 2).await?;
    }
    if let Some(second) = products.get(1) {
        cart_service.add_to_cart(second.clone(), 1).await?;
    }
    info!(
        "Cart: {} items, total {}",
        cart_service.total_items(),
        cart_service.total_price()
    );

    let order = order_service
        .create_order(&session.user, &mut cart_service)
        .await?;
    info!("Placed order {} for {}", order.id, order.total);

    let history = order_service.user_orders(&session.user.id).await?;
    info!("Order history now holds {} orders", history.len());

    info!("Session complete");
    Ok(())
}
