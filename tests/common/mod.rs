use std::path::PathBuf;
use std::sync::Arc;

use rust_decimal_macros::dec;
use tempfile::TempDir;

use storefront_rs::models::Product;
use storefront_rs::repositories::{
    InMemoryProductRepository, JsonFileCartStorage, JsonFileOrderStore,
};

/// A throwaway data directory plus the catalog the storage adapters resolve
/// product ids against. Dropped with the TempDir at the end of each test.
pub struct TestStore {
    pub dir: TempDir,
    pub catalog: Arc<InMemoryProductRepository>,
}

impl TestStore {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
            catalog: Arc::new(InMemoryProductRepository::new(test_products())),
        }
    }

    pub fn cart_path(&self) -> PathBuf {
        self.dir.path().join("cart.json")
    }

    pub fn orders_path(&self) -> PathBuf {
        self.dir.path().join("orders.json")
    }

    pub fn cart_storage(&self) -> Arc<JsonFileCartStorage> {
        Arc::new(JsonFileCartStorage::new(
            self.cart_path(),
            self.catalog.clone(),
        ))
    }

    pub fn order_store(&self) -> Arc<JsonFileOrderStore> {
        Arc::new(JsonFileOrderStore::new(self.orders_path()))
    }
}

pub fn test_products() -> Vec<Product> {
    vec![
        Product::new(1, "Wireless Earbuds", dec!(10.00), "Earbuds", "a.jpg"),
        Product::new(2, "Smart Watch", dec!(199.99), "Watch", "b.jpg"),
        Product::new(3, "Portable Charger", dec!(49.99), "Charger", "c.jpg"),
    ]
}

pub fn product(id: u32) -> Product {
    test_products()
        .into_iter()
        .find(|p| p.id == id)
        .expect("known test product")
}
