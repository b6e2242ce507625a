use async_trait::async_trait;
use rust_decimal_macros::dec;
use tracing::{info, instrument};

use crate::models::{Product, RepositoryResult};

/// Trait defining the interface for catalog data access
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Get all products in the catalog
    async fn get_all(&self) -> RepositoryResult<Vec<Product>>;

    /// Get a product by its id
    async fn get_by_id(&self, id: u32) -> RepositoryResult<Option<Product>>;
}

/// In-memory implementation of the ProductRepository trait.
///
/// The catalog is reference data: fixed at construction, never mutated.
pub struct InMemoryProductRepository {
    products: Vec<Product>,
}

impl InMemoryProductRepository {
    /// Create a repository over an arbitrary product list
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Create a repository seeded with the demo storefront catalog
    pub fn with_seed_catalog() -> Self {
        Self::new(vec![
            Product::new(
                1,
                "Wireless Earbuds",
                dec!(99.99),
                "High-quality wireless earbuds with noise cancellation.",
                "https://images.unsplash.com/photo-1590658268037-6bf12165a8df",
            ),
            Product::new(
                2,
                "Smart Watch",
                dec!(199.99),
                "Feature-packed smartwatch with health tracking capabilities.",
                "https://images.unsplash.com/photo-1546868871-7041f2a55e12",
            ),
            Product::new(
                3,
                "Portable Charger",
                dec!(49.99),
                "High-capacity portable charger for all your devices.",
                "https://images.unsplash.com/photo-1585338107529-13afc5f02586",
            ),
            Product::new(
                4,
                "Bluetooth Speaker",
                dec!(79.99),
                "Waterproof Bluetooth speaker with amazing sound quality.",
                "https://images.unsplash.com/photo-1608043152269-423dbba4e7e1",
            ),
            Product::new(
                5,
                "Laptop Backpack",
                dec!(59.99),
                "Comfortable and spacious backpack for your laptop and accessories.",
                "https://images.unsplash.com/photo-1553062407-98eeb64c6a62",
            ),
            Product::new(
                6,
                "Wireless Mouse",
                dec!(29.99),
                "Ergonomic wireless mouse for improved productivity.",
                "https://images.unsplash.com/photo-1615663245857-ac93bb7c39e7",
            ),
        ])
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    #[instrument(skip(self))]
    async fn get_all(&self) -> RepositoryResult<Vec<Product>> {
        info!("Listing {} catalog products", self.products.len());
        Ok(self.products.clone())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: u32) -> RepositoryResult<Option<Product>> {
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }
}
