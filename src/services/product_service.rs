use std::sync::Arc;
use tracing::{info, instrument};

use crate::models::{Product, ServiceResult};
use crate::repositories::ProductRepository;

/// Read-only facade over the catalog
pub struct ProductService {
    product_repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    /// Create a new ProductService
    pub fn new(product_repository: Arc<dyn ProductRepository>) -> Self {
        Self { product_repository }
    }

    /// Get all products in the catalog
    #[instrument(skip(self))]
    pub async fn all_products(&self) -> ServiceResult<Vec<Product>> {
        let products = self.product_repository.get_all().await?;
        info!("Listed {} products", products.len());
        Ok(products)
    }

    /// Get a product by id, `None` if the catalog has no such entry
    #[instrument(skip(self), fields(product_id = id))]
    pub async fn product_by_id(&self, id: u32) -> ServiceResult<Option<Product>> {
        Ok(self.product_repository.get_by_id(id).await?)
    }
}
