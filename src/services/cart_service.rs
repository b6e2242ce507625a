use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::models::{
    validate_cart_quantity, Cart, CartItem, Product, ServiceError, ServiceResult,
};
use crate::repositories::CartStorage;

/// Single point of mutation keeping the in-memory cart and its persisted form
/// synchronized. One instance per application session, passed explicitly to
/// every consumer; there is no hidden shared cart.
pub struct CartService {
    cart: Cart,
    storage: Arc<dyn CartStorage>,
}

impl CartService {
    /// Create a new CartService, restoring the cart from storage exactly once.
    /// Missing or malformed stored state yields an empty cart.
    pub async fn new(storage: Arc<dyn CartStorage>) -> Self {
        let cart = storage.load_cart().await;
        info!("Cart service started with {} lines", cart.items().len());
        Self { cart, storage }
    }

    /// Add a product to the cart and persist the new state
    #[instrument(skip(self, product), fields(product_id = product.id, quantity = quantity))]
    pub async fn add_to_cart(&mut self, product: Product, quantity: u32) -> ServiceResult<()> {
        self.validate_quantity(quantity)?;

        self.cart.add_item(product, quantity);
        self.storage.save_cart(&self.cart).await?;

        info!("Item added to cart");
        Ok(())
    }

    /// Decrement a product's quantity by one and persist the new state.
    /// Unknown product ids are a no-op, not an error.
    #[instrument(skip(self), fields(product_id = product_id))]
    pub async fn remove_from_cart(&mut self, product_id: u32) -> ServiceResult<()> {
        self.cart.remove_item(product_id);
        self.storage.save_cart(&self.cart).await?;

        info!("Item removed from cart");
        Ok(())
    }

    /// Remove all items and persist the now-empty state
    #[instrument(skip(self))]
    pub async fn clear_cart(&mut self) -> ServiceResult<()> {
        self.cart.clear();
        self.storage.save_cart(&self.cart).await?;

        info!("Cart cleared");
        Ok(())
    }

    /// Get a snapshot of the current cart lines; no persistence side effect
    pub fn cart_items(&self) -> Vec<CartItem> {
        self.cart.items().to_vec()
    }

    /// Get the total number of items in the cart
    pub fn total_items(&self) -> u32 {
        self.cart.total_items()
    }

    /// Get the total price of all items in the cart
    pub fn total_price(&self) -> Decimal {
        self.cart.total_price()
    }

    /// Check if the cart is empty
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    fn validate_quantity(&self, quantity: u32) -> ServiceResult<()> {
        if quantity == 0 {
            return Err(ServiceError::InvalidQuantity { quantity });
        }
        validate_cart_quantity(quantity)?;
        Ok(())
    }
}
