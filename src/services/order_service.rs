use std::sync::Arc;
use tracing::{info, instrument};

use crate::models::{Order, OrderStatus, RepositoryError, ServiceError, ServiceResult, UserProfile};
use crate::repositories::OrderStore;
use crate::services::CartService;

/// Service turning carts into orders and answering order-history queries
pub struct OrderService {
    order_store: Arc<dyn OrderStore>,
}

impl OrderService {
    /// Create a new OrderService
    pub fn new(order_store: Arc<dyn OrderStore>) -> Self {
        Self { order_store }
    }

    /// Place an order from the session's cart, then clear the cart.
    ///
    /// The cart service is passed in explicitly; this service never holds a
    /// cart of its own. An empty cart is rejected before anything persists.
    #[instrument(skip(self, user, cart), fields(user_id = %user.id))]
    pub async fn create_order(
        &self,
        user: &UserProfile,
        cart: &mut CartService,
    ) -> ServiceResult<Order> {
        if cart.is_empty() {
            return Err(ServiceError::EmptyCart);
        }

        let order = Order::new(user.id.clone(), cart.cart_items(), cart.total_price());
        let order = self.order_store.insert_order(order).await?;

        // clearing also persists the now-empty cart
        cart.clear_cart().await?;

        info!("Order {} placed with {} lines", order.id, order.items.len());
        Ok(order)
    }

    /// Get all orders placed by a user, oldest first
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn user_orders(&self, user_id: &str) -> ServiceResult<Vec<Order>> {
        Ok(self.order_store.find_by_user(user_id).await?)
    }

    /// Move an order to a new lifecycle status
    #[instrument(skip(self), fields(order_id = %order_id, status = %status))]
    pub async fn update_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> ServiceResult<Order> {
        match self.order_store.update_status(order_id, status).await {
            Ok(order) => {
                info!("Order status updated");
                Ok(order)
            }
            Err(RepositoryError::NotFound) => Err(ServiceError::OrderNotFound {
                order_id: order_id.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}
