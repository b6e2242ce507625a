use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::models::{Order, OrderStatus, RepositoryError, RepositoryResult};

/// Version stamped into the persisted order-history envelope
pub const ORDERS_FORMAT_VERSION: u32 = 1;

/// The serialized slot contents: every order, full product snapshots included.
/// Unlike the cart slot, order history must survive catalog changes.
#[derive(Debug, Serialize, Deserialize)]
struct StoredOrders {
    version: u32,
    orders: Vec<Order>,
}

/// Trait defining the persistence boundary for placed orders
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Append a new order to the history
    async fn insert_order(&self, order: Order) -> RepositoryResult<Order>;

    /// Find all orders placed by a user, oldest first
    async fn find_by_user(&self, user_id: &str) -> RepositoryResult<Vec<Order>>;

    /// Find a single order by id
    async fn find_by_id(&self, order_id: &str) -> RepositoryResult<Option<Order>>;

    /// Update an order's status, returning the updated order
    async fn update_status(&self, order_id: &str, status: OrderStatus) -> RepositoryResult<Order>;
}

fn decode_orders(text: &str) -> Vec<Order> {
    let stored: StoredOrders = match serde_json::from_str(text) {
        Ok(stored) => stored,
        Err(e) => {
            warn!("Discarding malformed stored orders: {}", e);
            return Vec::new();
        }
    };

    if stored.version != ORDERS_FORMAT_VERSION {
        warn!(
            "Discarding stored orders with unsupported version {}",
            stored.version
        );
        return Vec::new();
    }

    stored.orders
}

fn encode_orders(orders: &[Order]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&StoredOrders {
        version: ORDERS_FORMAT_VERSION,
        orders: orders.to_vec(),
    })
}

fn apply_status(orders: &mut [Order], order_id: &str, status: OrderStatus) -> RepositoryResult<Order> {
    let order = orders
        .iter_mut()
        .find(|order| order.id == order_id)
        .ok_or(RepositoryError::NotFound)?;
    order.set_status(status);
    Ok(order.clone())
}

/// File-backed implementation of the OrderStore trait. Every mutation is a
/// full rewrite of the slot; the lock keeps read-modify-write cycles whole.
pub struct JsonFileOrderStore {
    path: PathBuf,
    write_guard: RwLock<()>,
}

impl JsonFileOrderStore {
    /// Create a new file-backed order store
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_guard: RwLock::new(()),
        }
    }

    async fn read_all(&self) -> Vec<Order> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => decode_orders(&text),
            Err(e) => {
                debug!("No stored orders ({})", e.kind());
                Vec::new()
            }
        }
    }

    async fn write_all(&self, orders: &[Order]) -> RepositoryResult<()> {
        let text = encode_orders(orders)?;
        tokio::fs::write(&self.path, text).await?;
        Ok(())
    }
}

#[async_trait]
impl OrderStore for JsonFileOrderStore {
    #[instrument(skip(self, order), fields(order_id = %order.id, user_id = %order.user_id))]
    async fn insert_order(&self, order: Order) -> RepositoryResult<Order> {
        let _guard = self.write_guard.write().await;
        let mut orders = self.read_all().await;
        orders.push(order.clone());
        self.write_all(&orders).await?;
        info!("Order persisted");
        Ok(order)
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn find_by_user(&self, user_id: &str) -> RepositoryResult<Vec<Order>> {
        let _guard = self.write_guard.read().await;
        let orders = self.read_all().await;
        Ok(orders
            .into_iter()
            .filter(|order| order.user_id == user_id)
            .collect())
    }

    #[instrument(skip(self), fields(order_id = %order_id))]
    async fn find_by_id(&self, order_id: &str) -> RepositoryResult<Option<Order>> {
        let _guard = self.write_guard.read().await;
        let orders = self.read_all().await;
        Ok(orders.into_iter().find(|order| order.id == order_id))
    }

    #[instrument(skip(self), fields(order_id = %order_id, status = %status))]
    async fn update_status(&self, order_id: &str, status: OrderStatus) -> RepositoryResult<Order> {
        let _guard = self.write_guard.write().await;
        let mut orders = self.read_all().await;
        let updated = apply_status(&mut orders, order_id, status)?;
        self.write_all(&orders).await?;
        info!("Order status updated");
        Ok(updated)
    }
}

/// In-memory implementation of the OrderStore trait
pub struct InMemoryOrderStore {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrderStore {
    /// Create a new empty in-memory order store
    pub fn new() -> Self {
        Self {
            orders: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert_order(&self, order: Order) -> RepositoryResult<Order> {
        self.orders.write().await.push(order.clone());
        Ok(order)
    }

    async fn find_by_user(&self, user_id: &str) -> RepositoryResult<Vec<Order>> {
        Ok(self
            .orders
            .read()
            .await
            .iter()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, order_id: &str) -> RepositoryResult<Option<Order>> {
        Ok(self
            .orders
            .read()
            .await
            .iter()
            .find(|order| order.id == order_id)
            .cloned())
    }

    async fn update_status(&self, order_id: &str, status: OrderStatus) -> RepositoryResult<Order> {
        let mut orders = self.orders.write().await;
        apply_status(&mut orders, order_id, status)
    }
}
