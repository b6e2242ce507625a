use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::models::{Cart, RepositoryResult};
use crate::repositories::ProductRepository;

/// Version stamped into every persisted cart envelope. Unknown versions are
/// discarded on load rather than guessed at.
pub const CART_FORMAT_VERSION: u32 = 1;

/// Persisted form of one cart line. Only the product id and quantity are
/// stored; product detail is re-resolved against the catalog on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartRecord {
    pub product_id: u32,
    pub quantity: u32,
}

/// The serialized slot contents: a versioned envelope around the records
#[derive(Debug, Serialize, Deserialize)]
struct StoredCart {
    version: u32,
    items: Vec<CartRecord>,
}

/// Trait defining the persistence boundary for a cart's contents.
///
/// `load_cart` is infallible by design: missing or malformed state is
/// recovered locally as an empty cart and never surfaced to callers. Save
/// failures ARE surfaced, since a lost save is user-visible data loss.
#[async_trait]
pub trait CartStorage: Send + Sync {
    /// Persist the cart's current line items as a full rewrite of the slot
    async fn save_cart(&self, cart: &Cart) -> RepositoryResult<()>;

    /// Restore the last saved cart, or an empty cart if nothing usable was saved
    async fn load_cart(&self) -> Cart;
}

/// Extract the persistable records from a cart
pub fn cart_to_records(cart: &Cart) -> Vec<CartRecord> {
    cart.items()
        .iter()
        .map(|item| CartRecord {
            product_id: item.product.id,
            quantity: item.quantity,
        })
        .collect()
}

/// Serialize a cart into the versioned slot text
fn encode_cart(cart: &Cart) -> Result<String, serde_json::Error> {
    serde_json::to_string(&StoredCart {
        version: CART_FORMAT_VERSION,
        items: cart_to_records(cart),
    })
}

/// Parse slot text back into records. Returns `None` for anything unusable so
/// callers fall back to an empty cart.
fn decode_records(text: &str) -> Option<Vec<CartRecord>> {
    let stored: StoredCart = match serde_json::from_str(text) {
        Ok(stored) => stored,
        Err(e) => {
            warn!("Discarding malformed stored cart: {}", e);
            return None;
        }
    };

    if stored.version != CART_FORMAT_VERSION {
        warn!(
            "Discarding stored cart with unsupported version {}",
            stored.version
        );
        return None;
    }

    Some(stored.items)
}

/// Rebuild a cart from records, re-resolving each product id against the
/// catalog. Records whose product is gone are skipped rather than loaded as
/// zero-priced placeholders.
async fn hydrate_cart(records: Vec<CartRecord>, catalog: &dyn ProductRepository) -> Cart {
    let mut cart = Cart::new();
    for record in records {
        match catalog.get_by_id(record.product_id).await {
            Ok(Some(product)) => cart.add_item(product, record.quantity),
            Ok(None) => {
                warn!(
                    "Skipping stored cart line for unknown product {}",
                    record.product_id
                );
            }
            Err(e) => {
                warn!(
                    "Skipping stored cart line for product {}: {}",
                    record.product_id, e
                );
            }
        }
    }
    cart
}

/// File-backed implementation of the CartStorage trait: one JSON document in
/// a single named file, the local-store equivalent of a browser storage slot.
pub struct JsonFileCartStorage {
    path: PathBuf,
    catalog: Arc<dyn ProductRepository>,
}

impl JsonFileCartStorage {
    /// Create a new file-backed cart storage
    pub fn new(path: impl Into<PathBuf>, catalog: Arc<dyn ProductRepository>) -> Self {
        Self {
            path: path.into(),
            catalog,
        }
    }

    /// Get the slot path (for testing)
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl CartStorage for JsonFileCartStorage {
    #[instrument(skip(self, cart), fields(path = %self.path.display(), item_count = cart.items().len()))]
    async fn save_cart(&self, cart: &Cart) -> RepositoryResult<()> {
        let text = encode_cart(cart)?;
        tokio::fs::write(&self.path, text).await?;
        debug!("Cart saved");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load_cart(&self) -> Cart {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) => {
                info!("No stored cart ({}), starting empty", e.kind());
                return Cart::new();
            }
        };

        match decode_records(&text) {
            Some(records) => {
                let cart = hydrate_cart(records, self.catalog.as_ref()).await;
                info!("Cart restored with {} lines", cart.items().len());
                cart
            }
            None => Cart::new(),
        }
    }
}

/// In-memory implementation of the CartStorage trait. Holds the same
/// serialized text a file slot would, which keeps the codec path identical.
pub struct InMemoryCartStorage {
    slot: RwLock<Option<String>>,
    catalog: Arc<dyn ProductRepository>,
}

impl InMemoryCartStorage {
    /// Create a new empty in-memory cart storage
    pub fn new(catalog: Arc<dyn ProductRepository>) -> Self {
        Self {
            slot: RwLock::new(None),
            catalog,
        }
    }

    /// Overwrite the raw slot contents (for testing malformed state)
    pub async fn set_raw(&self, text: impl Into<String>) {
        *self.slot.write().await = Some(text.into());
    }
}

#[async_trait]
impl CartStorage for InMemoryCartStorage {
    async fn save_cart(&self, cart: &Cart) -> RepositoryResult<()> {
        let text = encode_cart(cart)?;
        *self.slot.write().await = Some(text);
        Ok(())
    }

    async fn load_cart(&self) -> Cart {
        let slot = self.slot.read().await;
        match slot.as_deref().and_then(decode_records) {
            Some(records) => hydrate_cart(records, self.catalog.as_ref()).await,
            None => Cart::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;
    use crate::repositories::InMemoryProductRepository;
    use rust_decimal_macros::dec;

    fn test_catalog() -> Arc<InMemoryProductRepository> {
        Arc::new(InMemoryProductRepository::new(vec![
            Product::new(1, "Wireless Earbuds", dec!(99.99), "Earbuds", "a.jpg"),
            Product::new(2, "Smart Watch", dec!(199.99), "Watch", "b.jpg"),
        ]))
    }

    fn test_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(Product::new(1, "Wireless Earbuds", dec!(99.99), "Earbuds", "a.jpg"), 2);
        cart.add_item(Product::new(2, "Smart Watch", dec!(199.99), "Watch", "b.jpg"), 1);
        cart
    }

    #[test]
    fn test_cart_to_records() {
        let records = cart_to_records(&test_cart());

        assert_eq!(
            records,
            vec![
                CartRecord { product_id: 1, quantity: 2 },
                CartRecord { product_id: 2, quantity: 1 },
            ]
        );
    }

    #[test]
    fn test_encode_is_versioned_and_lossy() {
        let text = encode_cart(&test_cart()).unwrap();

        assert!(text.contains("\"version\":1"));
        assert!(text.contains("\"product_id\":1"));
        // product detail is deliberately not persisted
        assert!(!text.contains("Earbuds"));
        assert!(!text.contains("99.99"));
    }

    #[test]
    fn test_decode_rejects_malformed_text() {
        assert!(decode_records("not json at all").is_none());
        assert!(decode_records("{\"items\":[]}").is_none()); // missing version
    }

    #[test]
    fn test_decode_rejects_unknown_version() {
        let text = "{\"version\":99,\"items\":[{\"product_id\":1,\"quantity\":2}]}";
        assert!(decode_records(text).is_none());
    }

    #[tokio::test]
    async fn test_in_memory_round_trip() {
        let storage = InMemoryCartStorage::new(test_catalog());

        storage.save_cart(&test_cart()).await.unwrap();
        let loaded = storage.load_cart().await;

        assert_eq!(loaded.items().len(), 2);
        assert_eq!(loaded.item_quantity(1), 2);
        assert_eq!(loaded.item_quantity(2), 1);
        // products are re-hydrated from the catalog, not placeholders
        assert_eq!(loaded.total_price(), dec!(399.97));
    }

    #[tokio::test]
    async fn test_load_empty_slot_returns_empty_cart() {
        let storage = InMemoryCartStorage::new(test_catalog());

        let loaded = storage.load_cart().await;

        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_load_malformed_slot_fails_soft() {
        let storage = InMemoryCartStorage::new(test_catalog());
        storage.set_raw("][ definitely not a cart").await;

        let loaded = storage.load_cart().await;

        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_product_lines_are_skipped() {
        let storage = InMemoryCartStorage::new(test_catalog());
        storage
            .set_raw(
                "{\"version\":1,\"items\":[{\"product_id\":1,\"quantity\":2},{\"product_id\":777,\"quantity\":5}]}",
            )
            .await;

        let loaded = storage.load_cart().await;

        assert_eq!(loaded.items().len(), 1);
        assert_eq!(loaded.item_quantity(1), 2);
        assert!(!loaded.contains_item(777));
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_state() {
        let storage = InMemoryCartStorage::new(test_catalog());

        storage.save_cart(&test_cart()).await.unwrap();
        storage.save_cart(&Cart::new()).await.unwrap();

        assert!(storage.load_cart().await.is_empty());
    }
}
