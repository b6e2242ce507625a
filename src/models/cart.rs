use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Product;

/// Shopping cart for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Individual line in a shopping cart: a product snapshot plus quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

impl Cart {
    /// Create a new empty cart
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a product to the cart, or increment its quantity if a line with the
    /// same product id already exists. New products are appended, so insertion
    /// order is preserved for surviving lines.
    ///
    /// A `quantity` of 0 is a no-op: a line can never exist with quantity 0.
    pub fn add_item(&mut self, product: Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(existing_item) = self
            .items
            .iter_mut()
            .find(|item| item.product.id == product.id)
        {
            existing_item.quantity += quantity;
        } else {
            self.items.push(CartItem::new(product, quantity));
        }
        self.updated_at = Utc::now();
    }

    /// Decrement the matching line's quantity by exactly 1, removing the line
    /// entirely when it reaches 0. Unknown product ids are a silent no-op.
    pub fn remove_item(&mut self, product_id: u32) {
        if let Some(index) = self
            .items
            .iter()
            .position(|item| item.product.id == product_id)
        {
            if self.items[index].quantity > 1 {
                self.items[index].quantity -= 1;
            } else {
                self.items.remove(index);
            }
            self.updated_at = Utc::now();
        }
    }

    /// Clear all items from the cart
    pub fn clear(&mut self) {
        self.items.clear();
        self.updated_at = Utc::now();
    }

    /// Get the current items. The borrow is immutable; callers cannot reach
    /// the cart's internal state through it.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Get the total number of items in the cart
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Get the total price of all items in the cart
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(|item| item.total_price()).sum()
    }

    /// Check if the cart is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a specific line from the cart
    pub fn get_item(&self, product_id: u32) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product.id == product_id)
    }

    /// Check if a specific product is in the cart
    pub fn contains_item(&self, product_id: u32) -> bool {
        self.items.iter().any(|item| item.product.id == product_id)
    }

    /// Get the quantity of a specific product in the cart
    pub fn item_quantity(&self, product_id: u32) -> u32 {
        self.get_item(product_id)
            .map(|item| item.quantity)
            .unwrap_or(0)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl CartItem {
    /// Create a new cart line
    pub fn new(product: Product, quantity: u32) -> Self {
        Self {
            product,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Get the total price for this line (price * quantity)
    pub fn total_price(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}
