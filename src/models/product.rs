use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog entry referenced, not owned, by cart items.
///
/// Products are immutable once constructed; mutation happens by replacing the
/// catalog entry, never by editing an existing reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub image_url: String,
}

impl Product {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        price: Decimal,
        description: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            description: description.into(),
            image_url: image_url.into(),
        }
    }
}
