//! Product catalog model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use beauty_queen_core::{CurrencyCode, Price, ProductId};

/// The currency the catalog is priced in. Stored amounts are plain NUMERIC;
/// the currency is attached when rows are loaded.
pub const CATALOG_CURRENCY: CurrencyCode = CurrencyCode::INR;

/// A catalog product.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Unique identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Optional image URL.
    pub image_url: Option<String>,
    /// Category slug used for listing filters.
    pub category: String,
    /// Units in stock.
    pub stock: i32,
    /// When the product was added.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns true if at least one unit is available.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
