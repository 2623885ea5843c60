//! Shopping cart model.

use serde::Serialize;

use beauty_queen_core::{CartItemId, Price};

use super::Product;

/// A cart line with its product data embedded, as the API returns it.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    /// Cart line identifier.
    pub id: CartItemId,
    /// The product in the cart.
    pub product: Product,
    /// Requested quantity (always > 0).
    pub quantity: i32,
}

impl CartLine {
    /// Line total: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product
            .price
            .times(u32::try_from(self.quantity).unwrap_or(0))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use beauty_queen_core::{CurrencyCode, ProductId};

    use super::*;

    #[test]
    fn test_line_total() {
        let line = CartLine {
            id: CartItemId::new(1),
            product: Product {
                id: ProductId::new(1),
                name: "Rose Lip Balm".to_owned(),
                description: String::new(),
                price: Price::new(Decimal::new(19_900, 2), CurrencyCode::INR),
                image_url: None,
                category: "lips".to_owned(),
                stock: 10,
                created_at: Utc::now(),
            },
            quantity: 2,
        };

        assert_eq!(line.line_total().amount, Decimal::new(39_800, 2));
    }
}
