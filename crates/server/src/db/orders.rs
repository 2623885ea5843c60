//! Order repository for database operations.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use beauty_queen_core::{
    OrderId, OrderItemId, OrderStatus, PaymentMethod, PaymentStatus, Price, ProductId, UserId,
};

use super::RepositoryError;
use crate::models::product::CATALOG_CURRENCY;
use crate::models::{CartLine, Order, OrderItem, ShippingAddress};

/// Internal row type for order headers.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i32,
    user_id: i32,
    total_amount: Decimal,
    shipping_name: String,
    shipping_phone: String,
    shipping_address: String,
    shipping_city: String,
    shipping_state: String,
    shipping_pincode: String,
    payment_method: PaymentMethod,
    payment_status: PaymentStatus,
    order_status: OrderStatus,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> Order {
        Order {
            id: OrderId::new(self.id),
            user_id: UserId::new(self.user_id),
            total_amount: Price::new(self.total_amount, CATALOG_CURRENCY),
            shipping: ShippingAddress {
                name: self.shipping_name,
                phone: self.shipping_phone,
                address: self.shipping_address,
                city: self.shipping_city,
                state: self.shipping_state,
                pincode: self.shipping_pincode,
            },
            payment_method: self.payment_method,
            payment_status: self.payment_status,
            order_status: self.order_status,
            created_at: self.created_at,
            items,
        }
    }
}

/// Internal row type for order line items.
#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    id: i32,
    order_id: i32,
    product_id: i32,
    quantity: i32,
    unit_price: Decimal,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: OrderItemId::new(row.id),
            product_id: ProductId::new(row.product_id),
            quantity: row.quantity,
            unit_price: Price::new(row.unit_price, CATALOG_CURRENCY),
        }
    }
}

/// Compute an order total from cart lines at their current prices.
#[must_use]
pub fn order_total(lines: &[CartLine]) -> Price {
    lines
        .iter()
        .fold(Price::zero(CATALOG_CURRENCY), |total, line| {
            total.checked_add(&line.line_total()).unwrap_or(total)
        })
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order from the user's cart lines and clear the cart.
    ///
    /// Unit prices are snapshotted from the supplied lines. The order header,
    /// its items, and the cart clear are one transaction: either the order
    /// exists with every line and an empty cart, or nothing changed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn create_from_cart(
        &self,
        user_id: UserId,
        lines: &[CartLine],
        shipping: &ShippingAddress,
        payment_method: PaymentMethod,
    ) -> Result<Order, RepositoryError> {
        let total = order_total(lines);

        let mut tx = self.pool.begin().await?;

        let order_row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO customer_order
                (user_id, total_amount, shipping_name, shipping_phone,
                 shipping_address, shipping_city, shipping_state,
                 shipping_pincode, payment_method)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, user_id, total_amount, shipping_name, shipping_phone,
                      shipping_address, shipping_city, shipping_state,
                      shipping_pincode, payment_method, payment_status,
                      order_status, created_at
            ",
        )
        .bind(user_id)
        .bind(total.amount)
        .bind(&shipping.name)
        .bind(&shipping.phone)
        .bind(&shipping.address)
        .bind(&shipping.city)
        .bind(&shipping.state)
        .bind(&shipping.pincode)
        .bind(payment_method)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(lines.len());
        for line in lines {
            let item_row = sqlx::query_as::<_, OrderItemRow>(
                r"
                INSERT INTO order_item (order_id, product_id, quantity, unit_price)
                VALUES ($1, $2, $3, $4)
                RETURNING id, order_id, product_id, quantity, unit_price
                ",
            )
            .bind(order_row.id)
            .bind(line.product.id)
            .bind(line.quantity)
            .bind(line.product.price.amount)
            .fetch_one(&mut *tx)
            .await?;

            items.push(OrderItem::from(item_row));
        }

        sqlx::query(
            r"
            DELETE FROM cart_item
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(order_row.into_order(items))
    }

    /// List a user's orders, newest first, with their items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let order_rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, total_amount, shipping_name, shipping_phone,
                   shipping_address, shipping_city, shipping_state,
                   shipping_pincode, payment_method, payment_status,
                   order_status, created_at
            FROM customer_order
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        if order_rows.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i32> = order_rows.iter().map(|r| r.id).collect();
        let item_rows = sqlx::query_as::<_, OrderItemRow>(
            r"
            SELECT id, order_id, product_id, quantity, unit_price
            FROM order_item
            WHERE order_id = ANY($1)
            ORDER BY id ASC
            ",
        )
        .bind(&order_ids)
        .fetch_all(self.pool)
        .await?;

        let mut items_by_order: HashMap<i32, Vec<OrderItem>> = HashMap::new();
        for row in item_rows {
            items_by_order
                .entry(row.order_id)
                .or_default()
                .push(OrderItem::from(row));
        }

        Ok(order_rows
            .into_iter()
            .map(|row| {
                let items = items_by_order.remove(&row.id).unwrap_or_default();
                row.into_order(items)
            })
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use beauty_queen_core::CartItemId;
    use chrono::Utc;

    use crate::models::Product;

    use super::*;

    fn line(price_paise: i64, quantity: i32) -> CartLine {
        CartLine {
            id: CartItemId::new(1),
            product: Product {
                id: ProductId::new(1),
                name: "Kajal".to_owned(),
                description: String::new(),
                price: Price::new(Decimal::new(price_paise, 2), CATALOG_CURRENCY),
                image_url: None,
                category: "eyes".to_owned(),
                stock: 5,
                created_at: Utc::now(),
            },
            quantity,
        }
    }

    #[test]
    fn test_order_total_sums_lines() {
        let total = order_total(&[line(19_900, 2), line(49_900, 1)]);
        assert_eq!(total.amount, Decimal::new(89_700, 2));
    }

    #[test]
    fn test_order_total_empty_cart_is_zero() {
        let total = order_total(&[]);
        assert_eq!(total.amount, Decimal::ZERO);
    }
}
