//! Order route handlers. All of these require a Bearer token.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use beauty_queen_core::PaymentMethod;

use crate::db::{CartRepository, OrderRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::{Order, ShippingAddress};
use crate::state::AppState;

/// Request to create an order from the current cart.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub shipping_address: ShippingAddress,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

/// Response carrying the created order.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub success: bool,
    pub order: Order,
}

/// Response carrying the user's order history.
#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub success: bool,
    pub orders: Vec<Order>,
}

/// Create an order from the cart and clear it.
///
/// POST /api/orders/create
///
/// The total is computed from current catalog prices; each line snapshots
/// its unit price into the order.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(req): Json<CreateOrderRequest>,
) -> Result<Json<OrderResponse>> {
    let shipping = &req.shipping_address;
    if shipping.name.trim().is_empty() || shipping.address.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Shipping name and address are required".to_owned(),
        ));
    }

    let lines = CartRepository::new(state.pool())
        .items_for_user(user.id)
        .await?;

    if lines.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".to_owned()));
    }

    let order = OrderRepository::new(state.pool())
        .create_from_cart(user.id, &lines, shipping, req.payment_method)
        .await?;

    tracing::info!(order_id = %order.id, total = %order.total_amount.display(), "Order placed");

    Ok(Json(OrderResponse {
        success: true,
        order,
    }))
}

/// List the user's orders, newest first.
///
/// GET /api/orders/my-orders
pub async fn my_orders(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<OrderListResponse>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(Json(OrderListResponse {
        success: true,
        orders,
    }))
}
