//! Cart route handlers. All of these require a Bearer token.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use beauty_queen_core::{CartItemId, ProductId};

use crate::db::{CartRepository, ProductRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::CartLine;
use crate::state::AppState;

/// Response carrying the full cart.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub success: bool,
    pub cart: Vec<CartLine>,
}

/// Generic success response.
#[derive(Debug, Serialize)]
pub struct CartMessageResponse {
    pub success: bool,
    pub message: String,
}

async fn cart_response(state: &AppState, user_id: beauty_queen_core::UserId) -> Result<Json<CartResponse>> {
    let cart = CartRepository::new(state.pool())
        .items_for_user(user_id)
        .await?;

    Ok(Json(CartResponse {
        success: true,
        cart,
    }))
}

/// Get the cart with embedded product data.
///
/// GET /api/cart
pub async fn show(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<CartResponse>> {
    cart_response(&state, user.id).await
}

/// Request to add a product to the cart.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: i32,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

const fn default_quantity() -> i32 {
    1
}

/// Add a product to the cart, bumping the quantity if already present.
///
/// POST /api/cart/add
pub async fn add(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(req): Json<AddToCartRequest>,
) -> Result<Json<CartResponse>> {
    if req.quantity < 1 {
        return Err(AppError::BadRequest(
            "Quantity must be at least 1".to_owned(),
        ));
    }

    let product_id = ProductId::new(req.product_id);

    // Look the product up first so an unknown ID is a clean 404 instead of a
    // foreign-key error.
    ProductRepository::new(state.pool())
        .get_by_id(product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;

    CartRepository::new(state.pool())
        .add(user.id, product_id, req.quantity)
        .await?;

    cart_response(&state, user.id).await
}

/// Request to change a cart line's quantity.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub quantity: i32,
}

/// Set the quantity of a cart line.
///
/// PUT /api/cart/update/{item_id}
pub async fn update(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(item_id): Path<i32>,
    Json(req): Json<UpdateCartRequest>,
) -> Result<Json<CartResponse>> {
    if req.quantity < 1 {
        return Err(AppError::BadRequest(
            "Quantity must be at least 1".to_owned(),
        ));
    }

    CartRepository::new(state.pool())
        .update_quantity(user.id, CartItemId::new(item_id), req.quantity)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => AppError::NotFound("Item not found".to_owned()),
            other => AppError::Database(other),
        })?;

    cart_response(&state, user.id).await
}

/// Remove a cart line.
///
/// DELETE /api/cart/remove/{item_id}
pub async fn remove(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(item_id): Path<i32>,
) -> Result<Json<CartResponse>> {
    let removed = CartRepository::new(state.pool())
        .remove(user.id, CartItemId::new(item_id))
        .await?;

    if !removed {
        return Err(AppError::NotFound("Item not found".to_owned()));
    }

    cart_response(&state, user.id).await
}

/// Empty the cart.
///
/// DELETE /api/cart/clear
pub async fn clear(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<CartMessageResponse>> {
    CartRepository::new(state.pool()).clear(user.id).await?;

    Ok(Json(CartMessageResponse {
        success: true,
        message: "Cart cleared".to_owned(),
    }))
}
