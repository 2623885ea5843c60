//! Product route handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use beauty_queen_core::ProductId;

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::Product;
use crate::state::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
}

/// Response for the product listing.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub success: bool,
    pub products: Vec<Product>,
}

/// Response for a single product.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub success: bool,
    pub product: Product,
}

/// List products, optionally filtered by category.
///
/// GET /api/products?category=...
///
/// Listings are cached briefly; the catalog changes rarely and this endpoint
/// takes the bulk of the traffic.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ProductListResponse>> {
    let cache_key = query.category.clone().unwrap_or_else(|| "*".to_owned());

    if let Some(cached) = state.product_cache().get(&cache_key).await {
        return Ok(Json(ProductListResponse {
            success: true,
            products: (*cached).clone(),
        }));
    }

    let products = ProductRepository::new(state.pool())
        .list(query.category.as_deref())
        .await?;

    state
        .product_cache()
        .insert(cache_key, Arc::new(products.clone()))
        .await;

    Ok(Json(ProductListResponse {
        success: true,
        products,
    }))
}

/// Get a product by ID.
///
/// GET /api/products/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductResponse>> {
    let product = ProductRepository::new(state.pool())
        .get_by_id(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;

    Ok(Json(ProductResponse {
        success: true,
        product,
    }))
}
