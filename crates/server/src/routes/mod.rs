//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (DB ping)
//!
//! # Auth
//! POST /api/auth/send-otp           - Issue and email a one-time code
//! POST /api/auth/verify-otp         - Consume a one-time code
//! POST /api/auth/signup             - Register (requires signup code)
//! POST /api/auth/login              - Login with email/password
//! POST /api/auth/forgot-password    - Request a password reset code
//! POST /api/auth/reset-password     - Reset password (requires reset code)
//! GET  /api/auth/me                 - Current user (Bearer token)
//!
//! # Products
//! GET  /api/products                - Product listing (?category= filter)
//! GET  /api/products/{id}           - Product detail
//!
//! # Cart (Bearer token)
//! GET    /api/cart                  - Cart with product data
//! POST   /api/cart/add              - Add product / bump quantity
//! PUT    /api/cart/update/{id}      - Set line quantity
//! DELETE /api/cart/remove/{id}      - Remove a line
//! DELETE /api/cart/clear            - Empty the cart
//!
//! # Orders (Bearer token)
//! POST /api/orders/create           - Create order from cart
//! GET  /api/orders/my-orders        - Order history
//!
//! # Feedback
//! POST /api/feedback/submit         - Submit feedback (auth optional)
//! GET  /api/feedback                - List feedback (Bearer token)
//! ```

pub mod auth;
pub mod cart;
pub mod feedback;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::middleware::{api_rate_limiter, auth_rate_limiter};
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/send-otp", post(auth::send_otp))
        .route("/verify-otp", post(auth::verify_otp))
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/forgot-password", post(auth::forgot_password))
        .route("/reset-password", post(auth::reset_password))
        .route("/me", get(auth::me))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update/{item_id}", put(cart::update))
        .route("/remove/{item_id}", delete(cart::remove))
        .route("/clear", delete(cart::clear))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(orders::create))
        .route("/my-orders", get(orders::my_orders))
}

/// Create the feedback routes router.
pub fn feedback_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(feedback::index))
        .route("/submit", post(feedback::submit))
}

/// Create all API routes.
///
/// Auth endpoints sit behind the strict limiter (brute-force protection);
/// everything else shares the relaxed one.
pub fn routes() -> Router<AppState> {
    let authenticated = Router::new()
        .nest("/api/products", product_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/orders", order_routes())
        .nest("/api/feedback", feedback_routes())
        .layer(api_rate_limiter());

    let auth = Router::new()
        .nest("/api/auth", auth_routes())
        .layer(auth_rate_limiter());

    Router::new().merge(authenticated).merge(auth)
}
