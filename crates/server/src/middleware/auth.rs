//! Authentication extractors.
//!
//! Requests authenticate with a Bearer session token. The extractor verifies
//! the signature, then loads the user so handlers never act on a deleted
//! account.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::db::users::UserRepository;
use crate::error::AppError;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Extractor that requires an authenticated user.
///
/// Rejects with a 401 envelope when the Authorization header is missing,
/// malformed, expired, or names a user that no longer exists.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireUser(user): RequireUser,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireUser(pub CurrentUser);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("No token provided".to_owned()))?;

        let user = resolve_user(state, token)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".to_owned()))?;

        Ok(Self(user))
    }
}

/// Extractor that optionally gets the current user.
///
/// Unlike `RequireUser`, this does not reject unauthenticated requests; a
/// bad or stale token simply yields `None`.
pub struct OptionalUser(pub Option<CurrentUser>);

impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = match bearer_token(parts) {
            Some(token) => resolve_user(state, token).await.ok().flatten(),
            None => None,
        };

        Ok(Self(user))
    }
}

/// Pull the Bearer token out of the Authorization header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Verify the token and load its user from the database.
async fn resolve_user(state: &AppState, token: &str) -> Result<Option<CurrentUser>, AppError> {
    let user_id = state
        .tokens()
        .verify(token)
        .map_err(|_| AppError::Unauthorized("Invalid token".to_owned()))?;

    let user = UserRepository::new(state.pool()).get_by_id(user_id).await?;

    Ok(user.map(|u| CurrentUser::from(&u)))
}
