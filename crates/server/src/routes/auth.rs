//! Authentication route handlers.
//!
//! The OTP code travels exclusively over email: no response here ever
//! contains it, so a client can never self-verify.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use beauty_queen_core::OtpPurpose;

use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::User;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Generic success response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    fn ok(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
        })
    }
}

/// Success response carrying a session token and the user.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub user: User,
}

/// Parse a wire purpose string, defaulting to signup like the clients do.
fn parse_purpose(purpose: Option<&str>) -> Result<OtpPurpose> {
    match purpose {
        None => Ok(OtpPurpose::Signup),
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::BadRequest(format!("Unknown OTP purpose: {raw}"))),
    }
}

// =============================================================================
// Send / Verify OTP
// =============================================================================

/// Request to send a one-time code.
#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    pub email: String,
    pub purpose: Option<String>,
}

/// Issue a one-time code and email it.
///
/// POST /api/auth/send-otp
#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn send_otp(
    State(state): State<AppState>,
    Json(req): Json<SendOtpRequest>,
) -> Result<Json<MessageResponse>> {
    let purpose = parse_purpose(req.purpose.as_deref())?;

    let auth = AuthService::new(state.pool(), state.email(), state.tokens());
    auth.otp().issue(req.email.trim(), purpose).await?;

    Ok(MessageResponse::ok("OTP sent successfully to your email"))
}

/// Request to verify a one-time code.
#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub code: String,
    pub purpose: Option<String>,
}

/// Consume a one-time code.
///
/// POST /api/auth/verify-otp
#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(req): Json<VerifyOtpRequest>,
) -> Result<Json<MessageResponse>> {
    let purpose = parse_purpose(req.purpose.as_deref())?;

    let auth = AuthService::new(state.pool(), state.email(), state.tokens());
    auth.otp()
        .verify(req.email.trim(), req.code.trim(), purpose)
        .await?;

    Ok(MessageResponse::ok("OTP verified successfully"))
}

// =============================================================================
// Signup / Login
// =============================================================================

/// Request to register an account.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub code: String,
}

/// Register a new user. Requires a previously issued signup code.
///
/// POST /api/auth/signup
#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<AuthResponse>> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name is required".to_owned()));
    }

    let auth = AuthService::new(state.pool(), state.email(), state.tokens());
    let (user, token) = auth
        .signup(
            name,
            req.email.trim(),
            &req.password,
            req.phone.as_deref(),
            req.code.trim(),
        )
        .await?;

    Ok(Json(AuthResponse {
        success: true,
        message: "User created successfully".to_owned(),
        token,
        user,
    }))
}

/// Request to login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login with email and password.
///
/// POST /api/auth/login
#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let auth = AuthService::new(state.pool(), state.email(), state.tokens());
    let (user, token) = auth.login(req.email.trim(), &req.password).await?;

    Ok(Json(AuthResponse {
        success: true,
        message: "Login successful".to_owned(),
        token,
        user,
    }))
}

// =============================================================================
// Password Reset
// =============================================================================

/// Request to start a password reset.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Request a password reset code.
///
/// POST /api/auth/forgot-password
///
/// The response is identical whether or not the address is registered, so
/// this endpoint cannot be used to enumerate accounts.
#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>> {
    let auth = AuthService::new(state.pool(), state.email(), state.tokens());
    auth.request_password_reset(req.email.trim()).await?;

    Ok(MessageResponse::ok(
        "If an account exists with this email, an OTP has been sent",
    ))
}

/// Request to complete a password reset.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

/// Reset the password. Requires a previously issued reset code.
///
/// POST /api/auth/reset-password
#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>> {
    let auth = AuthService::new(state.pool(), state.email(), state.tokens());
    auth.reset_password(req.email.trim(), req.code.trim(), &req.new_password)
        .await?;

    Ok(MessageResponse::ok("Password reset successfully"))
}

// =============================================================================
// Current User
// =============================================================================

/// Response carrying the current user.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub success: bool,
    pub user: User,
}

/// Get the authenticated user.
///
/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    RequireUser(current): RequireUser,
) -> Result<Json<MeResponse>> {
    let auth = AuthService::new(state.pool(), state.email(), state.tokens());
    let user = auth.get_user(current.id).await?;

    Ok(Json(MeResponse {
        success: true,
        user,
    }))
}
