//! Feedback route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use beauty_queen_core::Email;

use crate::db::FeedbackRepository;
use crate::error::{AppError, Result};
use crate::middleware::{OptionalUser, RequireUser};
use crate::models::Feedback;
use crate::state::AppState;

/// Feedback submission form.
#[derive(Debug, Deserialize)]
pub struct SubmitFeedbackRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub rating: Option<i32>,
}

/// Generic success response.
#[derive(Debug, Serialize)]
pub struct FeedbackMessageResponse {
    pub success: bool,
    pub message: String,
}

/// Response carrying all feedback entries.
#[derive(Debug, Serialize)]
pub struct FeedbackListResponse {
    pub success: bool,
    pub feedbacks: Vec<Feedback>,
}

/// Submit feedback. Works without a token; a valid token associates the
/// submission with the account.
///
/// POST /api/feedback/submit
#[instrument(skip_all, fields(email = %req.email))]
pub async fn submit(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Json(req): Json<SubmitFeedbackRequest>,
) -> Result<Json<FeedbackMessageResponse>> {
    let name = req.name.trim();
    let subject = req.subject.trim();
    let message = req.message.trim();

    if name.is_empty() || subject.is_empty() || message.is_empty() {
        return Err(AppError::BadRequest("All fields are required".to_owned()));
    }

    let email = Email::parse(req.email.trim())
        .map_err(|_| AppError::BadRequest("Invalid email format".to_owned()))?;

    if let Some(rating) = req.rating
        && !(1..=5).contains(&rating)
    {
        return Err(AppError::BadRequest(
            "Rating must be between 1 and 5".to_owned(),
        ));
    }

    FeedbackRepository::new(state.pool())
        .create(
            user.map(|u| u.id),
            name,
            &email,
            subject,
            message,
            req.rating,
        )
        .await?;

    Ok(Json(FeedbackMessageResponse {
        success: true,
        message: "Feedback submitted successfully".to_owned(),
    }))
}

/// List all feedback, newest first.
///
/// GET /api/feedback
pub async fn index(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
) -> Result<Json<FeedbackListResponse>> {
    let feedbacks = FeedbackRepository::new(state.pool()).list_all().await?;

    Ok(Json(FeedbackListResponse {
        success: true,
        feedbacks,
    }))
}
