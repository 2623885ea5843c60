//! Customer feedback model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use beauty_queen_core::{Email, FeedbackId, FeedbackStatus, UserId};

/// A feedback submission. `user_id` is present when the submitter was
/// logged in.
#[derive(Debug, Clone, Serialize)]
pub struct Feedback {
    pub id: FeedbackId,
    pub user_id: Option<UserId>,
    pub name: String,
    pub email: Email,
    pub subject: String,
    pub message: String,
    pub rating: Option<i32>,
    pub status: FeedbackStatus,
    pub created_at: DateTime<Utc>,
}
