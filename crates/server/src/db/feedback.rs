//! Feedback repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use beauty_queen_core::{Email, FeedbackId, FeedbackStatus, UserId};

use super::RepositoryError;
use crate::models::Feedback;

/// Internal row type for database queries.
#[derive(Debug, sqlx::FromRow)]
struct FeedbackRow {
    id: i32,
    user_id: Option<i32>,
    name: String,
    email: String,
    subject: String,
    message: String,
    rating: Option<i32>,
    status: FeedbackStatus,
    created_at: DateTime<Utc>,
}

impl TryFrom<FeedbackRow> for Feedback {
    type Error = RepositoryError;

    fn try_from(row: FeedbackRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: FeedbackId::new(row.id),
            user_id: row.user_id.map(UserId::new),
            name: row.name,
            email,
            subject: row.subject,
            message: row.message,
            rating: row.rating,
            status: row.status,
            created_at: row.created_at,
        })
    }
}

/// Repository for feedback database operations.
pub struct FeedbackRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FeedbackRepository<'a> {
    /// Create a new feedback repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a feedback submission.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        user_id: Option<UserId>,
        name: &str,
        email: &Email,
        subject: &str,
        message: &str,
        rating: Option<i32>,
    ) -> Result<Feedback, RepositoryError> {
        let row = sqlx::query_as::<_, FeedbackRow>(
            r"
            INSERT INTO feedback (user_id, name, email, subject, message, rating)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, name, email, subject, message, rating, status, created_at
            ",
        )
        .bind(user_id)
        .bind(name)
        .bind(email)
        .bind(subject)
        .bind(message)
        .bind(rating)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// List all feedback, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Feedback>, RepositoryError> {
        let rows = sqlx::query_as::<_, FeedbackRow>(
            r"
            SELECT id, user_id, name, email, subject, message, rating, status, created_at
            FROM feedback
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
