//! OTP repository for database operations.
//!
//! Single-use semantics live in the SQL here: consumption is one conditional
//! `UPDATE ... WHERE used = FALSE AND expires_at > now()`, so two concurrent
//! verification attempts for the same code can never both succeed.

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;

use beauty_queen_core::{Email, OtpId, OtpPurpose};

use super::RepositoryError;
use crate::models::OtpRecord;

/// Internal row type for database queries.
#[derive(Debug, sqlx::FromRow)]
struct OtpRow {
    id: i32,
    email: String,
    code: String,
    purpose: OtpPurpose,
    used: bool,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl TryFrom<OtpRow> for OtpRecord {
    type Error = RepositoryError;

    fn try_from(row: OtpRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: OtpId::new(row.id),
            email,
            code: row.code,
            purpose: row.purpose,
            used: row.used,
            expires_at: row.expires_at,
            created_at: row.created_at,
        })
    }
}

/// Repository for OTP database operations.
pub struct OtpRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OtpRepository<'a> {
    /// Create a new OTP repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist a freshly generated code.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        email: &Email,
        code: &str,
        purpose: OtpPurpose,
        expires_at: DateTime<Utc>,
    ) -> Result<OtpRecord, RepositoryError> {
        let row = sqlx::query_as::<_, OtpRow>(
            r"
            INSERT INTO otp_code (email, code, purpose, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, code, purpose, used, expires_at, created_at
            ",
        )
        .bind(email)
        .bind(code)
        .bind(purpose)
        .bind(expires_at)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Mark every unused code for (email, purpose) as used.
    ///
    /// Called before issuing a new code so that only the latest code is
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn invalidate_unused(
        &self,
        email: &Email,
        purpose: OtpPurpose,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE otp_code
            SET used = TRUE
            WHERE email = $1 AND purpose = $2 AND used = FALSE
            ",
        )
        .bind(email)
        .bind(purpose)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Consume a matching unused, unexpired code.
    ///
    /// Returns `true` if a code was consumed. The conditional write is the
    /// at-most-once guarantee: of any number of concurrent calls with the
    /// same code, exactly one observes `used = FALSE`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn consume(
        &self,
        email: &Email,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE otp_code
            SET used = TRUE
            WHERE email = $1 AND code = $2 AND purpose = $3
              AND used = FALSE AND expires_at > now()
            ",
        )
        .bind(email)
        .bind(code)
        .bind(purpose)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete codes older than the retention window, used or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete_stale(&self, retention: Duration) -> Result<u64, RepositoryError> {
        let cutoff = Utc::now() - retention;

        let result = sqlx::query(
            r"
            DELETE FROM otp_code
            WHERE created_at < $1
            ",
        )
        .bind(cutoff)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
