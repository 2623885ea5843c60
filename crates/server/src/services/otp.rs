//! One-time code issuance and verification.
//!
//! Issuance writes the record before attempting delivery, so a code can be
//! valid even when the email never arrived. That is deliberate: the failure
//! is reported to the caller, the record is not rolled back, and the caller
//! re-issues if needed.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use thiserror::Error;

use beauty_queen_core::{Email, EmailError as EmailParseError, OtpPurpose};

use crate::db::{OtpRepository, RepositoryError};
use crate::models::OtpRecord;
use crate::services::email::{EmailError, EmailService};

/// How long a code is accepted after issuance.
const OTP_TTL_MINUTES: i64 = 5;

/// How long records are kept before the sweep removes them, used or not.
const OTP_RETENTION_MINUTES: i64 = 10;

/// Errors that can occur during OTP operations.
#[derive(Debug, Error)]
pub enum OtpError {
    /// Malformed email address.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailParseError),

    /// SMTP credentials are absent; an operator has to configure them.
    #[error("email service not configured")]
    NotConfigured,

    /// The mail provider was unreachable or the send timed out.
    #[error("failed to send code: {0}")]
    Delivery(#[from] EmailError),

    /// No matching unused, unexpired code.
    #[error("invalid or expired OTP")]
    InvalidOrExpired,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Orchestrates code generation, persistence, and delivery.
pub struct OtpService<'a> {
    otps: OtpRepository<'a>,
    mailer: Option<&'a EmailService>,
}

impl<'a> OtpService<'a> {
    /// Create a new OTP service.
    ///
    /// `mailer` is `None` when SMTP is not configured; issuance then fails
    /// with [`OtpError::NotConfigured`].
    #[must_use]
    pub const fn new(pool: &'a PgPool, mailer: Option<&'a EmailService>) -> Self {
        Self {
            otps: OtpRepository::new(pool),
            mailer,
        }
    }

    /// Issue a fresh code for (email, purpose) and email it.
    ///
    /// Any earlier unused codes for the pair are invalidated first, so only
    /// the newest code verifies. After success exactly one unused record
    /// exists for the pair.
    ///
    /// # Errors
    ///
    /// Returns `OtpError::InvalidEmail` for a malformed address,
    /// `OtpError::NotConfigured` when SMTP credentials are absent, and
    /// `OtpError::Delivery` when the send fails or times out. On a delivery
    /// error the record has already been written and stays valid.
    pub async fn issue(&self, email: &str, purpose: OtpPurpose) -> Result<OtpRecord, OtpError> {
        let email = Email::parse(email)?;

        // Refuse before touching the store: without a mailer the code could
        // never reach the user.
        let Some(mailer) = self.mailer else {
            return Err(OtpError::NotConfigured);
        };

        let code = generate_otp_code();
        let superseded = self.otps.invalidate_unused(&email, purpose).await?;
        if superseded > 0 {
            tracing::debug!(email = %email, purpose = %purpose, superseded, "Invalidated earlier codes");
        }

        let expires_at = Utc::now() + Duration::minutes(OTP_TTL_MINUTES);
        let record = self.otps.create(&email, &code, purpose, expires_at).await?;

        tracing::info!(email = %email, purpose = %purpose, "Issued OTP");

        mailer.send_otp_code(&email, &code, purpose).await?;

        Ok(record)
    }

    /// Consume a code for (email, purpose).
    ///
    /// Succeeds at most once per code: consumption is a single conditional
    /// update in the store, so a second call with the same code fails even
    /// if it races the first.
    ///
    /// # Errors
    ///
    /// Returns `OtpError::InvalidOrExpired` if no unused, unexpired code
    /// matches.
    pub async fn verify(&self, email: &str, code: &str, purpose: OtpPurpose) -> Result<(), OtpError> {
        let email = Email::parse(email)?;

        if self.otps.consume(&email, code, purpose).await? {
            tracing::info!(email = %email, purpose = %purpose, "OTP verified");
            Ok(())
        } else {
            Err(OtpError::InvalidOrExpired)
        }
    }

    /// Delete records past the retention window.
    ///
    /// # Errors
    ///
    /// Returns `OtpError::Repository` if the delete fails.
    pub async fn sweep_stale(&self) -> Result<u64, OtpError> {
        let removed = self
            .otps
            .delete_stale(Duration::minutes(OTP_RETENTION_MINUTES))
            .await?;
        Ok(removed)
    }
}

/// Generate a uniformly random 6-digit code.
#[must_use]
pub fn generate_otp_code() -> String {
    use rand::Rng;
    let code: u32 = rand::rng().random_range(100_000..1_000_000);
    code.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_otp_code_format() {
        let code = generate_otp_code();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_generate_otp_code_range() {
        for _ in 0..100 {
            let code: u32 = generate_otp_code().parse().expect("valid number");
            assert!(code >= 100_000);
            assert!(code < 1_000_000);
        }
    }

    #[test]
    fn test_generate_otp_code_varies() {
        // A constant generator would pass the range checks; make sure the
        // output actually moves.
        let first = generate_otp_code();
        let distinct = (0..50).any(|_| generate_otp_code() != first);
        assert!(distinct);
    }
}
