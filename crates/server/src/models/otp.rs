//! One-time code record.

use chrono::{DateTime, Utc};

use beauty_queen_core::{Email, OtpId, OtpPurpose};

/// A one-time email verification code.
///
/// Lifecycle: `Issued(unused)` → `Used` (consumed by verification, or
/// superseded when a newer code is issued for the same email and purpose) or
/// `Issued(unused)` → `Expired` (by time, then removed by the retention
/// sweep). No transition returns a record to `Issued`.
#[derive(Debug, Clone)]
pub struct OtpRecord {
    /// Unique identifier.
    pub id: OtpId,
    /// Address the code was sent to (lowercased).
    pub email: Email,
    /// The 6-digit code.
    pub code: String,
    /// What the code authorizes.
    pub purpose: OtpPurpose,
    /// Whether the code has been consumed or superseded.
    pub used: bool,
    /// When the code stops being accepted.
    pub expires_at: DateTime<Utc>,
    /// When the code was issued.
    pub created_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Returns true if this code has been consumed or superseded.
    #[must_use]
    pub const fn is_used(&self) -> bool {
        self.used
    }

    /// Returns true if this code has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Returns true if this code can still be consumed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.is_used() && !self.is_expired()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn record(used: bool, expires_at: DateTime<Utc>) -> OtpRecord {
        OtpRecord {
            id: OtpId::new(1),
            email: Email::parse("a@b.com").unwrap(),
            code: "123456".to_owned(),
            purpose: OtpPurpose::Signup,
            used,
            expires_at,
            created_at: expires_at - Duration::minutes(5),
        }
    }

    #[test]
    fn test_fresh_record_is_valid() {
        let r = record(false, Utc::now() + Duration::minutes(5));
        assert!(!r.is_used());
        assert!(!r.is_expired());
        assert!(r.is_valid());
    }

    #[test]
    fn test_used_record_is_invalid() {
        let r = record(true, Utc::now() + Duration::minutes(5));
        assert!(r.is_used());
        assert!(!r.is_valid());
    }

    #[test]
    fn test_expired_record_is_invalid() {
        // Simulates the clock reaching issuance + 5 minutes.
        let r = record(false, Utc::now() - Duration::seconds(1));
        assert!(r.is_expired());
        assert!(!r.is_valid());
    }
}
