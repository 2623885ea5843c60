//! OTP purpose type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The context a one-time code was issued for.
///
/// A code is only valid for the purpose it was issued under: a signup code
/// cannot reset a password and vice versa. Unknown purposes are rejected at
/// the API boundary; adding a purpose is an enum variant plus a wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "otp_purpose", rename_all = "kebab-case")
)]
#[serde(rename_all = "kebab-case")]
pub enum OtpPurpose {
    /// Proving control of the address during account creation.
    Signup,
    /// Authorizing a password reset for an existing account.
    PasswordReset,
}

/// Error returned when parsing an unknown purpose string.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown otp purpose: {0}")]
pub struct ParsePurposeError(pub String);

impl OtpPurpose {
    /// Wire representation, matching the serde encoding.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::PasswordReset => "password-reset",
        }
    }
}

impl fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OtpPurpose {
    type Err = ParsePurposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signup" => Ok(Self::Signup),
            "password-reset" => Ok(Self::PasswordReset),
            other => Err(ParsePurposeError(other.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values() {
        assert_eq!(OtpPurpose::Signup.as_str(), "signup");
        assert_eq!(OtpPurpose::PasswordReset.as_str(), "password-reset");
    }

    #[test]
    fn test_from_str_roundtrip() {
        for purpose in [OtpPurpose::Signup, OtpPurpose::PasswordReset] {
            assert_eq!(purpose.as_str().parse::<OtpPurpose>().unwrap(), purpose);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("login".parse::<OtpPurpose>().is_err());
        assert!("forgot-password".parse::<OtpPurpose>().is_err());
    }

    #[test]
    fn test_serde_matches_wire_values() {
        let json = serde_json::to_string(&OtpPurpose::PasswordReset).unwrap();
        assert_eq!(json, "\"password-reset\"");
        let parsed: OtpPurpose = serde_json::from_str("\"signup\"").unwrap();
        assert_eq!(parsed, OtpPurpose::Signup);
    }
}
