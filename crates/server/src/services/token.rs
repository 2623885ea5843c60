//! Stateless session tokens.
//!
//! Tokens are HS256 JWTs embedding the user ID and an expiry. There is no
//! server-side session table; possession of an unexpired, correctly signed
//! token is the whole credential.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use beauty_queen_core::UserId;

/// How long a session token stays valid.
const TOKEN_TTL_DAYS: i64 = 7;

/// Claims carried in a session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the user ID as a string.
    pub sub: String,
    /// Issued-at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

/// Errors that can occur when signing or verifying tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token could not be signed.
    #[error("failed to sign token")]
    Sign(#[source] jsonwebtoken::errors::Error),

    /// The token is malformed, tampered with, or expired.
    #[error("invalid or expired token")]
    Invalid,
}

/// Signs and verifies session tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    /// Create a token service from the signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let secret = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Sign a session token for a user, valid for 7 days.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Sign` if encoding fails.
    pub fn sign(&self, user_id: UserId) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(TokenError::Sign)
    }

    /// Verify a token and return the user it was issued to.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Invalid` if the token is malformed, has a bad
    /// signature, is expired, or carries a non-numeric subject.
    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|_| TokenError::Invalid)?;

        let id: i32 = data.claims.sub.parse().map_err(|_| TokenError::Invalid)?;
        Ok(UserId::new(id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service(secret: &str) -> TokenService {
        TokenService::new(&SecretString::from(secret.to_owned()))
    }

    #[test]
    fn test_sign_and_verify_roundtrip() {
        let tokens = service("k2Jd8#pQ1zR7!wXm4@nV9^bL5&cT0*uH");
        let token = tokens.sign(UserId::new(42)).unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), UserId::new(42));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let tokens = service("k2Jd8#pQ1zR7!wXm4@nV9^bL5&cT0*uH");
        assert!(matches!(
            tokens.verify("not-a-token"),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let signer = service("k2Jd8#pQ1zR7!wXm4@nV9^bL5&cT0*uH");
        let verifier = service("a different secret entirely, 32ch");

        let token = signer.sign(UserId::new(1)).unwrap();
        assert!(matches!(verifier.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn test_expiry_is_seven_days_out() {
        let tokens = service("k2Jd8#pQ1zR7!wXm4@nV9^bL5&cT0*uH");
        let token = tokens.sign(UserId::new(1)).unwrap();

        // Decode without signature verification concerns via the service's
        // own path, then inspect the window.
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret("k2Jd8#pQ1zR7!wXm4@nV9^bL5&cT0*uH".as_bytes()),
            &Validation::default(),
        )
        .unwrap();

        let lifetime = data.claims.exp - data.claims.iat;
        assert_eq!(lifetime, TOKEN_TTL_DAYS * 24 * 3600);
    }
}
