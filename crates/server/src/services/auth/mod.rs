//! Authentication service.
//!
//! Gates signup and password reset behind one-time email codes and issues
//! stateless session tokens on success.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use beauty_queen_core::{Email, OtpPurpose, UserId};

use crate::db::users::UserRepository;
use crate::models::User;
use crate::services::email::EmailService;
use crate::services::otp::OtpService;
use crate::services::token::TokenService;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Authentication service.
///
/// Handles OTP-gated registration, login, and password reset.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    otp: OtpService<'a>,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(
        pool: &'a PgPool,
        mailer: Option<&'a EmailService>,
        tokens: &'a TokenService,
    ) -> Self {
        Self {
            users: UserRepository::new(pool),
            otp: OtpService::new(pool, mailer),
            tokens,
        }
    }

    /// Access the underlying OTP service (send-otp / verify-otp endpoints).
    #[must_use]
    pub const fn otp(&self) -> &OtpService<'a> {
        &self.otp
    }

    /// Register a new user after verifying the signup code.
    ///
    /// Consumes the code, checks the email is unregistered, hashes the
    /// password, creates the user, and signs a session token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Otp` with `InvalidOrExpired` when the code does
    /// not match, `AuthError::WeakPassword` for short passwords, and
    /// `AuthError::UserAlreadyExists` if the email is registered.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        phone: Option<&str>,
        code: &str,
    ) -> Result<(User, String), AuthError> {
        let parsed_email = Email::parse(email)?;
        validate_password(password)?;

        // Single-use: a code that passes here is spent and cannot gate a
        // second signup attempt.
        self.otp
            .verify(parsed_email.as_str(), code, OtpPurpose::Signup)
            .await?;

        if self.users.exists(&parsed_email).await? {
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(&parsed_email, &password_hash, name, phone)
            .await
            .map_err(|e| match e {
                crate::db::RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        let token = self.tokens.sign(user.id)?;

        tracing::info!(user_id = %user.id, "New user registered");

        Ok((user, token))
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is
    /// wrong; the same error covers unknown addresses.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AuthError> {
        let email = Email::parse(email)?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        let token = self.tokens.sign(user.id)?;

        Ok((user, token))
    }

    /// Start a password reset: issue a code if the account exists.
    ///
    /// Deliberately does not reveal whether the email is registered; for an
    /// unknown address nothing is issued or sent and the call still
    /// succeeds. Callers respond with the same generic envelope either way.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` for malformed input and
    /// `AuthError::Otp` when issuance fails for a registered address.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let parsed_email = Email::parse(email)?;

        if self.users.exists(&parsed_email).await? {
            self.otp
                .issue(parsed_email.as_str(), OtpPurpose::PasswordReset)
                .await?;
        }

        Ok(())
    }

    /// Complete a password reset after verifying the code.
    ///
    /// The length check runs before any store access.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::WeakPassword` for short passwords,
    /// `AuthError::Otp` with `InvalidOrExpired` for a bad code, and
    /// `AuthError::UserNotFound` if the account vanished since issuance.
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        validate_password(new_password)?;

        let parsed_email = Email::parse(email)?;

        self.otp
            .verify(parsed_email.as_str(), code, OtpPurpose::PasswordReset)
            .await?;

        let password_hash = hash_password(new_password)?;

        self.users
            .update_password(&parsed_email, &password_hash)
            .await
            .map_err(|e| match e {
                crate::db::RepositoryError::NotFound => AuthError::UserNotFound,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(email = %parsed_email, "Password reset completed");

        Ok(())
    }

    /// Resolve a session token to its user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Token` for a bad token and
    /// `AuthError::UserNotFound` if the user no longer exists.
    pub async fn current_user(&self, token: &str) -> Result<User, AuthError> {
        let user_id = self.tokens.verify(token)?;
        self.get_user(user_id).await
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the user doesn't exist.
    pub async fn get_user(&self, user_id: UserId) -> Result<User, AuthError> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password_too_short() {
        assert!(matches!(
            validate_password("12345"),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[test]
    fn test_validate_password_minimum_length() {
        assert!(validate_password("123456").is_ok());
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("hunter2!").unwrap();
        assert!(verify_password("hunter2!", &hash).is_ok());
    }

    #[test]
    fn test_verify_wrong_password() {
        let hash = hash_password("hunter2!").unwrap();
        assert!(matches!(
            verify_password("hunter3!", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_garbage_hash() {
        assert!(matches!(
            verify_password("hunter2!", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("hunter2!").unwrap();
        let b = hash_password("hunter2!").unwrap();
        assert_ne!(a, b);
    }
}
