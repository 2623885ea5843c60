//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::models::Product;
use crate::services::email::EmailService;
use crate::services::otp::OtpService;
use crate::services::token::TokenService;

/// How long a cached product listing stays fresh.
const PRODUCT_CACHE_TTL: Duration = Duration::from_secs(60);

/// How often the OTP retention sweep runs.
const OTP_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Error creating application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("smtp transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    tokens: TokenService,
    email: Option<EmailService>,
    product_cache: Cache<String, Arc<Vec<Product>>>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the SMTP transport cannot be configured.
    pub fn new(config: ServerConfig, pool: PgPool) -> Result<Self, StateError> {
        let tokens = TokenService::new(&config.jwt_secret);

        let email = match &config.email {
            Some(email_config) => Some(EmailService::new(email_config)?),
            None => {
                tracing::warn!("SMTP not configured - OTP issuance will fail until it is");
                None
            }
        };

        let product_cache = Cache::builder().time_to_live(PRODUCT_CACHE_TTL).build();

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                tokens,
                email,
                product_cache,
            }),
        })
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the token service.
    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }

    /// Get a reference to the email service, if SMTP is configured.
    #[must_use]
    pub fn email(&self) -> Option<&EmailService> {
        self.inner.email.as_ref()
    }

    /// Get a reference to the product listing cache.
    #[must_use]
    pub fn product_cache(&self) -> &Cache<String, Arc<Vec<Product>>> {
        &self.inner.product_cache
    }

    /// Spawn the background OTP retention sweep.
    ///
    /// Old codes are removed on a fixed cadence whether or not they were
    /// used; nobody prunes them by hand.
    pub fn start_otp_sweeper(&self) {
        let pool = self.inner.pool.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(OTP_SWEEP_INTERVAL);
            // First tick fires immediately; skip it so startup isn't racing
            // migrations in dev.
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let otps = OtpService::new(&pool, None);
                match otps.sweep_stale().await {
                    Ok(0) => {}
                    Ok(removed) => {
                        tracing::debug!(removed, "Swept stale OTP codes");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "OTP sweep failed");
                    }
                }
            }
        });
    }
}
