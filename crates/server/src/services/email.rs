//! Email service for sending OTP verification codes.
//!
//! Uses SMTP via lettre for delivery with Askama HTML templates. Sends are
//! bounded by a 15-second timeout; on timeout the request fails but any OTP
//! record written before the send stays valid.

use std::time::Duration;

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use beauty_queen_core::{Email, OtpPurpose};

use crate::config::EmailConfig;

/// Upper bound on a single SMTP send, including connection setup.
const SEND_TIMEOUT: Duration = Duration::from_secs(15);

/// HTML template for the signup verification email.
#[derive(Template)]
#[template(path = "email/otp_signup.html")]
struct SignupCodeEmailHtml<'a> {
    code: &'a str,
}

/// Plain text template for the signup verification email.
#[derive(Template)]
#[template(path = "email/otp_signup.txt")]
struct SignupCodeEmailText<'a> {
    code: &'a str,
}

/// HTML template for the password reset email.
#[derive(Template)]
#[template(path = "email/otp_password_reset.html")]
struct ResetCodeEmailHtml<'a> {
    code: &'a str,
}

/// Plain text template for the password reset email.
#[derive(Template)]
#[template(path = "email/otp_password_reset.txt")]
struct ResetCodeEmailText<'a> {
    code: &'a str,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// The send did not complete within the timeout.
    #[error("Email send timed out after {}s", SEND_TIMEOUT.as_secs())]
    Timeout,
}

/// Email service for sending transactional emails.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
        })
    }

    /// Send a one-time code to the given address.
    ///
    /// The subject and body depend on what the code authorizes. The code
    /// itself only ever travels in this email, never in an API response.
    ///
    /// # Errors
    ///
    /// Returns error if the template fails to render, the message cannot be
    /// built, the SMTP send fails, or the send exceeds the 15-second timeout.
    pub async fn send_otp_code(
        &self,
        to: &Email,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<(), EmailError> {
        let (subject, text, html) = match purpose {
            OtpPurpose::Signup => (
                "Your OTP for Beauty Queen Verification",
                SignupCodeEmailText { code }.render()?,
                SignupCodeEmailHtml { code }.render()?,
            ),
            OtpPurpose::PasswordReset => (
                "Password Reset OTP - Beauty Queen",
                ResetCodeEmailText { code }.render()?,
                ResetCodeEmailHtml { code }.render()?,
            ),
        };

        self.send_multipart_email(to.as_str(), subject, &text, &html)
            .await
    }

    /// Send a multipart email with both plain text and HTML versions.
    async fn send_multipart_email(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )?;

        match tokio::time::timeout(SEND_TIMEOUT, self.mailer.send(email)).await {
            Ok(Ok(_)) => {
                tracing::info!(to = %to, subject = %subject, "Email sent successfully");
                Ok(())
            }
            Ok(Err(e)) => Err(EmailError::Smtp(e)),
            Err(_) => {
                tracing::warn!(to = %to, "Email send timed out");
                Err(EmailError::Timeout)
            }
        }
    }
}
