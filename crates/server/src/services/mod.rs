//! Application services.

pub mod auth;
pub mod email;
pub mod otp;
pub mod token;

pub use auth::{AuthError, AuthService};
pub use email::{EmailError, EmailService};
pub use otp::{OtpError, OtpService, generate_otp_code};
pub use token::{TokenError, TokenService};
