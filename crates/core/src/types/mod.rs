//! Core types for Beauty Queen.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod purpose;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use purpose::{OtpPurpose, ParsePurposeError};
pub use status::*;
