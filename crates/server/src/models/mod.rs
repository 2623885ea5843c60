//! Domain models mirroring the database tables.

pub mod cart;
pub mod feedback;
pub mod order;
pub mod otp;
pub mod product;
pub mod user;

pub use cart::CartLine;
pub use feedback::Feedback;
pub use order::{Order, OrderItem, ShippingAddress};
pub use otp::OtpRecord;
pub use product::Product;
pub use user::{CurrentUser, User};
