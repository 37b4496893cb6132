//! Entity definitions.

pub mod token;

pub use token::{Claims, UnsignedToken, DEFAULT_TOKEN_EXPIRY_SECS};
