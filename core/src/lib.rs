//! # TokenMgr Core
//!
//! Core token lifecycle engine for JWT-based bearer authentication.
//! This crate contains the claims entities, the token manager service
//! (issuance, signing, verification), key provider capabilities and
//! error types. It performs no I/O of its own beyond what the configured
//! key providers do; wiring into an HTTP stack belongs to the caller.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
