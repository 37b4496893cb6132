//! Token-specific error types
//!
//! Every failure path of the token lifecycle maps to a distinct variant so
//! callers can tell configuration mistakes (fatal at construction) apart
//! from rejected tokens (typically a 401) and malformed requests
//! (typically a 400).

use jsonwebtoken::Algorithm;
use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Unsupported signing algorithm: {name}")]
    UnsupportedAlgorithm { name: String },

    #[error("Signing key provider required")]
    MissingSigningKeyProvider,

    #[error("Verification key provider required")]
    MissingVerificationKeyProvider,

    #[error("Signing failed: {message}")]
    SigningFailure { message: String },

    #[error("Key material unavailable: {message}")]
    KeyLoadError { message: String },

    #[error("Malformed token")]
    MalformedToken,

    #[error("Authorization header empty")]
    MissingAuthHeader,

    #[error("Invalid authorization header")]
    MalformedAuthHeader,

    #[error("Algorithm mismatch: expected {expected:?}, found {found:?}")]
    AlgorithmMismatch {
        expected: Algorithm,
        found: Algorithm,
    },

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token expired")]
    TokenExpired,
}
