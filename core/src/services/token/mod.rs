//! Token service module for JWT management
//!
//! This module handles the full token lifecycle:
//! - Manager configuration and validation
//! - Token issuance with standard claims
//! - JWT signing via pluggable key providers
//! - Verification with strict algorithm pinning

mod config;
mod key_provider;
mod manager;

#[cfg(test)]
mod tests;

pub use config::TokenManagerOptions;
pub use key_provider::{
    PemFileSigningKey, PemFileVerificationKey, SecretKeyProvider, SigningKeyProvider,
    StaticSigningKey, StaticVerificationKey, VerificationKeyProvider,
};
pub use manager::TokenManager;
