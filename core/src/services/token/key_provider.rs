//! Key provider capabilities for JWT signing and verification
//!
//! Key material is fetched on demand through zero-argument accessors
//! rather than materialized at configuration time. Implementations are
//! free to cache, re-read from disk on every call (rotation-by-reload) or
//! delegate to hardware-backed storage; the manager treats them as black
//! boxes and imposes no timeout or caching policy of its own.

use std::fs;
use std::path::{Path, PathBuf};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};

use crate::errors::TokenError;

/// Supplies the private/secret key used for signing
pub trait SigningKeyProvider: Send + Sync {
    /// Returns the current signing key material
    fn current_key(&self) -> Result<EncodingKey, TokenError>;
}

/// Supplies the public/secret key used for verification
pub trait VerificationKeyProvider: Send + Sync {
    /// Returns the current verification key material
    fn current_key(&self) -> Result<DecodingKey, TokenError>;
}

impl<F> SigningKeyProvider for F
where
    F: Fn() -> Result<EncodingKey, TokenError> + Send + Sync,
{
    fn current_key(&self) -> Result<EncodingKey, TokenError> {
        self()
    }
}

impl<F> VerificationKeyProvider for F
where
    F: Fn() -> Result<DecodingKey, TokenError> + Send + Sync,
{
    fn current_key(&self) -> Result<DecodingKey, TokenError> {
        self()
    }
}

/// Key family implied by a signing algorithm, used to pick the right PEM
/// parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyFamily {
    Hmac,
    Rsa,
    Ec,
    Ed,
}

impl KeyFamily {
    fn of(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Self::Hmac,
            Algorithm::RS256
            | Algorithm::RS384
            | Algorithm::RS512
            | Algorithm::PS256
            | Algorithm::PS384
            | Algorithm::PS512 => Self::Rsa,
            Algorithm::ES256 | Algorithm::ES384 => Self::Ec,
            Algorithm::EdDSA => Self::Ed,
        }
    }

    fn encoding_key(self, material: &[u8]) -> Result<EncodingKey, TokenError> {
        let key = match self {
            Self::Hmac => Ok(EncodingKey::from_secret(material)),
            Self::Rsa => EncodingKey::from_rsa_pem(material),
            Self::Ec => EncodingKey::from_ec_pem(material),
            Self::Ed => EncodingKey::from_ed_pem(material),
        };

        key.map_err(|e| TokenError::KeyLoadError {
            message: format!("Invalid private key format: {}", e),
        })
    }

    fn decoding_key(self, material: &[u8]) -> Result<DecodingKey, TokenError> {
        let key = match self {
            Self::Hmac => Ok(DecodingKey::from_secret(material)),
            Self::Rsa => DecodingKey::from_rsa_pem(material),
            Self::Ec => DecodingKey::from_ec_pem(material),
            Self::Ed => DecodingKey::from_ed_pem(material),
        };

        key.map_err(|e| TokenError::KeyLoadError {
            message: format!("Invalid public key format: {}", e),
        })
    }
}

/// Symmetric secret provider for the HMAC algorithm family
///
/// Implements both provider roles, so the same instance can fill the
/// signing and verification slots.
#[derive(Clone)]
pub struct SecretKeyProvider {
    secret: Vec<u8>,
}

impl SecretKeyProvider {
    /// Creates a provider around raw secret bytes
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl std::fmt::Debug for SecretKeyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretKeyProvider").finish_non_exhaustive()
    }
}

impl SigningKeyProvider for SecretKeyProvider {
    fn current_key(&self) -> Result<EncodingKey, TokenError> {
        Ok(EncodingKey::from_secret(&self.secret))
    }
}

impl VerificationKeyProvider for SecretKeyProvider {
    fn current_key(&self) -> Result<DecodingKey, TokenError> {
        Ok(DecodingKey::from_secret(&self.secret))
    }
}

/// Signing key provider backed by a PEM file on disk
///
/// The file is re-read on every `current_key` call, so replacing it on
/// disk rotates the key without reconstructing the manager.
#[derive(Debug, Clone)]
pub struct PemFileSigningKey {
    path: PathBuf,
    family: KeyFamily,
}

impl PemFileSigningKey {
    /// Creates a provider reading the private key for `algorithm` from
    /// `path`
    pub fn new<P: AsRef<Path>>(path: P, algorithm: Algorithm) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            family: KeyFamily::of(algorithm),
        }
    }
}

impl SigningKeyProvider for PemFileSigningKey {
    fn current_key(&self) -> Result<EncodingKey, TokenError> {
        let material = fs::read(&self.path).map_err(|e| TokenError::KeyLoadError {
            message: format!("Failed to read private key {}: {}", self.path.display(), e),
        })?;

        self.family.encoding_key(&material)
    }
}

/// Verification key provider backed by a PEM file on disk
#[derive(Debug, Clone)]
pub struct PemFileVerificationKey {
    path: PathBuf,
    family: KeyFamily,
}

impl PemFileVerificationKey {
    /// Creates a provider reading the public key for `algorithm` from
    /// `path`
    pub fn new<P: AsRef<Path>>(path: P, algorithm: Algorithm) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            family: KeyFamily::of(algorithm),
        }
    }
}

impl VerificationKeyProvider for PemFileVerificationKey {
    fn current_key(&self) -> Result<DecodingKey, TokenError> {
        let material = fs::read(&self.path).map_err(|e| TokenError::KeyLoadError {
            message: format!("Failed to read public key {}: {}", self.path.display(), e),
        })?;

        self.family.decoding_key(&material)
    }
}

/// Signing key parsed once from a PEM string (useful for testing or
/// embedded keys)
#[derive(Clone)]
pub struct StaticSigningKey {
    key: EncodingKey,
}

impl StaticSigningKey {
    /// Parses a PEM-encoded private key for `algorithm`
    pub fn from_pem(pem: &str, algorithm: Algorithm) -> Result<Self, TokenError> {
        Ok(Self {
            key: KeyFamily::of(algorithm).encoding_key(pem.as_bytes())?,
        })
    }
}

impl std::fmt::Debug for StaticSigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticSigningKey").finish_non_exhaustive()
    }
}

impl SigningKeyProvider for StaticSigningKey {
    fn current_key(&self) -> Result<EncodingKey, TokenError> {
        Ok(self.key.clone())
    }
}

/// Verification key parsed once from a PEM string
#[derive(Clone)]
pub struct StaticVerificationKey {
    key: DecodingKey,
}

impl StaticVerificationKey {
    /// Parses a PEM-encoded public key for `algorithm`
    pub fn from_pem(pem: &str, algorithm: Algorithm) -> Result<Self, TokenError> {
        Ok(Self {
            key: KeyFamily::of(algorithm).decoding_key(pem.as_bytes())?,
        })
    }
}

impl std::fmt::Debug for StaticVerificationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticVerificationKey").finish_non_exhaustive()
    }
}

impl VerificationKeyProvider for StaticVerificationKey {
    fn current_key(&self) -> Result<DecodingKey, TokenError> {
        Ok(self.key.clone())
    }
}
