//! Configuration for the token manager

use std::sync::Arc;

use chrono::Duration;

use super::key_provider::{SigningKeyProvider, VerificationKeyProvider};

/// Construction options for [`TokenManager`](super::TokenManager)
///
/// Both key providers are mandatory, even for symmetric algorithms where
/// they would hand out the same secret; keeping two independent slots lets
/// symmetric and asymmetric setups share one configuration surface.
#[derive(Clone)]
pub struct TokenManagerOptions {
    /// Signing algorithm name.
    /// Possible values are HS256, HS384, HS512, RS256, RS384, RS512,
    /// PS256, PS384, PS512, ES256, ES384 and EdDSA.
    pub signing_algorithm: String,

    /// Token validity duration. Zero or negative falls back to the
    /// 1 hour default at construction time.
    pub expiry: Duration,

    /// Provider for the private/secret signing key
    pub signing_key_provider: Option<Arc<dyn SigningKeyProvider>>,

    /// Provider for the public/secret verification key
    pub verification_key_provider: Option<Arc<dyn VerificationKeyProvider>>,
}

impl Default for TokenManagerOptions {
    fn default() -> Self {
        Self {
            signing_algorithm: "HS256".to_string(),
            expiry: Duration::zero(),
            signing_key_provider: None,
            verification_key_provider: None,
        }
    }
}

impl std::fmt::Debug for TokenManagerOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManagerOptions")
            .field("signing_algorithm", &self.signing_algorithm)
            .field("expiry", &self.expiry)
            .field(
                "signing_key_provider",
                &self.signing_key_provider.as_ref().map(|_| "<provider>"),
            )
            .field(
                "verification_key_provider",
                &self.verification_key_provider.as_ref().map(|_| "<provider>"),
            )
            .finish()
    }
}
