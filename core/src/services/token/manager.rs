//! Token manager implementation

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, Header, Validation};

use crate::domain::entities::token::{Claims, UnsignedToken, DEFAULT_TOKEN_EXPIRY_SECS};
use crate::errors::{DomainResult, TokenError};

use super::config::TokenManagerOptions;
use super::key_provider::{SigningKeyProvider, VerificationKeyProvider};

/// Manager for issuing, signing and verifying JWT bearer tokens
///
/// The manager is immutable after construction and safe to share across
/// concurrent callers (typically behind an `Arc`). Its only side effects
/// are calls into the two configured key providers.
pub struct TokenManager {
    algorithm: Algorithm,
    expiry: Duration,
    signing_key: Arc<dyn SigningKeyProvider>,
    verification_key: Arc<dyn VerificationKeyProvider>,
    validation: Validation,
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("algorithm", &self.algorithm)
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

impl TokenManager {
    /// Creates a new token manager from construction options
    ///
    /// # Arguments
    ///
    /// * `options` - Algorithm name, expiry duration and the two key
    ///   providers
    ///
    /// # Returns
    ///
    /// * `Ok(TokenManager)` - Ready manager
    /// * `Err(DomainError)` - Unknown algorithm name or a missing provider
    ///
    /// Key material is not validated here; providers may depend on
    /// late-bound external state, so key problems surface on first use.
    pub fn new(options: TokenManagerOptions) -> DomainResult<Self> {
        let algorithm: Algorithm = options.signing_algorithm.parse().map_err(|_| {
            TokenError::UnsupportedAlgorithm {
                name: options.signing_algorithm.clone(),
            }
        })?;

        let signing_key = options
            .signing_key_provider
            .ok_or(TokenError::MissingSigningKeyProvider)?;

        let verification_key = options
            .verification_key_provider
            .ok_or(TokenError::MissingVerificationKeyProvider)?;

        let expiry = if options.expiry <= Duration::zero() {
            Duration::seconds(DEFAULT_TOKEN_EXPIRY_SECS)
        } else {
            options.expiry
        };

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = true;
        validation.validate_aud = false;
        // Expiry is exact: a token is rejected the moment the current
        // time reaches `exp`, with no clock skew allowance.
        validation.leeway = 0;
        // A well-signed token without `exp` is accepted and never expires;
        // a present `exp` is always evaluated.
        validation.set_required_spec_claims(&[] as &[&str]);

        Ok(Self {
            algorithm,
            expiry,
            signing_key,
            verification_key,
            validation,
        })
    }

    /// Returns the configured signing algorithm
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Returns the effective token expiry duration
    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    /// Creates an unsigned token for a subject
    ///
    /// Claims are exactly `{sub: subject, exp: now + expiry}`; the subject
    /// is accepted as-is (an empty string is permitted, identity
    /// validation is the caller's concern).
    pub fn create_token(&self, subject: &str) -> UnsignedToken {
        tracing::debug!(subject, algorithm = ?self.algorithm, "issuing token");

        UnsignedToken::new(self.algorithm, Claims::new(subject, self.expiry))
    }

    /// Signs a token into its compact three-segment form
    ///
    /// The signing key provider is invoked exactly once per call; callers
    /// with expensive key fetches should cache inside their provider. The
    /// emitted header always declares the manager's configured algorithm.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The compact signed token
    /// * `Err(DomainError)` - Key material unavailable or incompatible
    ///   with the algorithm
    pub fn sign(&self, token: &UnsignedToken) -> DomainResult<String> {
        let key = self
            .signing_key
            .current_key()
            .map_err(|e| TokenError::SigningFailure {
                message: e.to_string(),
            })?;

        let header = Header::new(self.algorithm);

        encode(&header, &token.claims, &key).map_err(|e| {
            tracing::debug!(error = %e, "token signing failed");
            TokenError::SigningFailure {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Issues and signs a token for a subject in one step
    pub fn sign_subject(&self, subject: &str) -> DomainResult<String> {
        let token = self.create_token(subject);
        self.sign(&token)
    }

    /// Verifies a compact token and returns its claims
    ///
    /// Verification order, short-circuiting on first failure:
    /// 1. structural parse of the header segment (`MalformedToken`),
    /// 2. strict equality between the declared and the configured
    ///    algorithm (`AlgorithmMismatch`) - this runs before any key fetch
    ///    or signature check so the token's own content can never select
    ///    the verification behavior,
    /// 3. signature check with the verification key (`InvalidSignature`),
    /// 4. expiry check (`TokenExpired`).
    ///
    /// A token without an `exp` claim is treated as never expiring.
    pub fn parse_token(&self, compact: &str) -> DomainResult<Claims> {
        let header = decode_header(compact).map_err(|_| TokenError::MalformedToken)?;

        if header.alg != self.algorithm {
            tracing::warn!(
                expected = ?self.algorithm,
                found = ?header.alg,
                "rejecting token declaring a different algorithm"
            );
            return Err(TokenError::AlgorithmMismatch {
                expected: self.algorithm,
                found: header.alg,
            }
            .into());
        }

        let key = self.verification_key.current_key()?;

        let token_data = decode::<Claims>(compact, &key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "token verification failed");
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => TokenError::AlgorithmMismatch {
                    expected: self.algorithm,
                    found: header.alg,
                },
                _ => TokenError::MalformedToken,
            }
        })?;

        Ok(token_data.claims)
    }

    /// Verifies a token carried in an `Authorization` header value
    ///
    /// The value must match `Bearer <token>` exactly: case-sensitive
    /// scheme, one ASCII space.
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Same result as [`parse_token`](Self::parse_token)
    /// * `Err(DomainError)` - `MissingAuthHeader` for an empty value,
    ///   `MalformedAuthHeader` for anything not shaped `Bearer <token>`
    pub fn parse_from_header(&self, header_value: &str) -> DomainResult<Claims> {
        if header_value.is_empty() {
            return Err(TokenError::MissingAuthHeader.into());
        }

        let mut parts = header_value.splitn(2, ' ');
        match (parts.next(), parts.next()) {
            (Some("Bearer"), Some(token)) => self.parse_token(token),
            _ => Err(TokenError::MalformedAuthHeader.into()),
        }
    }
}
