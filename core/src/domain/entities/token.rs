//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};

/// Default token expiration time when none is configured (1 hour)
pub const DEFAULT_TOKEN_EXPIRY_SECS: i64 = 3600;

/// Claims structure for the JWT payload
///
/// The engine itself only mandates `sub` and `exp` on tokens it issues.
/// Both are optional on the wire so that well-signed third-party tokens
/// missing either claim still deserialize; any further claims round-trip
/// untouched through `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (caller-supplied identity)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration timestamp in epoch seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Additional claims passed through verbatim
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Claims {
    /// Creates claims for a newly issued token
    ///
    /// # Arguments
    ///
    /// * `subject` - The subject identifier (accepted as-is, may be empty)
    /// * `expiry` - Validity duration added to the current time
    ///
    /// # Returns
    ///
    /// A new `Claims` instance carrying exactly `{sub, exp}`
    pub fn new(subject: &str, expiry: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: Some(subject.to_string()),
            exp: Some((now + expiry).timestamp()),
            extra: serde_json::Map::new(),
        }
    }

    /// Checks if the claims have expired
    ///
    /// Claims without an `exp` value never expire.
    pub fn is_expired(&self) -> bool {
        match self.exp {
            Some(exp) => Utc::now().timestamp() >= exp,
            None => false,
        }
    }

    /// Returns the expiry as a UTC timestamp, if one is set and in range
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| Utc.timestamp_opt(exp, 0).single())
    }
}

/// An issued but not yet signed token
///
/// Pairs the claims with the algorithm they will be signed under. The
/// algorithm is always the issuing manager's configured one; signing never
/// honors a caller-substituted value.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsignedToken {
    /// Algorithm the token will be signed with
    pub algorithm: Algorithm,

    /// Claims to be carried in the payload
    pub claims: Claims,
}

impl UnsignedToken {
    /// Creates a new unsigned token
    pub fn new(algorithm: Algorithm, claims: Claims) -> Self {
        Self { algorithm, claims }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let claims = Claims::new("user1", Duration::seconds(DEFAULT_TOKEN_EXPIRY_SECS));

        assert_eq!(claims.sub, Some("user1".to_string()));
        assert!(claims.exp.is_some());
        assert!(claims.extra.is_empty());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_empty_subject_permitted() {
        let claims = Claims::new("", Duration::hours(1));

        assert_eq!(claims.sub, Some(String::new()));
    }

    #[test]
    fn test_claims_expiration() {
        let mut claims = Claims::new("user1", Duration::hours(1));

        // Set expiration to past
        claims.exp = Some(Utc::now().timestamp() - 1);

        assert!(claims.is_expired());
    }

    #[test]
    fn test_claims_without_exp_never_expire() {
        let mut claims = Claims::new("user1", Duration::hours(1));
        claims.exp = None;

        assert!(!claims.is_expired());
        assert!(claims.expires_at().is_none());
    }

    #[test]
    fn test_expires_at_matches_exp() {
        let claims = Claims::new("user1", Duration::hours(1));

        let at = claims.expires_at().unwrap();
        assert_eq!(at.timestamp(), claims.exp.unwrap());
    }

    #[test]
    fn test_claims_serialization() {
        let claims = Claims::new("user1", Duration::hours(1));

        let json = serde_json::to_string(&claims).unwrap();
        let deserialized: Claims = serde_json::from_str(&json).unwrap();

        assert_eq!(claims, deserialized);
    }

    #[test]
    fn test_extra_claims_pass_through() {
        let json = r#"{"sub":"user1","exp":4102444800,"role":"admin"}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();

        assert_eq!(claims.sub, Some("user1".to_string()));
        assert_eq!(
            claims.extra.get("role"),
            Some(&serde_json::Value::String("admin".to_string()))
        );

        let round_tripped = serde_json::to_value(&claims).unwrap();
        assert_eq!(round_tripped["role"], "admin");
    }

    #[test]
    fn test_missing_standard_claims_deserialize() {
        let claims: Claims = serde_json::from_str("{}").unwrap();

        assert_eq!(claims.sub, None);
        assert_eq!(claims.exp, None);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_unsigned_token_carries_algorithm() {
        let claims = Claims::new("user1", Duration::hours(1));
        let token = UnsignedToken::new(Algorithm::ES256, claims.clone());

        assert_eq!(token.algorithm, Algorithm::ES256);
        assert_eq!(token.claims, claims);
    }
}
