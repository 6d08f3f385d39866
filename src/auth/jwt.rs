//! Session token issuing and verification.

use crate::config::AuthConfig;
use crate::utils::error::Result;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

const ISSUER: &str = "lexfirm-rs";

/// JWT handler for session token operations
#[derive(Clone)]
pub struct JwtHandler {
    /// Encoding key for signing tokens
    encoding_key: EncodingKey,
    /// Decoding key for verifying tokens
    decoding_key: DecodingKey,
    /// JWT algorithm
    algorithm: Algorithm,
    /// Token lifetime in seconds
    expiration: u64,
}

impl std::fmt::Debug for JwtHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtHandler")
            .field("algorithm", &self.algorithm)
            .field("expiration", &self.expiration)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: Uuid,
    /// Role at issue time. Authorization always re-reads the stored role;
    /// this field only survives for diagnostics.
    pub role: String,
    /// Issued at timestamp
    pub iat: u64,
    /// Expiration timestamp
    pub exp: u64,
    /// Issuer
    pub iss: String,
}

impl JwtHandler {
    /// Create a new JWT handler from the configured secret
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            expiration: config.jwt_expiration,
        }
    }

    /// Token lifetime in seconds.
    pub fn expiration(&self) -> u64 {
        self.expiration
    }

    /// Issue a session token for a user
    pub fn issue(&self, user_id: Uuid, role: &str) -> Result<String> {
        let now = chrono::Utc::now().timestamp() as u64;
        self.issue_at(user_id, role, now)
    }

    /// Issue a token with an explicit issue time. Expiry tests drive this
    /// directly instead of sleeping.
    pub(crate) fn issue_at(&self, user_id: Uuid, role: &str, issued_at: u64) -> Result<String> {
        let claims = Claims {
            sub: user_id,
            role: role.to_string(),
            iat: issued_at,
            exp: issued_at + self.expiration,
            iss: ISSUER.to_string(),
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key)?;

        debug!("Issued session token for user: {}", user_id);
        Ok(token)
    }

    /// Verify and decode a token.
    ///
    /// Signature mismatch, malformed input and elapsed expiry all surface as
    /// the same error; callers treat any failure as unauthenticated.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[ISSUER]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            warn!("Session token verification failed: {}", e);
            e
        })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler_with_secret(secret: &str) -> JwtHandler {
        JwtHandler::new(&AuthConfig {
            jwt_secret: secret.to_string(),
            jwt_expiration: 8 * 60 * 60,
            cookie_secure: false,
        })
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let handler = handler_with_secret("0123456789abcdef0123456789abcdef");
        let user_id = Uuid::new_v4();

        let token = handler.issue(user_id, "admin").unwrap();
        let claims = handler.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.exp - claims.iat, 8 * 60 * 60);
    }

    #[test]
    fn test_expired_token_rejected() {
        let handler = handler_with_secret("0123456789abcdef0123456789abcdef");
        let user_id = Uuid::new_v4();

        // Issued nine hours ago with an eight-hour lifetime; well past the
        // validator's default leeway.
        let issued_at = chrono::Utc::now().timestamp() as u64 - 9 * 60 * 60;
        let token = handler.issue_at(user_id, "admin", issued_at).unwrap();

        assert!(handler.verify(&token).is_err());
    }

    #[test]
    fn test_token_within_lifetime_verifies() {
        let handler = handler_with_secret("0123456789abcdef0123456789abcdef");
        let user_id = Uuid::new_v4();

        let issued_at = chrono::Utc::now().timestamp() as u64 - 7 * 60 * 60;
        let token = handler.issue_at(user_id, "admin", issued_at).unwrap();

        assert!(handler.verify(&token).is_ok());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = handler_with_secret("0123456789abcdef0123456789abcdef");
        let verifier = handler_with_secret("fedcba9876543210fedcba9876543210");

        let token = issuer.issue(Uuid::new_v4(), "admin").unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_malformed_token_rejected() {
        let handler = handler_with_secret("0123456789abcdef0123456789abcdef");
        assert!(handler.verify("not-a-jwt").is_err());
        assert!(handler.verify("").is_err());
    }

    #[test]
    fn test_debug_redacts_keys() {
        let handler = handler_with_secret("0123456789abcdef0123456789abcdef");
        let rendered = format!("{:?}", handler);
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("0123456789abcdef"));
    }
}
