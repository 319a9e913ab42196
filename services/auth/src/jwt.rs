//! Session token issuing and verification
//!
//! Session tokens are HS256 JWTs signed with a shared secret. They embed the
//! user's identity and email and stay valid for one week by default. Nothing
//! about a session is stored server side: a token is trusted as long as its
//! signature checks out and it has not expired.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::error::AuthError;

/// One week, in seconds
pub const DEFAULT_TOKEN_EXPIRY: u64 = 604_800;

/// Longest accepted token lifetime: one hundred years, in seconds
pub const MAX_TOKEN_EXPIRY: u64 = 100 * 365 * 24 * 60 * 60;

/// Token configuration
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Shared secret used to sign and verify tokens
    pub secret: String,
    /// Token lifetime in seconds (default: 7 days)
    pub expiry: u64,
}

impl TokenConfig {
    /// Create a new TokenConfig from environment variables
    ///
    /// # Environment Variables
    /// - `TOKEN_SECRET`: Shared signing secret (required)
    /// - `TOKEN_EXPIRY`: Token lifetime in seconds (default: 604800)
    pub fn from_env() -> Result<Self, AuthError> {
        let secret = std::env::var("TOKEN_SECRET").map_err(|_| {
            AuthError::Configuration("TOKEN_SECRET environment variable not set".to_string())
        })?;

        if secret.trim().is_empty() {
            return Err(AuthError::Configuration(
                "TOKEN_SECRET must not be empty".to_string(),
            ));
        }

        let expiry = match std::env::var("TOKEN_EXPIRY") {
            Ok(value) => value.trim().parse::<u64>().map_err(|_| {
                AuthError::Configuration(format!(
                    "TOKEN_EXPIRY must be a number of seconds, got {:?}",
                    value
                ))
            })?,
            Err(_) => DEFAULT_TOKEN_EXPIRY,
        };

        if expiry == 0 || expiry > MAX_TOKEN_EXPIRY {
            return Err(AuthError::Configuration(format!(
                "TOKEN_EXPIRY must be between 1 and {} seconds",
                MAX_TOKEN_EXPIRY
            )));
        }

        Ok(TokenConfig { secret, expiry })
    }
}

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Identity of the user the token was issued to
    pub user_id: Uuid,
    /// Email the user logged in with
    pub email: String,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry: u64,
}

impl TokenService {
    /// Initialize a new token service
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        TokenService {
            encoding_key,
            decoding_key,
            validation,
            expiry: config.expiry,
        }
    }

    /// Issue a token for a user, valid for the configured lifetime
    pub fn issue_token(&self, user_id: Uuid, email: &str) -> Result<String, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AuthError::Internal(format!("Failed to get current time: {}", e)))?
            .as_secs();

        let exp = now.checked_add(self.expiry).ok_or_else(|| {
            AuthError::Internal(format!(
                "Token expiry of {} seconds overflows the expiration time",
                self.expiry
            ))
        })?;

        let claims = Claims {
            user_id,
            email: email.to_string(),
            iat: now,
            exp,
        };

        self.sign(&claims)
    }

    /// Verify a token's signature and expiry and return its claims
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn service(secret: &str) -> TokenService {
        TokenService::new(TokenConfig {
            secret: secret.to_string(),
            expiry: DEFAULT_TOKEN_EXPIRY,
        })
    }

    #[test]
    fn test_issued_token_round_trips_identity() {
        let tokens = service("test-secret");
        let user_id = Uuid::new_v4();

        let token = tokens.issue_token(user_id, "jane@example.com").unwrap();
        let claims = tokens.verify_token(&token).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.email, "jane@example.com");
        assert_eq!(claims.exp - claims.iat, DEFAULT_TOKEN_EXPIRY);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let token = service("secret-a")
            .issue_token(Uuid::new_v4(), "jane@example.com")
            .unwrap();

        let err = service("secret-b").verify_token(&token).unwrap_err();
        assert!(err.to_string().contains("InvalidSignature"), "{}", err);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let tokens = service("test-secret");
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let claims = Claims {
            user_id: Uuid::new_v4(),
            email: "jane@example.com".to_string(),
            iat: now - 2 * DEFAULT_TOKEN_EXPIRY,
            exp: now - DEFAULT_TOKEN_EXPIRY,
        };
        let token = tokens.sign(&claims).unwrap();

        let err = tokens.verify_token(&token).unwrap_err();
        assert!(err.to_string().contains("ExpiredSignature"), "{}", err);
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let err = service("test-secret").verify_token("not-a-token").unwrap_err();
        assert!(matches!(err, AuthError::Token(_)));
    }

    #[test]
    #[serial]
    fn test_token_config_from_env() {
        unsafe {
            std::env::set_var("TOKEN_SECRET", "from-env");
            std::env::remove_var("TOKEN_EXPIRY");
        }

        let config = TokenConfig::from_env().unwrap();
        assert_eq!(config.secret, "from-env");
        assert_eq!(config.expiry, DEFAULT_TOKEN_EXPIRY);

        unsafe {
            std::env::remove_var("TOKEN_SECRET");
        }
    }

    #[test]
    fn test_overflowing_expiry_fails_instead_of_wrapping() {
        let tokens = TokenService::new(TokenConfig {
            secret: "test-secret".to_string(),
            expiry: u64::MAX,
        });

        let err = tokens
            .issue_token(Uuid::new_v4(), "jane@example.com")
            .unwrap_err();
        assert!(matches!(err, AuthError::Internal(_)), "{}", err);
    }

    #[test]
    #[serial]
    fn test_token_config_rejects_unusable_expiry() {
        let too_long = (MAX_TOKEN_EXPIRY + 1).to_string();
        let max = u64::MAX.to_string();

        for value in ["0", "soon", "-5", too_long.as_str(), max.as_str()] {
            unsafe {
                std::env::set_var("TOKEN_SECRET", "from-env");
                std::env::set_var("TOKEN_EXPIRY", value);
            }

            assert!(
                matches!(TokenConfig::from_env(), Err(AuthError::Configuration(_))),
                "TOKEN_EXPIRY={} should be rejected",
                value
            );
        }

        unsafe {
            std::env::set_var("TOKEN_EXPIRY", "3600");
        }
        assert_eq!(TokenConfig::from_env().unwrap().expiry, 3600);

        unsafe {
            std::env::remove_var("TOKEN_SECRET");
            std::env::remove_var("TOKEN_EXPIRY");
        }
    }

    #[test]
    #[serial]
    fn test_token_config_requires_secret() {
        unsafe {
            std::env::remove_var("TOKEN_SECRET");
        }

        assert!(matches!(
            TokenConfig::from_env(),
            Err(AuthError::Configuration(_))
        ));
    }
}
