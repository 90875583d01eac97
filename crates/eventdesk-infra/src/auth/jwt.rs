//! JWT token service implementation.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use eventdesk_core::ports::{AuthError, TokenClaims, TokenService};

const DEFAULT_SECRET: &str = "change-me-in-production";

/// JWT token service configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            expiration_hours: 24,
            issuer: "eventdesk-api".to_string(),
        }
    }
}

impl JwtConfig {
    /// Read `JWT_SECRET`, `JWT_EXPIRATION_HOURS` and `JWT_ISSUER`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let secret = std::env::var("JWT_SECRET").unwrap_or(defaults.secret);

        // Warn if using default secret in production
        if secret == DEFAULT_SECRET {
            let is_production = std::env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        Self {
            secret,
            expiration_hours: std::env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.expiration_hours),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        }
    }
}

/// Wire claims.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // username
    exp: i64,
    iat: i64,
    iss: String,
}

/// HS256 bearer token service. The signing secret comes from [`JwtConfig`].
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AuthError::SigningError(e.to_string()))
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, subject: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + TimeDelta::hours(self.config.expiration_hours);

        self.sign(&Claims {
            sub: subject.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        })
    }

    fn validate(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);
        validation.leeway = 0;

        // Expired, tampered and malformed tokens are indistinguishable to callers.
        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!(reason = ?e.kind(), "Token validation failed");
            AuthError::InvalidToken
        })?;

        Ok(TokenClaims {
            subject: token_data.claims.sub,
            exp: token_data.claims.exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key".to_string(),
            expiration_hours: 1,
            issuer: "test-issuer".to_string(),
        }
    }

    #[test]
    fn test_issue_then_validate_returns_subject() {
        let service = JwtTokenService::new(test_config());

        let token = service.issue("alice").unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.subject, "alice");
        assert!(claims.exp > Utc::now().timestamp());
        assert_eq!(service.extract_subject(&token).unwrap(), "alice");
    }

    #[test]
    fn test_validate_malformed_token() {
        let service = JwtTokenService::new(test_config());

        let result = service.validate("invalid-token");

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_validate_rejects_other_secret() {
        let issuer = JwtTokenService::new(JwtConfig {
            secret: "someone-else".to_string(),
            ..test_config()
        });
        let service = JwtTokenService::new(test_config());

        let token = issuer.issue("mallory").unwrap();

        assert!(matches!(service.validate(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_validate_rejects_wrong_issuer() {
        let other = JwtTokenService::new(JwtConfig {
            issuer: "issuer2".to_string(),
            ..test_config()
        });
        let service = JwtTokenService::new(test_config());

        let token = other.issue("bob").unwrap();

        assert!(matches!(service.validate(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_validate_rejects_expired_token() {
        let service = JwtTokenService::new(test_config());
        let past = Utc::now() - TimeDelta::hours(2);
        let token = service
            .sign(&Claims {
                sub: "carol".to_string(),
                exp: (past + TimeDelta::hours(1)).timestamp(),
                iat: past.timestamp(),
                iss: "test-issuer".to_string(),
            })
            .unwrap();

        assert!(matches!(service.validate(&token), Err(AuthError::InvalidToken)));
    }
}
