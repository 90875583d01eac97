//! Authentication ports.

/// Claims carried by a validated bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Username the token was issued to.
    pub subject: String,
    /// Expiry as a unix timestamp (seconds).
    pub exp: i64,
}

/// Token service trait for bearer token operations.
pub trait TokenService: Send + Sync {
    /// Issue a signed token for `subject`, expiring a fixed duration from now.
    fn issue(&self, subject: &str) -> Result<String, AuthError>;

    /// Verify signature, expiry and issuer, and decode the claims.
    ///
    /// Every failure is reported as [`AuthError::InvalidToken`].
    fn validate(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Subject of a valid token.
    fn extract_subject(&self, token: &str) -> Result<String, AuthError> {
        self.validate(token).map(|claims| claims.subject)
    }
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token signing failed: {0}")]
    SigningError(String),

    #[error("Hashing error: {0}")]
    HashingError(String),
}
