//! Registration, login and bearer-token authentication.

use std::sync::Arc;

use crate::domain::User;
use crate::error::{DomainError, RepoError};
use crate::ports::{PasswordService, TokenService, UserRepository};

/// Input for registering a new account.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Account registration and credential checks.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Register a new account with the default role.
    ///
    /// Blank fields are rejected before the store is touched.
    pub async fn register(&self, registration: Registration) -> Result<User, DomainError> {
        require("Username", &registration.username)?;
        require("Password", &registration.password)?;
        require("Email", &registration.email)?;

        if self
            .users
            .find_by_username(&registration.username)
            .await?
            .is_some()
        {
            return Err(DomainError::DuplicateUsername(registration.username));
        }

        let password_hash = self.passwords.hash(&registration.password)?;
        let user = User::new(registration.username, password_hash, registration.email);
        let username = user.username.clone();

        match self.users.save(user).await {
            Ok(saved) => {
                tracing::info!(user_id = saved.id, username = %saved.username, "User registered");
                Ok(saved)
            }
            // Lost a race with a concurrent registration of the same name.
            Err(RepoError::Constraint(_)) => Err(DomainError::DuplicateUsername(username)),
            Err(e) => Err(e.into()),
        }
    }

    /// Check credentials and issue a bearer token for the account.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        if !self.passwords.verify(password, &user.password_hash)? {
            tracing::debug!(username, "Login rejected: password mismatch");
            return Err(DomainError::InvalidCredentials);
        }

        Ok(self.tokens.issue(&user.username)?)
    }

    /// Resolve the account behind a bearer token.
    ///
    /// Returns `Ok(None)` when the token does not validate or its subject is
    /// no longer in the credential store.
    pub async fn authenticate(&self, token: &str) -> Result<Option<User>, DomainError> {
        let subject = match self.tokens.extract_subject(token) {
            Ok(subject) => subject,
            Err(e) => {
                tracing::debug!(error = %e, "Bearer token rejected");
                return Ok(None);
            }
        };

        Ok(self.users.find_by_username(&subject).await?)
    }
}

fn require(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}
