//! Application state - shared across all handlers.

use std::sync::Arc;

use eventdesk_core::ports::{
    AttendeeRepository, AuthError, EventRepository, PasswordService, TokenService, UserRepository,
};
use eventdesk_core::{AttendeeService, AuthService, EventService};
use eventdesk_infra::database::{
    DatabaseConfig, InMemoryAttendeeRepository, InMemoryEventRepository, InMemoryUserRepository,
};
use eventdesk_infra::{Argon2PasswordService, JwtTokenService};

#[cfg(feature = "postgres")]
use eventdesk_infra::database::{
    PostgresAttendeeRepository, PostgresEventRepository, PostgresUserRepository, connect,
    ensure_schema,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub events: Arc<EventService>,
    pub attendees: Arc<AttendeeService>,
}

/// The three stores, backed by the same database.
struct Repositories {
    users: Arc<dyn UserRepository>,
    events: Arc<dyn EventRepository>,
    attendees: Arc<dyn AttendeeRepository>,
}

impl Repositories {
    fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            events: Arc::new(InMemoryEventRepository::new()),
            attendees: Arc::new(InMemoryAttendeeRepository::new()),
        }
    }

    #[cfg(feature = "postgres")]
    async fn postgres(config: &DatabaseConfig) -> Result<Self, sea_orm::DbErr> {
        let db = Arc::new(connect(config).await?);
        ensure_schema(&db).await?;

        Ok(Self {
            users: Arc::new(PostgresUserRepository::shared(db.clone())),
            events: Arc::new(PostgresEventRepository::shared(db.clone())),
            attendees: Arc::new(PostgresAttendeeRepository::shared(db)),
        })
    }

    #[cfg(feature = "postgres")]
    async fn from_config(db_config: Option<&DatabaseConfig>) -> Self {
        let Some(config) = db_config else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Self::in_memory();
        };

        match Self::postgres(config).await {
            Ok(repos) => repos,
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Self::in_memory()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn from_config(_db_config: Option<&DatabaseConfig>) -> Self {
        tracing::info!("Running without postgres feature - using in-memory repositories");
        Self::in_memory()
    }
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, AuthError> {
        let repos = Repositories::from_config(config.database.as_ref()).await;
        let passwords = Arc::new(Argon2PasswordService::with_config(config.password)?);
        let tokens = Arc::new(JwtTokenService::new(config.jwt.clone()));

        tracing::info!("Application state initialized");
        Ok(Self::assemble(repos, passwords, tokens))
    }

    /// In-memory state with the given crypto, for tests.
    #[cfg(test)]
    pub fn in_memory(passwords: Arc<dyn PasswordService>, tokens: Arc<dyn TokenService>) -> Self {
        Self::assemble(Repositories::in_memory(), passwords, tokens)
    }

    fn assemble(
        repos: Repositories,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            auth: Arc::new(AuthService::new(repos.users.clone(), passwords, tokens)),
            events: Arc::new(EventService::new(
                repos.events.clone(),
                repos.users.clone(),
                repos.attendees.clone(),
            )),
            attendees: Arc::new(AttendeeService::new(
                repos.attendees,
                repos.users,
                repos.events,
            )),
        }
    }
}
