//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

use eventdesk_core::domain::User;
use eventdesk_core::error::RepoError;
use eventdesk_core::ports::{AttendeeRepository, EventRepository, UserRepository};

use super::entity::attendee::{self, Entity as AttendeeEntity};
use super::entity::event::Entity as EventEntity;
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, repo_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL event repository.
pub type PostgresEventRepository = PostgresBaseRepository<EventEntity>;

/// PostgreSQL attendee repository.
pub type PostgresAttendeeRepository = PostgresBaseRepository<AttendeeEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await
            .map_err(repo_error)?;

        Ok(result.map(Into::into))
    }
}

impl EventRepository for PostgresEventRepository {}

#[async_trait]
impl AttendeeRepository for PostgresAttendeeRepository {
    async fn count_by_event(&self, event_id: i64) -> Result<u64, RepoError> {
        AttendeeEntity::find()
            .filter(attendee::Column::EventId.eq(event_id))
            .count(self.db.as_ref())
            .await
            .map_err(repo_error)
    }
}
