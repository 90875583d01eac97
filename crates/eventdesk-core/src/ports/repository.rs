use async_trait::async_trait;

use crate::domain::{Attendee, Event, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// List every entity.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Save an entity. Unsaved entities (id `0`) are inserted and receive an id;
    /// anything else overwrites the stored row, or fails with `NotFound`.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID, failing with `NotFound` when nothing was removed.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository - the credential store.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i64> {
    /// Find a user by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Event repository.
pub trait EventRepository: BaseRepository<Event, i64> {}

/// Attendee repository.
#[async_trait]
pub trait AttendeeRepository: BaseRepository<Attendee, i64> {
    /// Number of attendees registered against an event.
    async fn count_by_event(&self, event_id: i64) -> Result<u64, RepoError>;
}
