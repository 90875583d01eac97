//! In-memory repositories - used when no database is configured.
//!
//! Same contract as the PostgreSQL store: sequential ids, unique usernames and
//! atomic delete. Data is lost on process restart.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use eventdesk_core::domain::{Attendee, Event, User};
use eventdesk_core::error::RepoError;
use eventdesk_core::ports::{AttendeeRepository, BaseRepository, EventRepository, UserRepository};

/// A row the in-memory store can hold.
pub trait Stored: Clone + Send + Sync + 'static {
    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);

    /// Whether `self` would violate a unique constraint held by `other`.
    fn conflicts_with(&self, _other: &Self) -> bool {
        false
    }
}

impl Stored for User {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        self.id != other.id && self.username == other.username
    }
}

impl Stored for Event {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl Stored for Attendee {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

/// Map-backed repository with an auto-incrementing key.
pub struct InMemoryRepository<T> {
    rows: RwLock<BTreeMap<i64, T>>,
    next_id: AtomicI64,
}

impl<T: Stored> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl<T: Stored> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory user repository.
pub type InMemoryUserRepository = InMemoryRepository<User>;

/// In-memory event repository.
pub type InMemoryEventRepository = InMemoryRepository<Event>;

/// In-memory attendee repository.
pub type InMemoryAttendeeRepository = InMemoryRepository<Attendee>;

#[async_trait]
impl<T: Stored> BaseRepository<T, i64> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: i64) -> Result<Option<T>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<T>, RepoError> {
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn save(&self, mut entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.write().await;

        if rows.values().any(|row| entity.conflicts_with(row)) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        if entity.id() == 0 {
            entity.set_id(self.next_id.fetch_add(1, Ordering::SeqCst));
        } else if !rows.contains_key(&entity.id()) {
            return Err(RepoError::NotFound);
        }

        rows.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        match self.rows.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|user| user.username == username)
            .cloned())
    }
}

impl EventRepository for InMemoryEventRepository {}

#[async_trait]
impl AttendeeRepository for InMemoryAttendeeRepository {
    async fn count_by_event(&self, event_id: i64) -> Result<u64, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.values().filter(|a| a.event_id == event_id).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> User {
        User::new(name.to_string(), "hash".to_string(), format!("{name}@example.com"))
    }

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();

        let first = repo.save(user("a")).await.unwrap();
        let second = repo.save(user("b")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.find_by_username("b").await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_a_constraint_violation() {
        let repo = InMemoryUserRepository::new();
        repo.save(user("a")).await.unwrap();

        let result = repo.save(user("a")).await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_of_missing_row_is_not_found() {
        let repo = InMemoryEventRepository::new();

        let result = repo
            .save(Event {
                id: 12,
                ..Event::default()
            })
            .await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_is_reported_once() {
        let repo = InMemoryEventRepository::new();
        let event = repo.save(Event::default()).await.unwrap();

        assert!(repo.delete(event.id).await.is_ok());
        assert!(matches!(repo.delete(event.id).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_count_by_event() {
        let repo = InMemoryAttendeeRepository::new();
        repo.save(Attendee::new(1, 10)).await.unwrap();
        repo.save(Attendee::new(2, 10)).await.unwrap();
        repo.save(Attendee::new(1, 11)).await.unwrap();

        assert_eq!(repo.count_by_event(10).await.unwrap(), 2);
        assert_eq!(repo.count_by_event(99).await.unwrap(), 0);
    }
}
