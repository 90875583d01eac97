//! In-process fakes for service tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{Attendee, Event, User};
use crate::error::RepoError;
use crate::ports::{
    AttendeeRepository, AuthError, BaseRepository, EventRepository, PasswordService,
    TokenClaims, TokenService, UserRepository,
};
use crate::service::{AttendeeService, AuthService, EventService};

pub(crate) trait Row: Clone + Send + Sync + 'static {
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}

macro_rules! impl_row {
    ($($ty:ty),*) => {
        $(impl Row for $ty {
            fn id(&self) -> i64 {
                self.id
            }

            fn set_id(&mut self, id: i64) {
                self.id = id;
            }
        })*
    };
}

impl_row!(User, Event, Attendee);

/// Vec-backed repository that counts reads and writes.
pub(crate) struct FakeRepo<T> {
    rows: Mutex<Vec<T>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl<T: Row> FakeRepo<T> {
    pub(crate) fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            reads: AtomicUsize::new(0),
            writes: AtomicUsize::new(0),
        }
    }

    pub(crate) fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn snapshot(&self) -> Vec<T> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl<T: Row> BaseRepository<T, i64> for FakeRepo<T> {
    async fn find_by_id(&self, id: i64) -> Result<Option<T>, RepoError> {
        Ok(self.snapshot().into_iter().find(|row| row.id() == id))
    }

    async fn find_all(&self) -> Result<Vec<T>, RepoError> {
        Ok(self.snapshot())
    }

    async fn save(&self, mut entity: T) -> Result<T, RepoError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();

        if entity.id() == 0 {
            let next = rows.iter().map(Row::id).max().unwrap_or(0) + 1;
            entity.set_id(next);
            rows.push(entity.clone());
            return Ok(entity);
        }

        match rows.iter_mut().find(|row| row.id() == entity.id()) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(entity)
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|row| row.id() != id);

        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for FakeRepo<User> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self.snapshot().into_iter().find(|u| u.username == username))
    }
}

impl EventRepository for FakeRepo<Event> {}

#[async_trait]
impl AttendeeRepository for FakeRepo<Attendee> {
    async fn count_by_event(&self, event_id: i64) -> Result<u64, RepoError> {
        Ok(self
            .snapshot()
            .iter()
            .filter(|a| a.event_id == event_id)
            .count() as u64)
    }
}

/// Reversible "hash" so tests can tell hashed from plain.
pub(crate) struct FakePasswords;

impl PasswordService for FakePasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("hashed:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(hash.strip_prefix("hashed:") == Some(password))
    }
}

/// Unsigned tokens of the form `token:<subject>`.
pub(crate) struct FakeTokens {
    issued: AtomicUsize,
}

impl FakeTokens {
    pub(crate) fn issued(&self) -> usize {
        self.issued.load(Ordering::SeqCst)
    }
}

impl TokenService for FakeTokens {
    fn issue(&self, subject: &str) -> Result<String, AuthError> {
        self.issued.fetch_add(1, Ordering::SeqCst);
        Ok(format!("token:{subject}"))
    }

    fn validate(&self, token: &str) -> Result<TokenClaims, AuthError> {
        token
            .strip_prefix("token:")
            .map(|subject| TokenClaims {
                subject: subject.to_string(),
                exp: i64::MAX,
            })
            .ok_or(AuthError::InvalidToken)
    }
}

/// Services wired to fresh fakes.
pub(crate) struct Fixture {
    pub(crate) users: Arc<FakeRepo<User>>,
    pub(crate) event_repo: Arc<FakeRepo<Event>>,
    pub(crate) attendee_repo: Arc<FakeRepo<Attendee>>,
    pub(crate) tokens: Arc<FakeTokens>,
    pub(crate) auth: AuthService,
    pub(crate) events: EventService,
    pub(crate) attendees: AttendeeService,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        let users = Arc::new(FakeRepo::new());
        let event_repo = Arc::new(FakeRepo::new());
        let attendee_repo = Arc::new(FakeRepo::new());
        let tokens = Arc::new(FakeTokens {
            issued: AtomicUsize::new(0),
        });

        let auth = AuthService::new(users.clone(), Arc::new(FakePasswords), tokens.clone());
        let events = EventService::new(event_repo.clone(), users.clone(), attendee_repo.clone());
        let attendees =
            AttendeeService::new(attendee_repo.clone(), users.clone(), event_repo.clone());

        Self {
            users,
            event_repo,
            attendee_repo,
            tokens,
            auth,
            events,
            attendees,
        }
    }

    pub(crate) async fn seed_user(&self, username: &str) -> User {
        self.users
            .save(User::new(
                username.to_string(),
                "hashed:pw".to_string(),
                format!("{username}@example.com"),
            ))
            .await
            .unwrap()
    }
}
