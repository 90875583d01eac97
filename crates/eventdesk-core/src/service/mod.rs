//! Services - the business rules layered over the ports.

mod attendee;
mod auth;
mod event;

pub use attendee::AttendeeService;
pub use auth::{AuthService, Registration};
pub use event::EventService;

use crate::error::{DomainError, RepoError};

/// Map a storage `NotFound` for `entity_type`/`id` into the domain error.
fn or_not_found(entity_type: &'static str, id: i64) -> impl FnOnce(RepoError) -> DomainError {
    move |err| match err {
        RepoError::NotFound => DomainError::not_found(entity_type, id),
        other => other.into(),
    }
}
