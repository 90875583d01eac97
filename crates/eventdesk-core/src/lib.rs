//! # Eventdesk Core
//!
//! The domain layer of the Eventdesk backend.
//! Entities, ports and the services that enforce the business rules live here;
//! storage and crypto are supplied by `eventdesk-infra` through the ports.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use service::{AttendeeService, AuthService, EventService};

#[cfg(test)]
pub(crate) mod testing;
