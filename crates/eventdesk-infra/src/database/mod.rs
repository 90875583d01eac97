//! Database connection management and repositories.

mod connections;
pub mod memory;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;
#[cfg(feature = "postgres")]
mod schema;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::DatabaseConfig;
pub use memory::{InMemoryAttendeeRepository, InMemoryEventRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
pub use connections::connect;
#[cfg(feature = "postgres")]
pub use postgres_repo::{
    PostgresAttendeeRepository, PostgresEventRepository, PostgresUserRepository,
};
#[cfg(feature = "postgres")]
pub use schema::ensure_schema;
