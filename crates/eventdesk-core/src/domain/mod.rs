//! Domain entities - the core business objects.

mod attendee;
mod event;
mod user;

pub use attendee::{Attendee, AttendeeDetails};
pub use event::{Event, EventDetails};
pub use user::{DEFAULT_ROLE, User};
