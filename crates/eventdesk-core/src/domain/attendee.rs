use super::{EventDetails, User};

/// Attendee entity - joins one user to one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendee {
    pub id: i64,
    pub user_id: i64,
    pub event_id: i64,
}

impl Attendee {
    pub fn new(user_id: i64, event_id: i64) -> Self {
        Self {
            id: 0,
            user_id,
            event_id,
        }
    }
}

/// An attendee with both references resolved.
///
/// The references are optional on read: rows written before a user or event
/// disappeared out-of-band are still listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendeeDetails {
    pub attendee: Attendee,
    pub user: Option<User>,
    pub event: Option<EventDetails>,
}
