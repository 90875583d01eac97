use super::User;

/// Event entity.
///
/// Every descriptive field is optional: updates replace the whole record, so a
/// field left out of an update payload is cleared. `date_time` is stored as the
/// caller sent it, without parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Event {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date_time: Option<String>,
    pub location: Option<String>,
    pub organizer_id: Option<i64>,
}

impl Event {
    /// Overwrite every mutable field with the values of `other`, keeping the identity.
    pub fn replace_with(&mut self, other: Event) {
        let id = self.id;
        *self = Event { id, ..other };
    }
}

/// An event with its organizer resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    pub event: Event,
    pub organizer: Option<User>,
}
