//! Domain → wire conversions. Password hashes never leave through here.

use eventdesk_core::domain::{AttendeeDetails, Event, EventDetails, User};
use eventdesk_shared::dto::{AttendeeResponse, EventRequest, EventResponse, UserResponse};

pub(super) fn user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        role: user.role,
    }
}

pub(super) fn event_response(details: EventDetails) -> EventResponse {
    let EventDetails { event, organizer } = details;
    EventResponse {
        id: event.id,
        title: event.title,
        description: event.description,
        date_time: event.date_time,
        location: event.location,
        organizer: organizer.map(user_response),
    }
}

pub(super) fn attendee_response(details: AttendeeDetails) -> AttendeeResponse {
    AttendeeResponse {
        id: details.attendee.id,
        user: details.user.map(user_response),
        event: details.event.map(event_response),
    }
}

pub(super) fn event_from_request(req: EventRequest) -> Event {
    Event {
        id: 0,
        title: req.title,
        description: req.description,
        date_time: req.date_time,
        location: req.location,
        organizer_id: req.organizer.map(|o| o.id),
    }
}
