//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to register a new user. Missing fields arrive as empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterUserRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Request to login.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Reference to another entity by id, e.g. `{"id": 3}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: i64,
}

/// Event payload for create and full-replace update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date_time: Option<String>,
    pub location: Option<String>,
    pub organizer: Option<EntityRef>,
}

/// Attendee payload for create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendeeRequest {
    pub user: EntityRef,
    pub event: EntityRef,
}

/// A user's public information. Never includes the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date_time: Option<String>,
    pub location: Option<String>,
    pub organizer: Option<UserResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendeeResponse {
    pub id: i64,
    pub user: Option<UserResponse>,
    pub event: Option<EventResponse>,
}
