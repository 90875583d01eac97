//! The response envelope every endpoint answers with.

use serde::{Deserialize, Serialize};

/// Standard API response wrapper.
///
/// `status` mirrors the HTTP status code of the response carrying it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: String,
    pub status: u16,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>, status: u16) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            status,
        }
    }

    pub fn error(message: impl Into<String>, status: u16) -> Self {
        Self {
            success: false,
            data: None,
            message: message.into(),
            status,
        }
    }
}
