//! Response body shapes shared by handlers and error mapping.

use serde::Serialize;

/// The `{ "message": ... }` body used for status reports and errors.
#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub message: String,
}

impl StatusMessage {
    pub fn new(message: impl Into<String>) -> Self {
        StatusMessage {
            message: message.into(),
        }
    }
}
