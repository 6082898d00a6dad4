pub mod appointment;
pub mod auth;
pub mod availability;
pub mod error;
pub mod extract;
pub mod facility;
pub mod schedule;
pub mod status;

use serde::{Deserialize, Serialize};

/// Plain acknowledgement body returned by most mutating endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
