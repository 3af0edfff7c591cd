use chrono::Utc;
use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct Health {
    pub status: &'static str,
    /// Unix epoch seconds at the time the check ran.
    pub timestamp: i64,
    pub service: String,
}

impl Health {
    pub fn healthy(service: impl Into<String>) -> Self {
        Self {
            status: "healthy",
            timestamp: Utc::now().timestamp(),
            service: service.into(),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
