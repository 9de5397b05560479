use chrono::{DateTime, Utc};
use rocket_db_pools::sqlx::FromRow;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ===== Account Row =====

/// A stored account record.
///
/// Deliberately not `Serialize`: the password digest must never reach a
/// response body. Public views are built from this in `auth::responses`.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: i32,
    pub email: String,
    pub password_digest: String,
    pub terms_accepted: bool,
    pub session_token: String,
    pub role: String,
    pub balance: i64,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: Option<DateTime<Utc>>,
}

// ===== Response Envelopes =====

/// Standard response envelope: `{status, statusCode, message, data?}`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(status_code: u16, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status: "success".to_string(),
            status_code,
            message: message.into(),
            data,
        }
    }

    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            status_code,
            message: message.into(),
            data: None,
        }
    }
}

/// Bare `{message}` body used by the health check and the gate catchers.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MessageResponse {
    pub message: String,
}
