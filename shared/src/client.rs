//! Client-related types shared between server and client
//!
//! Request/response bodies of the authentication API.

use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    /// Always `"Bearer"`
    pub token_type: String,
    /// Expiry as Unix timestamp (seconds)
    pub expires_at: i64,
    pub user: UserInfo,
}

/// Authenticated identity as seen by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub subject: String,
    #[serde(default)]
    pub roles: Vec<String>,
}
