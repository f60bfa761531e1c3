//! Shared types for the user-management service
//!
//! Wire-level types used by the API server and its clients:
//! error codes, the unified response envelope and auth DTOs.

pub mod client;
pub mod error;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
