//! User list handlers
//!
//! Role checks happen in the authorization gate before these run.

use axum::Json;

use crate::auth::Principal;

/// Fixed demo user list
pub const USER_LIST: [&str; 5] = ["Virat", "Messi", "Ozil", "Lara", "MS Dhoni"];

pub async fn admin_only(principal: Principal) -> Json<Vec<&'static str>> {
    tracing::debug!(subject = %principal.subject(), "Listing users (admin only)");
    Json(USER_LIST.to_vec())
}

pub async fn admin_and_user(principal: Principal) -> Json<Vec<&'static str>> {
    tracing::debug!(subject = %principal.subject(), "Listing users");
    Json(USER_LIST.to_vec())
}
