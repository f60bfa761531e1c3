//! User list routes
//!
//! | 路径 | 方法 | 访问要求 |
//! |------|------|----------|
//! | /api/userlistOnlyAdmin | GET | Admin |
//! | /api/userlistAdminAndUser | GET | Admin 或 User |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub use handler::USER_LIST;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route(super::USER_LIST_ADMIN_ONLY, get(handler::admin_only))
        .route(super::USER_LIST_ADMIN_AND_USER, get(handler::admin_and_user))
}
