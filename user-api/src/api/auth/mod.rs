//! Authentication Routes

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// Build authentication router
/// - /api/auth/login: public
/// - /api/auth/me: Admin or User (checked by the authorization gate)
pub fn router() -> Router<ServerState> {
    Router::new()
        .route(super::AUTH_LOGIN, post(handler::login))
        .route(super::AUTH_ME, get(handler::me))
}
