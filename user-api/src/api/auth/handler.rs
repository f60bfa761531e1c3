//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State};
use chrono::Utc;

use crate::AppError;
use crate::auth::Principal;
use crate::core::ServerState;

use shared::client::{LoginRequest, LoginResponse, UserInfo};

/// Login handler
///
/// Checks credentials against the identity store and issues a bearer token.
/// Unknown users and wrong passwords get the same error after the same delay.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let username = req.username.trim().to_string();

    let identity = state
        .identity()
        .authenticate(&username, &req.password)
        .await?;

    // Fixed delay to prevent timing attacks (before checking result)
    let delay = state.config.auth_fixed_delay_ms;
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    let Some(identity) = identity else {
        tracing::warn!(username = %username, "Login failed - invalid credentials");
        return Err(AppError::invalid_credentials());
    };

    let issued = state
        .get_jwt_service()
        .issue(&identity.subject, &identity.roles, Utc::now())?;

    tracing::info!(
        subject = %identity.subject,
        roles = ?identity.roles,
        expires_at = %issued.expires_at,
        "User logged in successfully"
    );

    Ok(Json(LoginResponse {
        token: issued.token,
        token_type: "Bearer".to_string(),
        expires_at: issued.expires_at.timestamp(),
        user: UserInfo {
            subject: identity.subject,
            roles: identity.roles.into_iter().collect(),
        },
    }))
}

/// Current principal, as resolved from the bearer token
pub async fn me(principal: Principal) -> Json<UserInfo> {
    Json(UserInfo {
        subject: principal.subject().to_string(),
        roles: principal.roles().iter().cloned().collect(),
    })
}
