//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 登录和当前主体
//! - [`users`] - 用户列表 (按角色访问)
//!
//! # 访问策略
//!
//! | 路径 | 方法 | 访问要求 |
//! |------|------|----------|
//! | /health | GET | 公开 |
//! | /api/auth/login | POST | 公开 |
//! | /api/auth/me | GET | Admin 或 User |
//! | /api/userlistOnlyAdmin | GET | Admin |
//! | /api/userlistAdminAndUser | GET | Admin 或 User |
//!
//! 已注册但未出现在 [`route_policy`] 中的路由对所有人拒绝访问。

use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue, StatusCode};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::{RoutePolicy, authorize_request};
use crate::core::ServerState;

pub mod auth;
pub mod health;
pub mod middleware;
pub mod users;

/// 管理员角色
pub const ROLE_ADMIN: &str = "Admin";
/// 普通用户角色
pub const ROLE_USER: &str = "User";

pub const HEALTH: &str = "/health";
pub const AUTH_LOGIN: &str = "/api/auth/login";
pub const AUTH_ME: &str = "/api/auth/me";
pub const USER_LIST_ADMIN_ONLY: &str = "/api/userlistOnlyAdmin";
pub const USER_LIST_ADMIN_AND_USER: &str = "/api/userlistAdminAndUser";

/// 应用的路由访问策略
pub fn route_policy() -> RoutePolicy {
    RoutePolicy::new()
        .public(HEALTH)
        .public(AUTH_LOGIN)
        .require_roles(AUTH_ME, [ROLE_ADMIN, ROLE_USER])
        .require_roles(USER_LIST_ADMIN_ONLY, [ROLE_ADMIN])
        .require_roles(USER_LIST_ADMIN_AND_USER, [ROLE_ADMIN, ROLE_USER])
}

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Health API - public route
        .merge(health::router())
        // Auth API - login public, me requires a role
        .merge(auth::router())
        // User list API - role-gated
        .merge(users::router())
}

/// Build a fully configured application with all middleware and state
pub fn build_app(state: &ServerState) -> Router {
    with_middleware(build_router(), state)
}

/// Wrap `router` with the authorization gate and the HTTP middleware stack
///
/// The gate is a `route_layer`, so it sees the matched route template and
/// unmatched paths fall through to a plain 404.
pub fn with_middleware(router: Router<ServerState>, state: &ServerState) -> Router {
    let timeout = Duration::from_millis(state.config.request_timeout_ms);

    router
        // ========== Application Middleware ==========
        // Authorization gate - runs only for matched routes, injects Principal
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            authorize_request,
        ))
        // ========== Tower HTTP Middleware ==========
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Request logging
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        // Trace - Request tracing
        .layer(TraceLayer::new_for_http())
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        // Request ID - outermost, so every inner layer sees it
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .with_state(state.clone())
}
