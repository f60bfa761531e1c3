//! 认证授权中间件
//!
//! 通过 `route_layer` 挂载，所以只对已匹配的路由生效，
//! 端点标识取自 [`MatchedPath`] (路由模板，而非原始 URI)。

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use crate::AppError;
use crate::auth::GateDecision;
use crate::core::ServerState;
use crate::security_log;

/// 授权中间件
///
/// 按路由策略检查 `Authorization: Bearer <token>`，成功后将
/// [`Principal`](crate::auth::Principal) 注入请求扩展。
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 / 令牌无效 / 过期 | 401 Unauthorized |
/// | 令牌无角色 / 角色不满足 | 403 Forbidden |
pub async fn authorize_request(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // CORS 预检由外层 CorsLayer 应答，到达这里的所有方法都要过闸门
    let endpoint = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match state.gate().check(&endpoint, auth_header, Utc::now()) {
        Ok(GateDecision::Public) => Ok(next.run(req).await),
        Ok(GateDecision::Granted(principal)) => {
            tracing::debug!(
                subject = %principal.subject(),
                endpoint = %endpoint,
                "Request authorized"
            );
            req.extensions_mut().insert(principal);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                e.event_name(),
                error = format!("{}", e),
                endpoint = endpoint.clone(),
                method = req.method().to_string()
            );
            Err(AppError::from(e).with_detail("endpoint", endpoint))
        }
    }
}
