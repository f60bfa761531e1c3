//! 认证授权模块
//!
//! 提供 JWT 签发验证、路由策略和中间件：
//! - [`JwtService`] - JWT 令牌服务
//! - [`RoutePolicy`] - 端点访问策略
//! - [`AuthorizationGate`] - 策略 + 令牌校验
//! - [`Principal`] - 已认证主体
//! - [`authorize_request`] - 授权中间件

pub mod error;
pub mod extractor;
pub mod gate;
pub mod jwt;
pub mod middleware;
pub mod policy;
pub mod principal;

pub use error::AuthError;
pub use gate::{AuthorizationGate, GateDecision};
pub use jwt::{Claims, IssuedToken, JwtConfig, JwtService};
pub use middleware::authorize_request;
pub use policy::{Access, RoutePolicy};
pub use principal::{Principal, RoleSet, role_set};
