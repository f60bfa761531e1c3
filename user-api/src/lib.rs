//! User API - JWT 签发验证与基于角色的访问控制
//!
//! # 模块结构
//!
//! ```text
//! user-api/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── auth/          # JWT 服务、路由策略、授权闸门、中间件
//! ├── identity/      # 登录凭据校验 (argon2)
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误映射、日志
//! ```
//!
//! # 请求流程
//!
//! 1. `POST /api/auth/login` 校验凭据，返回 HS256 签名的 bearer 令牌
//! 2. 受保护路由经过 [`auth::authorize_request`]：按路由模板查策略，
//!    校验令牌 (签名 → 签发者/受众 → 过期 → 角色)，成功后注入 [`Principal`]
//! 3. 失败时 401 (未认证) 或 403 (角色不足)

pub mod api;
pub mod auth;
pub mod core;
pub mod identity;
pub mod utils;

// Re-export 公共类型
pub use auth::{AuthError, JwtConfig, JwtService, Principal, RoutePolicy};
pub use crate::core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 安全事件统一走 "security" target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 加载 `.env` 并按 `LOG_LEVEL` / `LOG_DIR` 初始化日志
///
/// 在 [`Config::from_env`] 之前调用，配置加载过程中的警告才会被记录。
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}
