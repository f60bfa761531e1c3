//! 统一错误处理
//!
//! 错误类型来自 `shared::error`，这里补充领域错误到 [`AppError`] 的映射。
//!
//! | 领域错误 | 错误码 | HTTP |
//! |----------|--------|------|
//! | MissingToken | NotAuthenticated | 401 |
//! | MalformedToken | TokenInvalid | 401 |
//! | BadSignature | TokenSignatureInvalid | 401 |
//! | IssuerMismatch / AudienceMismatch | TokenIssuerMismatch / TokenAudienceMismatch | 401 |
//! | TokenExpired | TokenExpired | 401 |
//! | NoRoles | RoleRequired | 403 |
//! | Forbidden | PermissionDenied | 403 |
//! | 签发错误 / 身份存储错误 | InternalError / IdentityStoreError | 500 |

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

use crate::auth::AuthError;
use crate::identity::IdentityError;

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken => AppError::not_authenticated(),
            // 不向客户端暴露解析细节
            AuthError::MalformedToken(_) => AppError::new(ErrorCode::TokenInvalid),
            AuthError::BadSignature => AppError::new(ErrorCode::TokenSignatureInvalid),
            AuthError::IssuerMismatch => AppError::new(ErrorCode::TokenIssuerMismatch),
            AuthError::AudienceMismatch => AppError::new(ErrorCode::TokenAudienceMismatch),
            AuthError::TokenExpired => AppError::token_expired(),
            AuthError::NoRoles => AppError::new(ErrorCode::RoleRequired),
            AuthError::Forbidden => AppError::new(ErrorCode::PermissionDenied),
            AuthError::InvalidSubject | AuthError::EmptyRoleSet | AuthError::Signing(_) => {
                AppError::internal(err.to_string())
            }
        }
    }
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        AppError::with_message(ErrorCode::IdentityStoreError, err.to_string())
    }
}
