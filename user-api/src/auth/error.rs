//! Authentication / authorization error taxonomy

use thiserror::Error;

/// 令牌签发、验证和授权错误
///
/// Each failure path has its own variant so the HTTP layer can map it to the
/// right status code and security log event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    // ========== 签发错误 (调用方编程错误) ==========
    #[error("Token subject must not be empty")]
    InvalidSubject,

    #[error("Token role set must not be empty")]
    EmptyRoleSet,

    #[error("Token signing failed: {0}")]
    Signing(String),

    // ========== 认证错误 (401) ==========
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Invalid token signature")]
    BadSignature,

    #[error("Token issuer mismatch")]
    IssuerMismatch,

    #[error("Token audience mismatch")]
    AudienceMismatch,

    #[error("Token expired")]
    TokenExpired,

    // ========== 授权错误 (403) ==========
    #[error("Token carries no roles")]
    NoRoles,

    #[error("None of the required roles is present")]
    Forbidden,
}

impl AuthError {
    /// 是否为签发阶段的错误
    pub fn is_issuance_error(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidSubject | AuthError::EmptyRoleSet | AuthError::Signing(_)
        )
    }

    /// 是否为角色不足导致的拒绝 (已认证，但无权访问)
    pub fn is_authorization_error(&self) -> bool {
        matches!(self, AuthError::NoRoles | AuthError::Forbidden)
    }

    /// Stable event name used in security logs
    pub fn event_name(&self) -> &'static str {
        match self {
            AuthError::InvalidSubject | AuthError::EmptyRoleSet | AuthError::Signing(_) => {
                "token_issue_failed"
            }
            AuthError::MissingToken => "auth_missing",
            AuthError::NoRoles | AuthError::Forbidden => "permission_denied",
            _ => "auth_failed",
        }
    }
}
