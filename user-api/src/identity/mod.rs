//! 身份存储
//!
//! 登录接口通过 [`IdentityStore`] 校验用户名和密码，令牌服务只关心
//! 校验成功后得到的 [`Identity`]。

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::auth::RoleSet;

pub use memory::{InMemoryIdentityStore, SeedUser};

/// 校验通过的用户身份
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// 令牌主体
    pub subject: String,
    pub roles: RoleSet,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Identity backend error: {0}")]
    Backend(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

impl From<argon2::password_hash::Error> for IdentityError {
    fn from(err: argon2::password_hash::Error) -> Self {
        IdentityError::PasswordHash(err.to_string())
    }
}

/// 用户凭据校验
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// 校验凭据
    ///
    /// 用户不存在和密码错误都返回 `Ok(None)`，调用方不应区分两者。
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Identity>, IdentityError>;
}
