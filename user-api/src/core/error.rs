use thiserror::Error;

use super::config::ConfigError;
use crate::identity::IdentityError;

/// 服务启动和运行错误
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("身份存储错误: {0}")]
    Identity(#[from] IdentityError),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
