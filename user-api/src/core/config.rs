use std::str::FromStr;

use thiserror::Error;

use crate::auth::JwtConfig;
use crate::auth::jwt::{DEFAULT_EXPIRATION_MINUTES, generate_secure_printable_jwt_secret};
use crate::identity::SeedUser;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("JWT secret must be at least {min} bytes")]
    SecretTooShort { min: usize },

    #[error("Failed to generate JWT secret: {0}")]
    KeyGeneration(String),
}

impl ConfigError {
    pub fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// 服务配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | JWT_SECRET | (开发环境自动生成) | HS256 密钥，至少 32 字节 |
/// | JWT_ISSUER | user-management-api | 令牌签发者 |
/// | JWT_AUDIENCE | user-management-clients | 令牌受众 |
/// | JWT_EXPIRATION_MINUTES | 60 | 令牌有效期 |
/// | JWT_CLOCK_SKEW_SECONDS | 0 | 允许的时钟偏差 |
/// | JWT_VALIDATE_ISSUER | true | 是否校验签发者 |
/// | JWT_VALIDATE_AUDIENCE | true | 是否校验受众 |
/// | HTTP_PORT | 5000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | AUTH_FIXED_DELAY_MS | 500 | 登录接口固定响应时间(毫秒) |
/// | IDENTITY_SEED_USERS | (开发环境内置账号) | `name:password:Role1\|Role2;...` |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (无) | 日志目录，设置后按天滚动写文件 |
///
/// # 示例
///
/// ```ignore
/// JWT_SECRET=... HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 登录接口固定响应时间 (毫秒)，抹平用户存在与否的时间差
    pub auth_fixed_delay_ms: u64,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 启动时注入身份存储的用户
    pub seed_users: Vec<SeedUser>,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载配置
    ///
    /// 空字符串视为未设置。
    pub fn from_source<F>(source: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| source(key).filter(|v| !v.trim().is_empty());

        let environment = get("ENVIRONMENT").unwrap_or_else(|| "development".into());
        let is_production = environment == "production";

        let secret = match get("JWT_SECRET") {
            Some(secret) => secret,
            None if is_production => return Err(ConfigError::Missing("JWT_SECRET")),
            None => {
                tracing::warn!(
                    "JWT_SECRET not set, generated a temporary secret; tokens will not survive a restart"
                );
                generate_secure_printable_jwt_secret()?
            }
        };

        let mut jwt = JwtConfig::new(secret);
        if let Some(issuer) = get("JWT_ISSUER") {
            jwt.issuer = issuer;
        }
        if let Some(audience) = get("JWT_AUDIENCE") {
            jwt.audience = audience;
        }
        jwt.expiration_minutes = parse_or(&get, "JWT_EXPIRATION_MINUTES", DEFAULT_EXPIRATION_MINUTES)?;
        jwt.clock_skew_seconds = parse_or(&get, "JWT_CLOCK_SKEW_SECONDS", 0)?;
        jwt.validate_issuer = parse_or(&get, "JWT_VALIDATE_ISSUER", true)?;
        jwt.validate_audience = parse_or(&get, "JWT_VALIDATE_AUDIENCE", true)?;
        jwt.validate()?;

        let seed_users = match get("IDENTITY_SEED_USERS") {
            Some(raw) => parse_seed_users(&raw)?,
            None if is_production => Vec::new(),
            None => default_seed_users(),
        };

        Ok(Self {
            http_port: parse_or(&get, "HTTP_PORT", 5000)?,
            request_timeout_ms: parse_or(&get, "REQUEST_TIMEOUT_MS", 30_000)?,
            auth_fixed_delay_ms: parse_or(&get, "AUTH_FIXED_DELAY_MS", 500)?,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: get("LOG_DIR"),
            environment,
            jwt,
            seed_users,
        })
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::invalid(key, format!("{:?}: {}", raw, e))),
        None => Ok(default),
    }
}

/// 解析 `name:password:Role1|Role2;name2:password2:Role`
fn parse_seed_users(raw: &str) -> Result<Vec<SeedUser>, ConfigError> {
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            // 密码可以包含 ':'，用户名和角色不行
            let Some((username, password, roles)) = entry
                .split_once(':')
                .and_then(|(user, rest)| rest.rsplit_once(':').map(|(pw, roles)| (user, pw, roles)))
            else {
                return Err(ConfigError::invalid(
                    "IDENTITY_SEED_USERS",
                    "expected name:password:Role1|Role2",
                ));
            };

            let username = username.trim();
            let roles: Vec<&str> = roles
                .split('|')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .collect();

            if username.is_empty() || password.is_empty() {
                return Err(ConfigError::invalid(
                    "IDENTITY_SEED_USERS",
                    "username and password must not be empty",
                ));
            }
            if roles.is_empty() {
                return Err(ConfigError::invalid(
                    "IDENTITY_SEED_USERS",
                    format!("user {} has no roles", username),
                ));
            }

            Ok(SeedUser::new(username, password, roles))
        })
        .collect()
}

fn default_seed_users() -> Vec<SeedUser> {
    vec![
        SeedUser::new("admin", "admin123", ["Admin"]),
        SeedUser::new("user", "user123", ["User"]),
    ]
}
