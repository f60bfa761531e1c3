//! JWT 令牌服务
//!
//! 处理 JWT 令牌的签发、验证和授权。
//!
//! 验证顺序固定 (遇到第一个失败即返回)：
//!
//! 1. 结构解析 → [`AuthError::MalformedToken`]
//! 2. 签名校验 → [`AuthError::BadSignature`]
//! 3. 签发者 / 受众 → [`AuthError::IssuerMismatch`] / [`AuthError::AudienceMismatch`]
//! 4. 过期时间 (含时钟偏差) → [`AuthError::TokenExpired`]
//! 5. 角色声明 → [`AuthError::NoRoles`]
//! 6. 角色交集 → [`AuthError::Forbidden`]

use chrono::{DateTime, Duration, SubsecRound, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};

use super::error::AuthError;
use super::principal::{Principal, RoleSet};
use crate::core::ConfigError;

/// JWT 密钥最小长度 (字节)
pub const MIN_SECRET_LEN: usize = 32;

/// 默认令牌有效期 (分钟)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 60;

/// 令牌有效期上限 (分钟)，30 天
pub const MAX_EXPIRATION_MINUTES: i64 = 30 * 24 * 60;

const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT 配置
///
/// 启动时加载一次，之后只读。
#[derive(Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// JWT 密钥 (至少 32 字节)
    #[serde(skip_serializing)]
    pub secret: String,
    /// 令牌签发者
    pub issuer: String,
    /// 令牌受众
    pub audience: String,
    /// 令牌有效期 (分钟)
    pub expiration_minutes: i64,
    /// 允许的时钟偏差 (秒)
    pub clock_skew_seconds: i64,
    /// 是否校验签发者
    pub validate_issuer: bool,
    /// 是否校验受众
    pub validate_audience: bool,
}

impl JwtConfig {
    /// 使用指定密钥和默认值创建配置
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: "user-management-api".to_string(),
            audience: "user-management-clients".to_string(),
            expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            clock_skew_seconds: 0,
            validate_issuer: true,
            validate_audience: true,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    pub fn with_expiration_minutes(mut self, minutes: i64) -> Self {
        self.expiration_minutes = minutes;
        self
    }

    pub fn with_clock_skew_seconds(mut self, seconds: i64) -> Self {
        self.clock_skew_seconds = seconds;
        self
    }

    /// 令牌有效期，超出 chrono 可表示范围时为 `None`
    pub fn lifetime(&self) -> Option<Duration> {
        Duration::try_minutes(self.expiration_minutes)
    }

    /// 校验配置合法性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::SecretTooShort {
                min: MIN_SECRET_LEN,
            });
        }
        if self.expiration_minutes <= 0 {
            return Err(ConfigError::invalid(
                "JWT_EXPIRATION_MINUTES",
                "token lifetime must be positive",
            ));
        }
        if self.expiration_minutes > MAX_EXPIRATION_MINUTES || self.lifetime().is_none() {
            return Err(ConfigError::invalid(
                "JWT_EXPIRATION_MINUTES",
                format!("token lifetime must not exceed {} minutes", MAX_EXPIRATION_MINUTES),
            ));
        }
        if self.clock_skew_seconds < 0 {
            return Err(ConfigError::invalid(
                "JWT_CLOCK_SKEW_SECONDS",
                "clock skew must not be negative",
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiration_minutes", &self.expiration_minutes)
            .field("clock_skew_seconds", &self.clock_skew_seconds)
            .field("validate_issuer", &self.validate_issuer)
            .field("validate_audience", &self.validate_audience)
            .finish()
    }
}

/// 存储在令牌中的 JWT Claims
///
/// `roles`/`iss`/`aud` 缺失时按空值处理，由后续校验步骤给出对应错误；
/// `sub`/`iat`/`exp` 缺失则视为结构错误。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 主体 (Subject)
    pub sub: String,
    /// 角色列表
    #[serde(default)]
    pub roles: Vec<String>,
    /// 签发者
    #[serde(default)]
    pub iss: String,
    /// 受众
    #[serde(default)]
    pub aud: String,
    /// 签发时间戳
    pub iat: i64,
    /// 过期时间戳
    pub exp: i64,
    /// 令牌 ID
    #[serde(default)]
    pub jti: String,
}

/// 签发结果
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// 紧凑格式的 JWT
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// 生成可打印的安全 JWT 密钥 (用于开发环境)
pub fn generate_secure_printable_jwt_secret() -> Result<String, ConfigError> {
    const ALLOWED_CHARS: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+[]{}|;:,.<>?";

    let rng = SystemRandom::new();
    let mut bytes = [0u8; 64];
    rng.fill(&mut bytes)
        .map_err(|_| ConfigError::KeyGeneration("system RNG unavailable".to_string()))?;

    Ok(bytes
        .iter()
        .map(|b| ALLOWED_CHARS[(*b as usize) % ALLOWED_CHARS.len()] as char)
        .collect())
}

/// JWT 令牌服务
///
/// 无状态：签发和验证都不读写共享可变状态，可通过 `Arc` 在所有请求间共享。
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    /// 使用指定配置创建 JWT 服务
    pub fn new(config: JwtConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // 只让 jsonwebtoken 做结构解析和签名校验；
        // 签发者、受众、过期按固定顺序在 validate() 中检查，时间由调用方传入
        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    pub fn config(&self) -> &JwtConfig {
        &self.config
    }

    /// 为主体签发新令牌
    ///
    /// # 错误
    ///
    /// - 主体为空 → [`AuthError::InvalidSubject`]
    /// - 角色集合为空 (空白角色名会被忽略) → [`AuthError::EmptyRoleSet`]
    pub fn issue<I, S>(
        &self,
        subject: &str,
        roles: I,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if subject.trim().is_empty() {
            return Err(AuthError::InvalidSubject);
        }

        let roles: RoleSet = roles
            .into_iter()
            .map(|r| r.as_ref().to_string())
            .filter(|r| !r.trim().is_empty())
            .collect();
        if roles.is_empty() {
            return Err(AuthError::EmptyRoleSet);
        }

        // exp/iat 只有秒精度，签发时间同样取整，保证 expires_at 与令牌内容一致
        let now = now.trunc_subsecs(0);
        let expires_at = self
            .config
            .lifetime()
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| AuthError::Signing("token expiry is out of range".to_string()))?;
        let claims = Claims {
            sub: subject.to_string(),
            roles: roles.into_iter().collect(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        Ok(IssuedToken {
            token,
            issued_at: now,
            expires_at,
        })
    }

    /// 验证令牌并解析出 [`Principal`] (步骤 1-5)
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<Principal, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    AuthError::BadSignature
                }
                _ => AuthError::MalformedToken(e.to_string()),
            })?
            .claims;

        if self.config.validate_issuer && claims.iss != self.config.issuer {
            return Err(AuthError::IssuerMismatch);
        }

        if self.config.validate_audience && claims.aud != self.config.audience {
            return Err(AuthError::AudienceMismatch);
        }

        if self.is_expired(claims.exp, now) {
            return Err(AuthError::TokenExpired);
        }

        if claims.roles.iter().all(|r| r.trim().is_empty()) {
            return Err(AuthError::NoRoles);
        }

        Ok(Principal::from_claims(claims))
    }

    /// 验证令牌并检查角色 (步骤 1-6)
    ///
    /// 令牌角色与 `required_roles` 无交集时返回 [`AuthError::Forbidden`]。
    pub fn authorize(
        &self,
        token: &str,
        required_roles: &RoleSet,
        now: DateTime<Utc>,
    ) -> Result<Principal, AuthError> {
        let principal = self.validate(token, now)?;

        if !principal.has_any_role(required_roles) {
            return Err(AuthError::Forbidden);
        }

        Ok(principal)
    }

    /// 从 Authorization 头提取令牌
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    /// `now` 超过 `exp + clock_skew` 即过期
    fn is_expired(&self, exp: i64, now: DateTime<Utc>) -> bool {
        let deadline = exp.saturating_add(self.config.clock_skew_seconds);
        match DateTime::<Utc>::from_timestamp(deadline, 0) {
            Some(deadline) => now > deadline,
            None => deadline < now.timestamp(),
        }
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
