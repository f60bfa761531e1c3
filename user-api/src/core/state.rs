use std::sync::Arc;

use crate::api::route_policy;
use crate::auth::{AuthorizationGate, JwtService};
use crate::core::{Config, Result};
use crate::identity::{IdentityStore, InMemoryIdentityStore};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有字段启动后只读，`Clone` 只复制 `Arc`。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Arc<Config> | 配置项 (不可变) |
/// | jwt_service | Arc<JwtService> | JWT 签发/验证 |
/// | gate | Arc<AuthorizationGate> | 路由策略 + 令牌校验 |
/// | identity | Arc<dyn IdentityStore> | 登录凭据校验 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub jwt_service: Arc<JwtService>,
    gate: Arc<AuthorizationGate>,
    identity: Arc<dyn IdentityStore>,
}

impl ServerState {
    /// 使用指定的身份存储创建状态
    pub fn new(config: Config, identity: Arc<dyn IdentityStore>) -> Result<Self> {
        let jwt_service = Arc::new(JwtService::new(config.jwt.clone())?);
        let gate = AuthorizationGate::new(jwt_service.clone(), route_policy());

        Ok(Self {
            config: Arc::new(config),
            jwt_service,
            gate: Arc::new(gate),
            identity,
        })
    }

    /// 按配置初始化全部服务 (内存身份存储 + 配置中的种子用户)
    pub fn initialize(config: Config) -> Result<Self> {
        let identity = InMemoryIdentityStore::new(&config.seed_users)?;
        if identity.is_empty() {
            tracing::warn!("Identity store is empty, every login will fail");
        }
        Self::new(config, Arc::new(identity))
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    pub fn gate(&self) -> &AuthorizationGate {
        &self.gate
    }

    pub fn identity(&self) -> &dyn IdentityStore {
        self.identity.as_ref()
    }
}
