//! 路由访问策略
//!
//! 每个端点要么公开，要么要求若干角色之一。未登记的端点一律按
//! "要求空角色集合" 处理：匿名请求得到 401，已认证请求得到 403。

use std::collections::{BTreeSet, HashMap};

use super::principal::{RoleSet, role_set};

/// 单个端点的访问要求
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// 无需令牌
    Public,
    /// 需要持有其中任一角色
    Roles(RoleSet),
}

static DENY_ALL: Access = Access::Roles(BTreeSet::new());

/// 端点 → 访问要求
///
/// 启动时构建一次，之后只读。
#[derive(Debug, Clone, Default)]
pub struct RoutePolicy {
    rules: HashMap<String, Access>,
}

impl RoutePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记公开端点
    pub fn public(mut self, endpoint: impl Into<String>) -> Self {
        self.rules.insert(endpoint.into(), Access::Public);
        self
    }

    /// 登记需要角色的端点 (任一即可)
    pub fn require_roles<I, S>(mut self, endpoint: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.rules
            .insert(endpoint.into(), Access::Roles(role_set(roles)));
        self
    }

    /// 查询端点的访问要求，未登记的端点拒绝所有人
    pub fn resolve(&self, endpoint: &str) -> &Access {
        self.rules.get(endpoint).unwrap_or(&DENY_ALL)
    }

    pub fn is_public(&self, endpoint: &str) -> bool {
        matches!(self.resolve(endpoint), Access::Public)
    }

    /// 已登记的端点数量
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RoutePolicy {
        RoutePolicy::new()
            .public("/api/auth/login")
            .require_roles("/api/admin", ["Admin"])
            .require_roles("/api/users", ["Admin", "User"])
    }

    #[test]
    fn test_resolve_registered_endpoints() {
        let policy = policy();
        assert_eq!(policy.resolve("/api/auth/login"), &Access::Public);
        assert_eq!(
            policy.resolve("/api/admin"),
            &Access::Roles(role_set(["Admin"]))
        );
        assert_eq!(
            policy.resolve("/api/users"),
            &Access::Roles(role_set(["User", "Admin"]))
        );
        assert_eq!(policy.len(), 3);
    }

    #[test]
    fn test_unknown_endpoint_requires_empty_role_set() {
        let policy = policy();
        assert_eq!(policy.resolve("/api/unknown"), &Access::Roles(RoleSet::new()));
        assert!(!policy.is_public("/api/unknown"));
        assert!(RoutePolicy::new().is_empty());
    }

    #[test]
    fn test_later_registration_wins() {
        let policy = RoutePolicy::new()
            .public("/api/x")
            .require_roles("/api/x", ["Admin"]);
        assert!(!policy.is_public("/api/x"));
    }
}
