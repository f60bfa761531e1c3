//! 请求授权闸门
//!
//! 把路由策略和令牌校验组合成一次判定，与 HTTP 框架无关。

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::error::AuthError;
use super::jwt::JwtService;
use super::policy::{Access, RoutePolicy};
use super::principal::Principal;

/// 授权判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// 公开端点，未检查令牌
    Public,
    /// 令牌有效且角色满足要求
    Granted(Principal),
}

#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    jwt: Arc<JwtService>,
    policy: Arc<RoutePolicy>,
}

impl AuthorizationGate {
    pub fn new(jwt: Arc<JwtService>, policy: RoutePolicy) -> Self {
        Self {
            jwt,
            policy: Arc::new(policy),
        }
    }

    pub fn policy(&self) -> &RoutePolicy {
        &self.policy
    }

    /// 对一次请求做授权判定
    ///
    /// `authorization` 是原始的 Authorization 头 (可能缺失)。
    /// 公开端点即使带了无效令牌也放行。
    pub fn check(
        &self,
        endpoint: &str,
        authorization: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<GateDecision, AuthError> {
        let required = match self.policy.resolve(endpoint) {
            Access::Public => return Ok(GateDecision::Public),
            Access::Roles(roles) => roles,
        };

        let header = authorization.ok_or(AuthError::MissingToken)?;
        let token = JwtService::extract_from_header(header).ok_or_else(|| {
            AuthError::MalformedToken("authorization header is not a bearer token".to_string())
        })?;

        self.jwt
            .authorize(token, required, now)
            .map(GateDecision::Granted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::JwtConfig;

    fn now() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_750_000_000, 0).unwrap()
    }

    fn gate() -> AuthorizationGate {
        let jwt = JwtService::new(JwtConfig::new("gate-test-secret-long-enough-for-hs256"))
            .unwrap();
        let policy = RoutePolicy::new()
            .public("/login")
            .require_roles("/admin", ["Admin"])
            .require_roles("/users", ["Admin", "User"]);
        AuthorizationGate::new(Arc::new(jwt), policy)
    }

    fn bearer(gate: &AuthorizationGate, roles: &[&str]) -> String {
        let issued = gate.jwt.issue("alice", roles.iter(), now()).unwrap();
        format!("Bearer {}", issued.token)
    }

    #[test]
    fn test_public_endpoint_skips_token() {
        let gate = gate();
        assert_eq!(gate.check("/login", None, now()), Ok(GateDecision::Public));
        assert_eq!(
            gate.check("/login", Some("Bearer garbage"), now()),
            Ok(GateDecision::Public)
        );
    }

    #[test]
    fn test_missing_and_non_bearer_headers() {
        let gate = gate();
        assert_eq!(
            gate.check("/admin", None, now()),
            Err(AuthError::MissingToken)
        );
        assert!(matches!(
            gate.check("/admin", Some("Basic YWxpY2U6c2VjcmV0"), now()),
            Err(AuthError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_role_requirements() {
        let gate = gate();
        let user = bearer(&gate, &["User"]);

        assert!(matches!(
            gate.check("/users", Some(&user), now()),
            Ok(GateDecision::Granted(p)) if p.subject() == "alice"
        ));
        assert_eq!(
            gate.check("/admin", Some(&user), now()),
            Err(AuthError::Forbidden)
        );
    }

    #[test]
    fn test_unlisted_endpoint() {
        let gate = gate();
        let admin = bearer(&gate, &["Admin"]);

        assert_eq!(
            gate.check("/unlisted", None, now()),
            Err(AuthError::MissingToken)
        );
        assert_eq!(
            gate.check("/unlisted", Some(&admin), now()),
            Err(AuthError::Forbidden)
        );
    }
}
