//! Authenticated principal

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use super::jwt::Claims;

/// Set of role names. Ordered so logs and responses are deterministic.
pub type RoleSet = BTreeSet<String>;

/// Build a [`RoleSet`] from anything string-like
pub fn role_set<I, S>(roles: I) -> RoleSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    roles.into_iter().map(|r| r.as_ref().to_string()).collect()
}

/// Identity resolved from a validated token
///
/// Only the token validator can build one, so holding a `Principal` means the
/// signature, issuer, audience and expiry checks have all passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    subject: String,
    roles: RoleSet,
    token_id: String,
    expires_at: DateTime<Utc>,
}

impl Principal {
    pub(crate) fn from_claims(claims: Claims) -> Self {
        let expires_at =
            DateTime::<Utc>::from_timestamp(claims.exp, 0).unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            subject: claims.sub,
            // 与 NoRoles 判定一致：空白角色名不计入
            roles: claims
                .roles
                .into_iter()
                .filter(|r| !r.trim().is_empty())
                .collect(),
            token_id: claims.jti,
            expires_at,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    /// `jti` of the token this principal came from
    pub fn token_id(&self) -> &str {
        &self.token_id
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// True when the principal holds at least one of `required`
    pub fn has_any_role(&self, required: &RoleSet) -> bool {
        !self.roles.is_disjoint(required)
    }
}
