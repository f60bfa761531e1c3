//! In-memory identity store backed by argon2 password hashes

use std::collections::HashMap;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;

use super::{Identity, IdentityError, IdentityStore};
use crate::auth::{RoleSet, role_set};

/// 启动时注入的用户
#[derive(Clone, PartialEq, Eq)]
pub struct SeedUser {
    pub username: String,
    pub password: String,
    pub roles: Vec<String>,
}

impl SeedUser {
    pub fn new<I, S>(username: impl Into<String>, password: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            username: username.into(),
            password: password.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }
}

impl std::fmt::Debug for SeedUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedUser")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("roles", &self.roles)
            .finish()
    }
}

struct StoredUser {
    hash_pass: String,
    roles: RoleSet,
}

/// Identity store holding argon2 hashes in memory
///
/// Plaintext passwords are hashed once when the store is built and dropped
/// afterwards.
pub struct InMemoryIdentityStore {
    users: HashMap<String, StoredUser>,
    /// 未知用户也要走一次 argon2 校验，登录耗时不泄露用户是否存在
    dummy_hash: String,
}

impl InMemoryIdentityStore {
    pub fn new(seed: &[SeedUser]) -> Result<Self, IdentityError> {
        let mut users = HashMap::with_capacity(seed.len());
        for user in seed {
            let hash_pass = hash_password(&user.password)?;
            users.insert(
                user.username.clone(),
                StoredUser {
                    hash_pass,
                    roles: role_set(&user.roles),
                },
            );
        }
        let dummy_hash = hash_password("unknown-user-placeholder")?;
        tracing::info!(users = users.len(), "Identity store loaded");
        Ok(Self { users, dummy_hash })
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Identity>, IdentityError> {
        let Some(user) = self.users.get(username) else {
            verify_password(&self.dummy_hash, password)?;
            return Ok(None);
        };

        if !verify_password(&user.hash_pass, password)? {
            return Ok(None);
        }

        Ok(Some(Identity {
            subject: username.to_string(),
            roles: user.roles.clone(),
        }))
    }
}

fn hash_password(password: &str) -> Result<String, IdentityError> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(password_hash.to_string())
}

fn verify_password(hash_pass: &str, password: &str) -> Result<bool, IdentityError> {
    let parsed_hash = PasswordHash::new(hash_pass)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemoryIdentityStore {
        InMemoryIdentityStore::new(&[
            SeedUser::new("alice", "secret", ["Admin", "User"]),
            SeedUser::new("bob", "pw", ["User"]),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let identity = store().authenticate("alice", "secret").await.unwrap().unwrap();
        assert_eq!(identity.subject, "alice");
        assert_eq!(identity.roles, role_set(["Admin", "User"]));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_look_the_same() {
        let store = store();
        assert_eq!(store.authenticate("bob", "wrong").await.unwrap(), None);
        assert_eq!(store.authenticate("mallory", "pw").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unknown_user_runs_password_check() {
        let store = store();
        assert!(store.dummy_hash.starts_with("$argon2"));
        assert!(!verify_password(&store.dummy_hash, "pw").unwrap());

        // 即使猜中占位口令也不能登录
        assert_eq!(
            store
                .authenticate("mallory", "unknown-user-placeholder")
                .await
                .unwrap(),
            None
        );

        let empty = InMemoryIdentityStore::new(&[]).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.authenticate("alice", "secret").await.unwrap(), None);
    }

    #[test]
    fn test_passwords_are_hashed() {
        let store = store();
        let stored = &store.users["alice"];
        assert_ne!(stored.hash_pass, "secret");
        assert!(stored.hash_pass.starts_with("$argon2"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_seed_user_debug_redacts_password() {
        let rendered = format!("{:?}", SeedUser::new("alice", "secret", ["Admin"]));
        assert!(!rendered.contains("secret"));
    }
}
