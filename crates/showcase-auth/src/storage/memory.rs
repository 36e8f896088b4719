//! In-memory user store.
//!
//! Keyed by lowercased email so lookups are case-insensitive. Intended
//! for tests, development, and single-process deployments.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AuthError;
use crate::storage::user::{NewUser, User, UserStore};
use crate::AuthResult;

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
    roles: RwLock<BTreeSet<String>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create_user(&self, new_user: NewUser) -> AuthResult<User> {
        let key = new_user.email.trim().to_lowercase();
        if key.is_empty() {
            return Err(AuthError::validation("email", "email must not be empty"));
        }

        let mut users = self.users.write().await;
        if users.contains_key(&key) {
            return Err(AuthError::validation("email", "email is already registered"));
        }

        let user = User {
            id: Uuid::new_v4(),
            email: new_user.email.trim().to_string(),
            display_name: new_user.display_name,
            password_hash: new_user.password_hash,
            roles: Vec::new(),
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(key, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&email.trim().to_lowercase()).cloned())
    }

    async fn ensure_role(&self, role: &str) -> AuthResult<()> {
        let mut roles = self.roles.write().await;
        roles.insert(role.to_string());
        Ok(())
    }

    async fn assign_role(&self, user_id: Uuid, role: &str) -> AuthResult<()> {
        {
            let roles = self.roles.read().await;
            if !roles.contains(role) {
                return Err(AuthError::storage(format!("unknown role: {role}")));
            }
        }

        let mut users = self.users.write().await;
        let user = users
            .values_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AuthError::storage(format!("unknown user: {user_id}")))?;

        if !user.roles.iter().any(|r| r == role) {
            user.roles.push(role.to_string());
        }
        Ok(())
    }

    async fn count_users(&self) -> AuthResult<usize> {
        Ok(self.users.read().await.len())
    }
}
