//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::UserAccount;
use crate::errors::DomainError;

use super::r#trait::UserRepository;

/// In-memory user store for testing the credential authority
#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<String, UserAccount>>>,
    roles: Arc<RwLock<HashMap<i64, Vec<String>>>>,
    groups: Arc<RwLock<HashMap<i64, Vec<String>>>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user with its role and group memberships
    pub async fn insert_user(
        &self,
        account: UserAccount,
        roles: Vec<String>,
        groups: Vec<String>,
    ) {
        self.roles.write().await.insert(account.id, roles);
        self.groups.write().await.insert(account.id, groups);
        self.users
            .write()
            .await
            .insert(account.username.clone(), account);
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>, DomainError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn find_role_names(&self, user_id: i64) -> Result<Vec<String>, DomainError> {
        Ok(self
            .roles
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn find_group_names(&self, user_id: i64) -> Result<Vec<String>, DomainError> {
        Ok(self
            .groups
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }
}
