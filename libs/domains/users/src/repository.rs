use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Persistence boundary for users.
///
/// Implementations must be cancel-safe: a dropped future leaves at most one
/// statement's effect behind.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a full row. An existing id is a storage error.
    async fn create(&self, user: User) -> UserResult<()>;

    /// Write email, password and updated_at for `user.id`.
    ///
    /// Matching zero rows is not an error; callers fetch first.
    async fn update(&self, user: User) -> UserResult<()>;

    /// Fetch one user, or `UserError::NotFound`.
    async fn get(&self, id: Uuid) -> UserResult<User>;

    /// Every user; empty when there are none.
    async fn get_all(&self) -> UserResult<Vec<User>>;

    /// Remove one user. Zero affected rows is `UserError::NotFound`.
    async fn delete(&self, id: Uuid) -> UserResult<()>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<()> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.id) {
            return Err(UserError::Storage(format!(
                "duplicate key value violates unique constraint \"users_pkey\": {}",
                user.id
            )));
        }

        tracing::info!(user_id = %user.id, "Created user");
        users.insert(user.id, user);
        Ok(())
    }

    async fn update(&self, user: User) -> UserResult<()> {
        let mut users = self.users.write().await;

        if let Some(existing) = users.get_mut(&user.id) {
            existing.email = user.email;
            existing.password = user.password;
            existing.updated_at = user.updated_at;
            tracing::info!(user_id = %user.id, "Updated user");
        }
        Ok(())
    }

    async fn get(&self, id: Uuid) -> UserResult<User> {
        let users = self.users.read().await;
        users.get(&id).cloned().ok_or(UserError::NotFound(id))
    }

    async fn get_all(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().cloned().collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(result)
    }

    async fn delete(&self, id: Uuid) -> UserResult<()> {
        let mut users = self.users.write().await;

        match users.remove(&id) {
            Some(_) => {
                tracing::info!(user_id = %id, "Deleted user");
                Ok(())
            }
            None => Err(UserError::NotFound(id)),
        }
    }
}
