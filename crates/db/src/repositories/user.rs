//! User repository.

use std::sync::Arc;

use crate::database::Database;
use crate::entities::{User, UserId};
use votely_common::{AppError, AppResult};

/// User repository for store operations.
#[derive(Clone)]
pub struct UserRepository {
    db: Arc<Database>,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.db.read().await.users.get(&id).cloned())
    }

    /// Find a user by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: UserId) -> AppResult<User> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(id.to_string()))
    }

    /// All users in id order.
    pub async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.db.read().await.users.values().cloned().collect())
    }

    /// Number of users.
    pub async fn count(&self) -> AppResult<u64> {
        Ok(self.db.read().await.users.len() as u64)
    }
}
