use std::sync::Arc;

use async_trait::async_trait;
use models::user::{CreateUserRequest, UpdateUserRequest, User};
use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::ServiceError;
use crate::storage::UserStore;

/// Records plus the id counter. Kept under one lock so that id assignment
/// and append happen in the same critical section.
#[derive(Debug)]
struct Directory {
    users: Vec<User>,
    next_id: u64,
}

/// Process-local user store backed by a `Vec`.
///
/// Lookups are linear scans; the directory is expected to stay small.
#[derive(Clone, Debug)]
pub struct InMemoryUserStore {
    inner: Arc<RwLock<Directory>>,
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::seeded()
    }
}

impl InMemoryUserStore {
    /// Store preloaded with the two startup records; the next id is 3.
    pub fn seeded() -> Self {
        Self::with_users(vec![
            User::new(1, "John Doe", "john@example.com"),
            User::new(2, "Jane Smith", "jane@example.com"),
        ])
    }

    pub fn empty() -> Self {
        Self::with_users(Vec::new())
    }

    /// Start from arbitrary records; the counter is seeded above the highest id.
    pub fn with_users(users: Vec<User>) -> Self {
        let next_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        Self { inner: Arc::new(RwLock::new(Directory { users, next_id })) }
    }

    pub fn into_shared(self) -> Arc<dyn UserStore> {
        Arc::new(self)
    }

    /// Apply a mutation to the directory while holding the write guard.
    async fn update_directory<F, T>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut Directory) -> Result<T, ServiceError>,
    {
        let mut dir = self.inner.write().await;
        f(&mut dir)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list(&self) -> Vec<User> {
        self.inner.read().await.users.clone()
    }

    async fn get(&self, id: u64) -> Option<User> {
        let dir = self.inner.read().await;
        dir.users.iter().find(|u| u.id == id).cloned()
    }

    async fn create(&self, input: CreateUserRequest) -> Result<User, ServiceError> {
        input.validate()?;
        self.update_directory(|dir| {
            let user = User { id: dir.next_id, name: input.name, email: input.email };
            dir.users.push(user.clone());
            dir.next_id += 1;
            debug!(id = user.id, next_id = dir.next_id, "user appended");
            Ok(user)
        })
        .await
    }

    async fn update(&self, id: u64, input: UpdateUserRequest) -> Result<User, ServiceError> {
        input.validate()?;
        self.update_directory(|dir| {
            let existing = dir
                .users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or_else(|| ServiceError::not_found("user"))?;
            input.apply_to(existing);
            Ok(existing.clone())
        })
        .await
    }

    async fn delete(&self, id: u64) -> Result<User, ServiceError> {
        self.update_directory(|dir| {
            let idx = dir
                .users
                .iter()
                .position(|u| u.id == id)
                .ok_or_else(|| ServiceError::not_found("user"))?;
            Ok(dir.users.remove(idx))
        })
        .await
    }
}
