//! Storage abstractions for the service layer.
//!
//! Handlers depend on the `UserStore` trait so the backing store can be
//! swapped (or isolated per test) without touching the HTTP layer.

pub mod memory;

use async_trait::async_trait;
use models::user::{CreateUserRequest, UpdateUserRequest, User};

use crate::errors::ServiceError;

pub use memory::InMemoryUserStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// All records in insertion order.
    async fn list(&self) -> Vec<User>;
    async fn get(&self, id: u64) -> Option<User>;
    /// Validate, assign the next id and append.
    async fn create(&self, input: CreateUserRequest) -> Result<User, ServiceError>;
    /// Overwrite the provided non-empty fields of an existing record.
    async fn update(&self, id: u64, input: UpdateUserRequest) -> Result<User, ServiceError>;
    /// Remove a record, keeping the order of the rest.
    async fn delete(&self, id: u64) -> Result<User, ServiceError>;
}
