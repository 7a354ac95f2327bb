use async_trait::async_trait;
use thiserror::Error;

use crate::{auth::repo_types::User, inquiries::repo_types::Inquiry};

pub mod memory;

pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for users and their inquiries.
///
/// Implementations must enforce email uniqueness atomically in
/// `create_user` and only ever return inquiries owned by the given user.
#[async_trait]
pub trait Store: Send + Sync {
    async fn create_user(&self, email: &str, password_hash: &str) -> StoreResult<User>;

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn find_user_by_id(&self, id: i64) -> StoreResult<Option<User>>;

    /// Newest first.
    async fn list_inquiries_for_user(&self, user_id: i64) -> StoreResult<Vec<Inquiry>>;

    /// Persists a `pending` inquiry owned by `user_id`.
    async fn create_inquiry(
        &self,
        user_id: i64,
        title: &str,
        description: &str,
    ) -> StoreResult<Inquiry>;
}
