//! Driving port for user record use cases.
//!
//! Inbound adapters call this port without importing persistence concerns.
//! Every failure is already a domain [`Error`].

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User, UserId, UserListParams, UserPatch};

/// CRUD operations over user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRecordService: Send + Sync {
    /// Page of records matching the raw list parameters.
    async fn list(&self, params: &UserListParams) -> Result<Vec<User>, Error>;

    /// Single record. Fails with a not-found error when absent.
    async fn get(&self, id: &UserId) -> Result<User, Error>;

    /// Create a record and return it with its assigned identifier.
    async fn create(&self, user: NewUser) -> Result<User, Error>;

    /// Apply a partial update and return the post-update record. Fails with a
    /// not-found error when absent.
    async fn update(&self, id: &UserId, patch: UserPatch) -> Result<User, Error>;

    /// Remove a record. Idempotent.
    async fn delete(&self, id: &UserId) -> Result<(), Error>;
}
