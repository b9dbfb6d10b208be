//! Driven port for user record storage.
//!
//! Adapters own identifier assignment, schema validation, and the uniqueness
//! of email addresses. Each operation is a single atomic store call.

use async_trait::async_trait;

use crate::domain::{FieldErrors, NewUser, User, UserId, UserListQuery, UserPatch};

use super::define_port_error;

define_port_error! {
    /// Failures raised by user store adapters.
    pub enum UserStoreError {
        /// Store connection could not be established or was lost.
        Connection { message: String } => "user store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user store query failed: {message}",
        /// A uniqueness constraint rejected the write.
        Constraint { message: String } => "user store constraint violated: {message}",
        /// The identifier is not one this store can address.
        InvalidId { id: String } => "invalid user id: {id}",
        /// The record failed schema validation.
        Validation { fields: FieldErrors } => "user validation failed: {fields}",
    }
}

/// Persistence operations over user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Records matching the query's predicates, ordered and windowed.
    async fn find(&self, query: &UserListQuery) -> Result<Vec<User>, UserStoreError>;

    /// Fetch a record by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError>;

    /// Validate and persist a new record, assigning its identifier.
    async fn insert(&self, user: &NewUser) -> Result<User, UserStoreError>;

    /// Apply a partial update, returning the post-update record or `None`
    /// when no record has the identifier.
    async fn update_by_id(
        &self,
        id: &UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserStoreError>;

    /// Remove a record. Removing a missing record succeeds.
    async fn delete_by_id(&self, id: &UserId) -> Result<(), UserStoreError>;
}
