//! User record domain service.
//!
//! Implements the [`UserRecordService`] driving port over any [`UserStore`].
//! Listing builds a store-agnostic query; every store failure is translated
//! into a domain [`Error`] here so inbound adapters only see one error type.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{UserRecordService, UserStore, UserStoreError};
use crate::domain::{Error, NewUser, User, UserId, UserListParams, UserListQuery, UserPatch};

/// User record service implementing the driving port.
#[derive(Clone)]
pub struct UserService<S> {
    store: Arc<S>,
}

impl<S> UserService<S> {
    /// Create a new service over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

/// Message used when a record lookup by identifier finds nothing.
pub fn not_found_message(id: &UserId) -> String {
    format!("User {id} not found")
}

fn map_store_error(error: UserStoreError) -> Error {
    match error {
        UserStoreError::Validation { fields } => Error::validation(fields),
        other => Error::internal(other.to_string()),
    }
}

#[async_trait]
impl<S> UserRecordService for UserService<S>
where
    S: UserStore + 'static,
{
    async fn list(&self, params: &UserListParams) -> Result<Vec<User>, Error> {
        let query = UserListQuery::build(params);
        debug!(
            offset = query.offset(),
            limit = query.limit(),
            filter = query.name_filter().map(|f| f.as_str()),
            sort = query.sort().map(|s| s.as_str()),
            "listing users"
        );
        self.store.find(&query).await.map_err(map_store_error)
    }

    async fn get(&self, id: &UserId) -> Result<User, Error> {
        debug!(%id, "fetching user");
        self.store
            .find_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(not_found_message(id)))
    }

    async fn create(&self, user: NewUser) -> Result<User, Error> {
        debug!(email = %user.email, "creating user");
        self.store.insert(&user).await.map_err(map_store_error)
    }

    async fn update(&self, id: &UserId, patch: UserPatch) -> Result<User, Error> {
        debug!(%id, "updating user");
        self.store
            .update_by_id(id, &patch)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(not_found_message(id)))
    }

    async fn delete(&self, id: &UserId) -> Result<(), Error> {
        debug!(%id, "deleting user");
        self.store.delete_by_id(id).await.map_err(map_store_error)
    }
}
