//! In-memory user store.
//!
//! Used when no database is configured and by end-to-end tests. Records are
//! kept in insertion order, which is the natural order for unsorted listings.
//! Identifiers are UUID v4 strings; anything else is rejected as an invalid
//! id, mirroring the PostgreSQL adapter.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{NewUser, User, UserId, UserListQuery, UserPatch};

/// Process-local [`UserStore`].
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    records: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `users`, in the given order.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            records: RwLock::new(users.into_iter().collect()),
        }
    }
}

fn check_id(id: &UserId) -> Result<(), UserStoreError> {
    id.to_uuid()
        .map(|_| ())
        .ok_or_else(|| UserStoreError::invalid_id(id.as_str()))
}

fn email_taken(records: &[User], email: &str, except: Option<&UserId>) -> bool {
    records
        .iter()
        .any(|user| user.email() == email && Some(user.id()) != except)
}

fn duplicate_email(email: &str) -> UserStoreError {
    UserStoreError::constraint(format!("duplicate key: email \"{email}\" already exists"))
}

fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find(&self, query: &UserListQuery) -> Result<Vec<User>, UserStoreError> {
        let records = self.records.read().await;
        let mut matching: Vec<User> = records
            .iter()
            .filter(|user| query.matches(user))
            .cloned()
            .collect();
        // Stable sort keeps insertion order among equal keys.
        matching.sort_by(|a, b| query.compare(a, b));
        Ok(matching
            .into_iter()
            .skip(to_usize(query.offset()))
            .take(to_usize(query.limit()))
            .collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError> {
        check_id(id)?;
        let records = self.records.read().await;
        Ok(records.iter().find(|user| user.id() == id).cloned())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserStoreError> {
        user.validate().map_err(UserStoreError::validation)?;
        let age = user
            .stored_age()
            .ok_or_else(|| UserStoreError::query(format!("age {} out of range", user.age)))?;

        let mut records = self.records.write().await;
        if email_taken(&records, &user.email, None) {
            return Err(duplicate_email(&user.email));
        }
        let created = User::new(UserId::random(), user.name.clone(), user.email.clone(), age);
        records.push(created.clone());
        Ok(created)
    }

    async fn update_by_id(
        &self,
        id: &UserId,
        patch: &UserPatch,
    ) -> Result<Option<User>, UserStoreError> {
        check_id(id)?;
        patch.validate().map_err(UserStoreError::validation)?;

        let mut records = self.records.write().await;
        if !records.iter().any(|user| user.id() == id) {
            return Ok(None);
        }
        if let Some(email) = &patch.email
            && email_taken(&records, email, Some(id))
        {
            return Err(duplicate_email(email));
        }
        let Some(slot) = records.iter_mut().find(|user| user.id() == id) else {
            return Ok(None);
        };
        *slot = slot.patched(patch);
        Ok(Some(slot.clone()))
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<(), UserStoreError> {
        check_id(id)?;
        self.records.write().await.retain(|user| user.id() != id);
        Ok(())
    }
}
