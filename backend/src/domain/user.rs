//! User record model.
//!
//! [`User`] is a stored record. [`NewUser`] and [`UserPatch`] carry client
//! input that has already been type-coerced by an inbound adapter; their
//! `validate` methods enforce the record schema and are run by store adapters
//! before any write.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{FieldError, FieldErrors};

/// Largest age a record can hold. Matches the range of a PostgreSQL `integer`.
pub const AGE_MAX: i64 = i32::MAX as i64;

/// Store-assigned identifier.
///
/// The identifier is opaque to the core: any string is accepted here and it
/// is up to the store to decide whether it can address it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier for a new record.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Interpret the identifier as a UUID, as both bundled stores do.
    pub fn to_uuid(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.0).ok()
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value.to_string())
    }
}

/// Stored user record.
///
/// ## Invariants
/// - `id` is assigned by the store and never changes.
/// - `name` is non-empty once trimmed.
/// - `email` is unique across records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    name: String,
    email: String,
    age: u32,
}

impl User {
    /// Assemble a record from stored components.
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>, age: u32) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            age,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    /// Copy of this record with every field present in `patch` replaced.
    ///
    /// The patch is assumed to have passed [`UserPatch::validate`]; an age
    /// that does not fit is left unchanged.
    pub fn patched(&self, patch: &UserPatch) -> Self {
        let mut next = self.clone();
        if let Some(name) = &patch.name {
            next.name.clone_from(name);
        }
        if let Some(email) = &patch.email {
            next.email.clone_from(email);
        }
        if let Some(age) = patch.age.and_then(|age| u32::try_from(age).ok()) {
            next.age = age;
        }
        next
    }
}

/// Field values for a record that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: i64,
}

impl NewUser {
    /// Check the record schema, reporting every failing field.
    ///
    /// # Examples
    /// ```
    /// use user_service::domain::NewUser;
    ///
    /// let user = NewUser { name: "Sam Smith".into(), email: "sam@example.com".into(), age: 20 };
    /// assert!(user.validate().is_ok());
    ///
    /// let bad = NewUser { name: " ".into(), email: "nope".into(), age: -1 };
    /// assert_eq!(bad.validate().map_err(|e| e.len()), Err(3));
    /// ```
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_name(&self.name, &mut errors);
        check_email(&self.email, &mut errors);
        check_age(self.age, &mut errors);
        errors.into_result()
    }

    /// Stored age once validated.
    pub fn stored_age(&self) -> Option<u32> {
        u32::try_from(self.age).ok().filter(|age| i64::from(*age) <= AGE_MAX)
    }
}

/// Partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i64>,
}

impl UserPatch {
    /// Check the schema of the fields that are present.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(name) = &self.name {
            check_name(name, &mut errors);
        }
        if let Some(email) = &self.email {
            check_email(email, &mut errors);
        }
        if let Some(age) = self.age {
            check_age(age, &mut errors);
        }
        errors.into_result()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none()
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn check_name(name: &str, errors: &mut FieldErrors) {
    if name.trim().is_empty() {
        errors.insert("name", "name is required");
    }
}

fn check_email(email: &str, errors: &mut FieldErrors) {
    if email.trim().is_empty() {
        errors.insert("email", "email is required");
    } else if !email_regex().is_match(email) {
        errors.insert_error(
            "email",
            FieldError::new("email must be a valid address").with_value(email),
        );
    }
}

fn check_age(age: i64, errors: &mut FieldErrors) {
    if age < 0 {
        errors.insert_error(
            "age",
            FieldError::new("age must be a non-negative integer").with_value(age.to_string()),
        );
    } else if age > AGE_MAX {
        errors.insert_error(
            "age",
            FieldError::new(format!("age must be at most {AGE_MAX}"))
                .with_value(age.to_string()),
        );
    }
}

#[cfg(test)]
mod tests;
