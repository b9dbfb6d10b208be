//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay free of utoipa derives. The wrappers here mirror their
//! wire shape and exist only for document generation.

use utoipa::{IntoParams, ToSchema};

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = User)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserSchema {
    /// Store-assigned identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "Sam Smith")]
    name: String,
    /// Unique across all records.
    #[schema(example = "sam@example.com")]
    email: String,
    #[schema(minimum = 0, example = 20)]
    age: u32,
}

/// Request body for creating a record.
#[derive(ToSchema)]
#[schema(as = NewUser)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct NewUserSchema {
    #[schema(example = "Sam Smith")]
    name: String,
    #[schema(example = "sam@example.com")]
    email: String,
    #[schema(minimum = 0, example = 20)]
    age: i64,
}

/// Request body for a partial update. Absent fields are left untouched.
#[derive(ToSchema)]
#[schema(as = UserPatch)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserPatchSchema {
    name: Option<String>,
    email: Option<String>,
    #[schema(minimum = 0)]
    age: Option<i64>,
}

/// Error body carrying only a message.
#[derive(ToSchema)]
#[schema(as = ErrorMessage)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorMessageSchema {
    #[schema(example = "User 3fa85f64-5717-4562-b3fc-2c963f66afa6 not found")]
    message: String,
}

/// Rejection of a single field.
#[derive(ToSchema)]
#[schema(as = FieldError)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct FieldErrorSchema {
    #[schema(example = "email must be a valid address")]
    message: String,
    /// Offending input, when echoed.
    value: Option<String>,
}

/// Validation failure body.
#[derive(ToSchema)]
#[schema(as = ValidationFailure)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ValidationFailureSchema {
    #[schema(example = "Validation Failed")]
    message: String,
    /// Field path to failure.
    details: std::collections::BTreeMap<String, FieldErrorSchema>,
}

/// Query parameters for `GET /v1/users`. Every value is optional free text;
/// numbers that cannot be read fall back to defaults or are ignored.
#[derive(IntoParams)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserListParamsSchema {
    /// One-based page number. Defaults to 1.
    page: Option<String>,
    /// Page size. Defaults to 10.
    limit: Option<String>,
    /// Case-insensitive substring of the name.
    filter: Option<String>,
    /// Sort key, e.g. `name` or `-age`.
    sort: Option<String>,
    /// Inclusive lower age bound.
    min_age: Option<String>,
    /// Inclusive upper age bound.
    max_age: Option<String>,
}
