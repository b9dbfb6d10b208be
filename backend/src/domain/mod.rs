//! Domain primitives, ports, and services.
//!
//! Purpose: define the user record model, list query construction, and the
//! record service independently of HTTP and storage concerns.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure type.
//! - FieldErrors: per-field validation report.
//! - User, NewUser, UserPatch, UserId: record model.
//! - UserListParams, UserListQuery: raw list parameters and the built query.
//! - UserService: record service over a [`ports::UserStore`].

pub mod error;
pub mod field_errors;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_query;
pub mod user_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError, VALIDATION_FAILED_MESSAGE};
pub use self::field_errors::{FieldError, FieldErrors};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{AGE_MAX, NewUser, User, UserId, UserPatch};
pub use self::user_query::{
    AgeRange, NameFilter, SortDirection, SortField, SortKey, UserListParams, UserListQuery,
};
pub use self::user_service::{UserService, not_found_message};
