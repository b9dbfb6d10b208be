//! HTTP inbound adapter exposing the user record endpoints.

pub mod error;
pub mod fallback;
pub mod health;
pub mod schemas;
pub mod state;
pub mod users;
pub mod validation;

pub use error::ApiResult;
