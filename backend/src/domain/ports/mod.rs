//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod user_record_service;
mod user_store;

#[cfg(test)]
pub use user_record_service::MockUserRecordService;
pub use user_record_service::UserRecordService;
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{UserStore, UserStoreError};
