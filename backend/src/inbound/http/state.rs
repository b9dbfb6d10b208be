//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data<HttpState>` and only ever see the
//! driving port, never a concrete store.

use std::sync::Arc;

use crate::domain::ports::UserRecordService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRecordService>,
}

impl HttpState {
    pub fn new(users: Arc<dyn UserRecordService>) -> Self {
        Self { users }
    }
}
