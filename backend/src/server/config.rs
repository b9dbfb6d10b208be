//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::domain::ports::UserRecordService;

/// Everything [`super::create_server`] needs besides the health state.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) users: Arc<dyn UserRecordService>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, users: Arc<dyn UserRecordService>) -> Self {
        Self { bind_addr, users }
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
