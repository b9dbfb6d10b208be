//! Outbound adapters implementing the domain's driven ports.
//!
//! - `memory`: process-local store used when no database is configured.
//! - `persistence`: PostgreSQL store via Diesel.

pub mod memory;
pub mod persistence;
