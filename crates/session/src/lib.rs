//! `supplyhub-session`
//!
//! **Responsibility:** one supplier's catalog session.
//!
//! This crate provides:
//! - `SupplierSession`, the explicit owner of a `CatalogStore` for the lifetime
//!   of a session (no global state)
//! - Best-effort backend synchronization: local state is updated first, the
//!   change is then pushed without waiting and failures are only logged
//! - Connectivity tracking and environment configuration
//!
//! The local catalog is the source of truth. There is no reconciliation: a
//! change that fails to reach the backend is not retried.

pub mod config;
pub mod offline;
pub mod session;
pub mod sync;

pub use config::{ConfigError, SessionConfig, SyncMode};
pub use offline::{Connectivity, ConnectivityState};
pub use session::SupplierSession;
pub use sync::{CatalogChange, CatalogSync, HttpSync, NoopSync, ProductPayload, SyncError};
