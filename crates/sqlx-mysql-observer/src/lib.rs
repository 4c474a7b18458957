//! # sqlx-mysql-observer
//!
//! Reactive change notifications for a MySQL connection managed by
//! `sqlx-mysql-conn-mgr`.
//!
//! Every configuration write (`set_port`, `set_host_name`, ...) publishes
//! exactly one [`ConnectionChange`] for its [`Property`]. Every `open()` and
//! `close()` publishes exactly one `Open` change, even when the open state did
//! not move; use [`ConnectionChange::is_transition`] to skip those.
//!
//! ## Core Types
//!
//! - **[`ObservableMySqlDatabase`]**: Observed connection manager and the process-wide instance
//! - **[`ConnectionChange`]**: A single notification
//! - **[`ConnectionChangeStream`]**: `Stream` of changes, optionally filtered by property
//! - **[`ObserverConfig`]**: Broadcast channel settings

mod broker;
mod change;
mod config;
mod conn_mgr;
mod error;
mod stream;

pub use broker::ObservationBroker;
pub use change::{ConnectionChange, ConnectionChangeEvent, Property, PropertySet};
pub use config::ObserverConfig;
pub use conn_mgr::ObservableMySqlDatabase;
pub use error::{Error, Result};
pub use stream::ConnectionChangeStream;

// Re-exported so callers don't need a direct dependency for the common types
pub use sqlx_mysql_conn_mgr::{ConnectionGuard, MySqlConnectionConfig, MySqlDatabase, StateTransition};
