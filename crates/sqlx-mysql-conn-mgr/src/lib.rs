//! # sqlx-mysql-conn-mgr
//!
//! A minimal wrapper around SQLx that owns one MySQL connection configuration
//! and the lifecycle of the single connection opened from it.
//!
//! ## Core Types
//!
//! - **[`MySqlDatabase`]**: Configuration plus open/close of one `MySqlConnection`
//! - **[`MySqlConnectionConfig`]**: Host, port, credentials and database name
//! - **[`ConnectionGuard`]**: RAII guard for exclusive use of the live connection
//! - **[`Error`]**: Error type for connection operations
//!
//! ## Usage
//!
//! ```no_run
//! use sqlx_mysql_conn_mgr::MySqlDatabase;
//!
//! #[tokio::main]
//! async fn main() -> sqlx_mysql_conn_mgr::Result<()> {
//!     let db = MySqlDatabase::default();
//!     db.set_user_name("app");
//!     db.set_database_name("inventory");
//!
//!     db.open().await?;
//!
//!     let mut conn = db.acquire().await?;
//!     sqlx::query("SELECT 1").execute(&mut *conn).await.ok();
//!     drop(conn);
//!
//!     db.close().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Design Principles
//!
//! - Configuration changes never touch a live connection; they apply on the next `open()`
//! - Minimal custom logic - delegates to sqlx for everything on the wire
//! - No pooling and no retries; a hung connect blocks its caller (see `try_close`)

mod config;
mod connection_guard;
mod database;
mod error;

// Re-export public types
pub use config::MySqlConnectionConfig;
pub use connection_guard::ConnectionGuard;
pub use database::{MySqlDatabase, StateTransition};
pub use error::{Error, Result};
