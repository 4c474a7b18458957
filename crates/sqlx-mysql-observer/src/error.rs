//! Error types for the sqlx-mysql-observer crate.

/// Errors that can occur during observation operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
   /// Error from the connection manager.
   #[error(transparent)]
   ConnMgr(#[from] sqlx_mysql_conn_mgr::Error),

   /// `init()` was called after the process-wide instance already existed.
   #[error("the global MySQL connection manager is already initialized")]
   AlreadyInitialized,
}

/// Result type alias for observer operations.
pub type Result<T> = std::result::Result<T, Error>;
