//! Error types for sqlx-mysql-conn-mgr

use thiserror::Error;

/// Errors that may occur when working with sqlx-mysql-conn-mgr
#[derive(Error, Debug)]
pub enum Error {
   /// The driver could not establish a connection with the current
   /// configuration. Carries the driver's error so callers can show its text.
   #[error("Error establishing database connection: {0}")]
   ConnectionFailed(#[source] sqlx::Error),

   /// No connection is open, so there is nothing to hand out
   #[error("Database connection is not open")]
   DatabaseClosed,
}

impl Error {
   /// The driver's own description of a failed connection attempt.
   pub fn driver_message(&self) -> Option<String> {
      match self {
         Error::ConnectionFailed(e) => Some(e.to_string()),
         Error::DatabaseClosed => None,
      }
   }
}

/// A type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
