use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Result type alias for plugin commands.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned to the frontend by plugin commands.
///
/// Serialized as `{ "code": ..., "message": ... }` so the frontend can decide
/// how to present a failed connection attempt.
#[derive(Debug, thiserror::Error)]
pub enum Error {
   /// Error from the observed, process-wide connection manager.
   #[error(transparent)]
   Observer(#[from] sqlx_mysql_observer::Error),
}

impl Error {
   /// Extract a structured error code from the error type.
   pub fn error_code(&self) -> String {
      match self {
         Error::Observer(sqlx_mysql_observer::Error::ConnMgr(e)) => conn_mgr_code(e).to_string(),
         Error::Observer(sqlx_mysql_observer::Error::AlreadyInitialized) => {
            "ALREADY_INITIALIZED".to_string()
         }
      }
   }
}

fn conn_mgr_code(error: &sqlx_mysql_conn_mgr::Error) -> &'static str {
   match error {
      sqlx_mysql_conn_mgr::Error::ConnectionFailed(_) => "CONNECTION_FAILED",
      sqlx_mysql_conn_mgr::Error::DatabaseClosed => "DATABASE_CLOSED",
   }
}

impl Serialize for Error {
   fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
   where
      S: Serializer,
   {
      let mut state = serializer.serialize_struct("Error", 2)?;
      state.serialize_field("code", &self.error_code())?;
      state.serialize_field("message", &self.to_string())?;
      state.end()
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   fn database_closed() -> Error {
      sqlx_mysql_observer::Error::from(sqlx_mysql_conn_mgr::Error::DatabaseClosed).into()
   }

   #[test]
   fn test_error_code_database_closed() {
      let err = database_closed();
      assert_eq!(err.error_code(), "DATABASE_CLOSED");
   }

   #[test]
   fn test_error_code_through_observer() {
      let err = Error::Observer(sqlx_mysql_observer::Error::ConnMgr(
         sqlx_mysql_conn_mgr::Error::ConnectionFailed(sqlx::Error::Protocol("access denied".into())),
      ));
      assert_eq!(err.error_code(), "CONNECTION_FAILED");
      assert!(
         err
            .to_string()
            .starts_with("Error establishing database connection: ")
      );
   }

   #[test]
   fn test_error_code_already_initialized() {
      let err = Error::Observer(sqlx_mysql_observer::Error::AlreadyInitialized);
      assert_eq!(err.error_code(), "ALREADY_INITIALIZED");
   }

   #[test]
   fn test_serializes_code_and_message() {
      let err = database_closed();
      let json = serde_json::to_value(&err).unwrap();
      assert_eq!(json["code"], "DATABASE_CLOSED");
      assert_eq!(json["message"], "Database connection is not open");
   }
}
