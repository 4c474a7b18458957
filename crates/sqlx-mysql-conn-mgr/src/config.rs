//! Configuration for the MySQL client connection

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlConnectOptions;

/// Connection parameters for a `MySqlDatabase`
///
/// No validation happens here: an empty host or an unusual port is passed
/// through to the driver as-is and only fails (if at all) when the
/// connection is opened.
///
/// # Examples
///
/// ```
/// use sqlx_mysql_conn_mgr::MySqlConnectionConfig;
///
/// // Use defaults (localhost:3306, no credentials)
/// let config = MySqlConnectionConfig::default();
///
/// // Override just what you need
/// let config = MySqlConnectionConfig {
///     user_name: "app".into(),
///     database_name: "inventory".into(),
///     ..Default::default()
/// };
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MySqlConnectionConfig {
   /// Server host name or IP address
   ///
   /// Default: `"localhost"`
   pub host_name: String,

   /// Server TCP port
   ///
   /// Default: 3306
   pub port: u16,

   /// User to authenticate as. May be empty.
   pub user_name: String,

   /// Password for `user_name`, kept in plain text for the life of the process.
   /// An empty password means no password is sent.
   pub password: String,

   /// Default schema selected after connecting. Empty means none.
   pub database_name: String,
}

impl Default for MySqlConnectionConfig {
   fn default() -> Self {
      Self {
         host_name: "localhost".to_string(),
         port: 3306,
         user_name: String::new(),
         password: String::new(),
         database_name: String::new(),
      }
   }
}

impl MySqlConnectionConfig {
   /// Builds the sqlx connect options for this configuration.
   ///
   /// Host, port and user are always applied. Password and database are only
   /// applied when non-empty so the driver falls back to its own defaults.
   pub fn connect_options(&self) -> MySqlConnectOptions {
      let mut options = MySqlConnectOptions::new()
         .host(&self.host_name)
         .port(self.port)
         .username(&self.user_name);

      if !self.password.is_empty() {
         options = options.password(&self.password);
      }

      if !self.database_name.is_empty() {
         options = options.database(&self.database_name);
      }

      options
   }
}

impl fmt::Debug for MySqlConnectionConfig {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("MySqlConnectionConfig")
         .field("host_name", &self.host_name)
         .field("port", &self.port)
         .field("user_name", &self.user_name)
         .field("password", &"<redacted>")
         .field("database_name", &self.database_name)
         .finish()
   }
}
