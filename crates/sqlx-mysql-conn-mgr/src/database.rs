//! MySQL database holding one configuration and at most one live connection

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use sqlx::Connection;
use sqlx::mysql::MySqlConnection;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, warn};

use crate::Result;
use crate::config::MySqlConnectionConfig;
use crate::connection_guard::ConnectionGuard;
use crate::error::Error;

/// A MySQL connection configuration together with the single client
/// connection opened from it.
///
/// ## State Management
///
/// - **`config`**: The editable configuration. Setters only touch this.
/// - **`conn`**: The live connection, if any. `open`, `close` and `acquire`
///   serialize on it.
/// - **`live_config`**: Snapshot of `config` taken when `conn` was opened
/// - **`open`**: Mirrors `conn.is_some()` so `is_open()` never waits on the lock
///
/// ## Usage Pattern
///
/// ```text
/// 1. Set host, port, credentials and database name
/// 2. open() connects with a snapshot of that configuration
/// 3. acquire() hands out the connection for running queries
/// 4. Configuration changes apply on the next open()
/// 5. close() when done
/// ```
#[derive(Debug)]
pub struct MySqlDatabase {
   config: RwLock<MySqlConnectionConfig>,

   conn: Arc<Mutex<Option<MySqlConnection>>>,

   live_config: RwLock<Option<MySqlConnectionConfig>>,

   open: AtomicBool,
}

/// Open state observed on either side of an `open` or `close`, read under the
/// connection lock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateTransition {
   pub was_open: bool,
   pub is_open: bool,
}

impl StateTransition {
   /// True when the open state actually changed
   pub fn changed(&self) -> bool {
      self.was_open != self.is_open
   }
}

impl Default for MySqlDatabase {
   fn default() -> Self {
      Self::new(MySqlConnectionConfig::default())
   }
}

impl MySqlDatabase {
   /// Creates a closed database with the given configuration
   pub fn new(config: MySqlConnectionConfig) -> Self {
      Self {
         config: RwLock::new(config),
         conn: Arc::new(Mutex::new(None)),
         live_config: RwLock::new(None),
         open: AtomicBool::new(false),
      }
   }

   /// Opens the connection using the current configuration.
   ///
   /// An already open connection is closed first and re-established, which is
   /// how configuration changes made while open take effect. On failure the
   /// database is left closed and the driver error is returned; nothing is
   /// retried.
   pub async fn open(&self) -> Result<()> {
      let (_, result) = self.open_with_transition().await;
      result
   }

   /// Same as [`open`](Self::open), also reporting the open state before and
   /// after the call.
   ///
   /// Both states are read while the connection lock is held, so an `open`
   /// and `close` racing each other each see the state the other left behind.
   pub async fn open_with_transition(&self) -> (StateTransition, Result<()>) {
      let mut slot = self.conn.lock().await;
      let was_open = slot.is_some();

      if let Some(existing) = slot.take() {
         debug!("Closing open MySQL connection before reconnecting");
         self.mark_closed();
         close_connection(existing).await;
      }

      let config = self.config();

      let result = match MySqlConnection::connect_with(&config.connect_options()).await {
         Ok(conn) => {
            debug!(host = %config.host_name, port = config.port, database = %config.database_name, "Opened MySQL connection");
            *slot = Some(conn);
            *self.live_config.write() = Some(config);
            self.open.store(true, Ordering::Release);
            Ok(())
         }
         Err(e) => {
            warn!(host = %config.host_name, port = config.port, error = %e, "Failed to open MySQL connection");
            Err(Error::ConnectionFailed(e))
         }
      };

      let transition = StateTransition {
         was_open,
         is_open: slot.is_some(),
      };
      (transition, result)
   }

   /// Closes the connection, if one is open.
   ///
   /// Never fails: errors from the driver while saying goodbye to the server
   /// are logged and the connection is dropped regardless. Waits for any
   /// pending `open` or outstanding [`ConnectionGuard`] to finish first.
   pub async fn close(&self) -> StateTransition {
      let mut slot = self.conn.lock().await;
      self.close_slot(&mut slot).await
   }

   /// Closes the connection only if nobody else holds it.
   ///
   /// Returns `None` without waiting when an `open` is still connecting or a
   /// [`ConnectionGuard`] is alive. Used at shutdown, where waiting on a
   /// connect that never finishes would hang the process.
   pub async fn try_close(&self) -> Option<StateTransition> {
      let mut slot = self.conn.try_lock().ok()?;
      Some(self.close_slot(&mut slot).await)
   }

   /// Acquires exclusive access to the live connection.
   ///
   /// Returns [`Error::DatabaseClosed`] if no connection is open.
   pub async fn acquire(&self) -> Result<ConnectionGuard> {
      let slot = Arc::clone(&self.conn).lock_owned().await;

      OwnedMutexGuard::try_map(slot, |conn| conn.as_mut())
         .map(ConnectionGuard::new)
         .map_err(|_| Error::DatabaseClosed)
   }

   /// Returns true if a connection is currently open
   pub fn is_open(&self) -> bool {
      self.open.load(Ordering::Acquire)
   }

   /// Snapshot of the current configuration
   pub fn config(&self) -> MySqlConnectionConfig {
      self.config.read().clone()
   }

   /// The configuration the live connection was opened with, or `None` when
   /// closed. This can differ from [`config`](Self::config) after setters run
   /// on an open database.
   pub fn live_config(&self) -> Option<MySqlConnectionConfig> {
      self.live_config.read().clone()
   }

   pub fn host_name(&self) -> String {
      self.config.read().host_name.clone()
   }

   pub fn port(&self) -> u16 {
      self.config.read().port
   }

   pub fn user_name(&self) -> String {
      self.config.read().user_name.clone()
   }

   pub fn password(&self) -> String {
      self.config.read().password.clone()
   }

   pub fn database_name(&self) -> String {
      self.config.read().database_name.clone()
   }

   /// Sets the host name used by the next `open()`
   pub fn set_host_name(&self, host_name: impl Into<String>) {
      self.config.write().host_name = host_name.into();
   }

   /// Sets the port used by the next `open()`
   pub fn set_port(&self, port: u16) {
      self.config.write().port = port;
   }

   /// Sets the user name used by the next `open()`
   pub fn set_user_name(&self, user_name: impl Into<String>) {
      self.config.write().user_name = user_name.into();
   }

   /// Sets the password used by the next `open()`.
   ///
   /// The password stays in memory as plain text until replaced.
   pub fn set_password(&self, password: impl Into<String>) {
      self.config.write().password = password.into();
   }

   /// Sets the database name used by the next `open()`
   pub fn set_database_name(&self, database_name: impl Into<String>) {
      self.config.write().database_name = database_name.into();
   }

   async fn close_slot(&self, slot: &mut Option<MySqlConnection>) -> StateTransition {
      match slot.take() {
         Some(conn) => {
            self.mark_closed();
            close_connection(conn).await;
            debug!("Closed MySQL connection");
            StateTransition {
               was_open: true,
               is_open: false,
            }
         }
         None => {
            debug!("close() called with no open MySQL connection");
            StateTransition::default()
         }
      }
   }

   fn mark_closed(&self) {
      self.open.store(false, Ordering::Release);
      *self.live_config.write() = None;
   }
}

async fn close_connection(conn: MySqlConnection) {
   if let Err(e) = conn.close().await {
      warn!(error = %e, "Error while closing MySQL connection");
   }
}
