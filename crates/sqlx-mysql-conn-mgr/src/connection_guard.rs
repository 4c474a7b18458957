//! Exclusive access to the live MySQL connection

use std::ops::{Deref, DerefMut};

use sqlx::mysql::MySqlConnection;
use tokio::sync::OwnedMappedMutexGuard;

/// RAII guard handing out the single live `MySqlConnection`.
///
/// While a guard is alive, `open()` and `close()` on the owning database wait
/// for it to be dropped.
#[must_use = "if unused, the connection lock is immediately released"]
pub struct ConnectionGuard {
   conn: OwnedMappedMutexGuard<Option<MySqlConnection>, MySqlConnection>,
}

impl ConnectionGuard {
   pub(crate) fn new(conn: OwnedMappedMutexGuard<Option<MySqlConnection>, MySqlConnection>) -> Self {
      Self { conn }
   }
}

impl Deref for ConnectionGuard {
   type Target = MySqlConnection;

   fn deref(&self) -> &Self::Target {
      &self.conn
   }
}

impl DerefMut for ConnectionGuard {
   fn deref_mut(&mut self) -> &mut Self::Target {
      &mut self.conn
   }
}
