use sqlx_mysql_observer::{MySqlConnectionConfig, ObservableMySqlDatabase};
use tauri::command;
use tracing::debug;

use crate::Result;

fn database() -> &'static ObservableMySqlDatabase {
   ObservableMySqlDatabase::global()
}

/// Opens the connection with the current configuration and returns the
/// resulting open state. A failed attempt comes back as an error carrying
/// the driver's message.
#[command]
pub(crate) async fn open() -> Result<bool> {
   let db = database();
   db.open().await?;
   Ok(db.is_open())
}

#[command]
pub(crate) async fn close() -> bool {
   let db = database();
   db.close().await;
   db.is_open()
}

#[command]
pub(crate) fn is_open() -> bool {
   database().is_open()
}

#[command]
pub(crate) fn get_config() -> MySqlConnectionConfig {
   database().config()
}

#[command]
pub(crate) fn set_port(port: u16) {
   debug!(port, "set_port");
   database().set_port(port);
}

#[command]
pub(crate) fn set_host_name(host_name: String) {
   debug!(%host_name, "set_host_name");
   database().set_host_name(host_name);
}

#[command]
pub(crate) fn set_user_name(user_name: String) {
   debug!(%user_name, "set_user_name");
   database().set_user_name(user_name);
}

#[command]
pub(crate) fn set_password(password: String) {
   database().set_password(password);
}

#[command]
pub(crate) fn set_database_name(database_name: String) {
   debug!(%database_name, "set_database_name");
   database().set_database_name(database_name);
}
