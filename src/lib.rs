use sqlx_mysql_observer::{ObservableMySqlDatabase, ObserverConfig};
use tauri::{RunEvent, Runtime, plugin::Builder as PluginBuilder};

mod commands;
mod error;
mod events;

pub use error::{Error, Result};
pub use events::{CHANGE_EVENT, ChangePayload};
pub use sqlx_mysql_observer::{ConnectionChange, MySqlConnectionConfig, Property};

/// Builder for the MySQL plugin.
///
/// Use this to configure the plugin and build the plugin instance.
///
/// # Example
///
/// ```ignore
/// use tauri_plugin_mysql::{Builder, MySqlConnectionConfig};
///
/// // In your Tauri app setup:
/// tauri::Builder::default()
///     .plugin(
///         Builder::new()
///             .connection(MySqlConnectionConfig {
///                 user_name: "app".into(),
///                 ..Default::default()
///             })
///             .build(),
///     )
///     .run(tauri::generate_context!())
///     .expect("error while running tauri application");
/// ```
#[derive(Default)]
pub struct Builder {
   connection: Option<MySqlConnectionConfig>,
   observer: Option<ObserverConfig>,
}

impl Builder {
   /// Create a new builder instance.
   pub fn new() -> Self {
      Self::default()
   }

   /// Initial connection configuration for the process-wide instance.
   pub fn connection(mut self, config: MySqlConnectionConfig) -> Self {
      self.connection = Some(config);
      self
   }

   /// Capacity of the change notification channel.
   pub fn channel_capacity(mut self, capacity: usize) -> Self {
      self.observer = Some(ObserverConfig::new().with_channel_capacity(capacity));
      self
   }

   /// Build the plugin with command registration, event forwarding and
   /// shutdown handling.
   pub fn build<R: Runtime>(self) -> tauri::plugin::TauriPlugin<R> {
      let Builder {
         connection,
         observer,
      } = self;

      PluginBuilder::<R>::new("mysql")
         .invoke_handler(tauri::generate_handler![
            commands::open,
            commands::close,
            commands::is_open,
            commands::get_config,
            commands::set_port,
            commands::set_host_name,
            commands::set_user_name,
            commands::set_password,
            commands::set_database_name,
         ])
         .setup(move |app, _api| {
            let db = global_database(connection, observer);
            events::forward_changes(app.clone(), db);
            Ok(())
         })
         .on_event(|_app, event| {
            if let RunEvent::Exit = event {
               close_on_exit(ObservableMySqlDatabase::global());
            }
         })
         .build()
   }
}

/// Initializes the plugin with default configuration.
pub fn init<R: Runtime>() -> tauri::plugin::TauriPlugin<R> {
   Builder::new().build()
}

/// Closes the connection without waiting on a connect that may never finish
fn close_on_exit(db: &ObservableMySqlDatabase) {
   if !db.is_open() {
      return;
   }
   if !tauri::async_runtime::block_on(db.try_close()) {
      log::warn!("MySQL connection busy at exit; leaving it to the server to drop");
   }
}

fn global_database(
   connection: Option<MySqlConnectionConfig>,
   observer: Option<ObserverConfig>,
) -> &'static ObservableMySqlDatabase {
   if connection.is_none() && observer.is_none() {
      return ObservableMySqlDatabase::global();
   }

   match ObservableMySqlDatabase::init(connection.unwrap_or_default(), observer.unwrap_or_default()) {
      Ok(db) => db,
      Err(e) => {
         log::warn!("{e}; plugin configuration ignored");
         ObservableMySqlDatabase::global()
      }
   }
}

#[cfg(test)]
mod tests {
   use std::sync::Arc;

   use sqlx_mysql_observer::MySqlDatabase;

   use super::*;

   #[test]
   fn test_close_on_exit_skips_closed_connection() {
      let db = ObservableMySqlDatabase::new(Arc::new(MySqlDatabase::default()), ObserverConfig::new());
      let mut rx = db.subscribe();

      close_on_exit(&db);

      assert!(!db.is_open());
      assert!(rx.try_recv().is_err());
   }
}
