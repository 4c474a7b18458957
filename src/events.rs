//! Forwards connection changes to the webview as Tauri events

use futures::StreamExt;
use serde::Serialize;
use sqlx_mysql_observer::{ConnectionChange, ConnectionChangeEvent, ObservableMySqlDatabase};
use tauri::{AppHandle, Emitter, Runtime};

/// Event emitted for every connection change.
pub const CHANGE_EVENT: &str = "mysql://change";

/// Payload of [`CHANGE_EVENT`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePayload {
   /// Which property was written, e.g. `"hostName"` or `"isOpen"`
   pub property: &'static str,
   pub was_open: bool,
   pub is_open: bool,
}

impl From<&ConnectionChange> for ChangePayload {
   fn from(change: &ConnectionChange) -> Self {
      Self {
         property: change.property.name(),
         was_open: change.was_open,
         is_open: change.is_open,
      }
   }
}

/// Spawns a task emitting [`CHANGE_EVENT`] for each change published by `db`.
///
/// The task runs for the life of the app; the global instance's broadcast
/// channel never closes.
pub(crate) fn forward_changes<R: Runtime>(app: AppHandle<R>, db: &ObservableMySqlDatabase) {
   let mut stream = db.subscribe_stream([]);

   tauri::async_runtime::spawn(async move {
      while let Some(event) = stream.next().await {
         match event {
            ConnectionChangeEvent::Change(change) => {
               let payload = ChangePayload::from(&change);
               if let Err(e) = app.emit(CHANGE_EVENT, payload) {
                  log::warn!("Failed to emit {} for {}: {e}", CHANGE_EVENT, change.property);
               }
            }
            ConnectionChangeEvent::Lagged(missed) => {
               log::warn!("Dropped {missed} connection change events before they reached the webview");
            }
         }
      }
   });
}
