use std::pin::Pin;

use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::{Stream, StreamExt};
use tracing::warn;

use crate::change::{ConnectionChange, ConnectionChangeEvent, PropertySet};

/// Stream of connection changes for a chosen set of properties.
///
/// Returned by [`subscribe_stream`](crate::ObservableMySqlDatabase::subscribe_stream).
/// A subscriber that falls behind gets one [`ConnectionChangeEvent::Lagged`]
/// for the notifications it missed, then continues with the oldest retained one.
pub type ConnectionChangeStream = Pin<Box<dyn Stream<Item = ConnectionChangeEvent> + Send>>;

pub(crate) fn change_stream(
   rx: broadcast::Receiver<ConnectionChange>,
   properties: PropertySet,
) -> ConnectionChangeStream {
   let events = BroadcastStream::new(rx).filter_map(move |received| match received {
      Ok(change) if properties.contains(change.property) => {
         Some(ConnectionChangeEvent::Change(change))
      }
      Ok(_) => None,
      Err(BroadcastStreamRecvError::Lagged(missed)) => {
         warn!(missed, "Connection change subscriber lagged");
         Some(ConnectionChangeEvent::Lagged(missed))
      }
   });

   Box::pin(events)
}
