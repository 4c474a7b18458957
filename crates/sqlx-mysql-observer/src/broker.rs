use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::trace;

use crate::change::ConnectionChange;

/// Fans connection changes out to every subscriber.
///
/// Publishing never blocks and never fails; a change sent while nobody is
/// subscribed is simply dropped.
#[derive(Debug)]
pub struct ObservationBroker {
   sender: broadcast::Sender<ConnectionChange>,
}

impl ObservationBroker {
   pub fn new(channel_capacity: usize) -> Arc<Self> {
      let (sender, _) = broadcast::channel(channel_capacity.max(1));
      Arc::new(Self { sender })
   }

   pub fn subscribe(&self) -> broadcast::Receiver<ConnectionChange> {
      self.sender.subscribe()
   }

   pub fn publish(&self, change: ConnectionChange) {
      let property = change.property;
      if self.sender.send(change).is_err() {
         trace!(%property, "No subscribers for connection change");
      }
   }

   /// Number of live subscribers.
   pub fn subscriber_count(&self) -> usize {
      self.sender.receiver_count()
   }
}
