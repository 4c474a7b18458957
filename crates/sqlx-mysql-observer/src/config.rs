/// Configuration for change observation.
///
/// # Examples
///
/// ```
/// use sqlx_mysql_observer::ObserverConfig;
///
/// let config = ObserverConfig::new().with_channel_capacity(32);
/// assert_eq!(config.channel_capacity, 32);
/// ```
#[derive(Debug, Clone)]
pub struct ObserverConfig {
   /// Capacity of the broadcast channel. Subscribers that fall further behind
   /// than this receive a `Lagged` event instead of the missed changes.
   ///
   /// Default: 256
   pub channel_capacity: usize,
}

impl Default for ObserverConfig {
   fn default() -> Self {
      Self {
         channel_capacity: 256,
      }
   }
}

impl ObserverConfig {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
      self.channel_capacity = capacity;
      self
   }
}
