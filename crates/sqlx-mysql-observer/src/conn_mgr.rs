//! Integration with sqlx-mysql-conn-mgr crate.
//!
//! [`ObservableMySqlDatabase`] wraps a `MySqlDatabase` and publishes a
//! [`ConnectionChange`] for every configuration write and every
//! `open()`/`close()` call. It also owns the process-wide instance.
//!
//! # Example
//!
//! ```no_run
//! use sqlx_mysql_observer::{ObservableMySqlDatabase, Property};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!    let db = ObservableMySqlDatabase::global();
//!    let mut rx = db.subscribe();
//!
//!    db.set_user_name("app");
//!    db.set_database_name("inventory");
//!
//!    if let Err(e) = db.open().await {
//!       eprintln!("{e}");
//!    }
//!
//!    // Every write produced one notification; the last is for `open()`
//!    while let Ok(change) = rx.try_recv() {
//!       if change.property == Property::Open {
//!          println!("open: {}", change.is_open);
//!       }
//!    }
//!
//!    db.close().await;
//!    Ok(())
//! }
//! ```

use std::sync::{Arc, OnceLock};

use sqlx_mysql_conn_mgr::{ConnectionGuard, MySqlConnectionConfig, MySqlDatabase, StateTransition};
use tokio::sync::broadcast;
use tracing::debug;

use crate::Result;
use crate::broker::ObservationBroker;
use crate::change::{ConnectionChange, Property, PropertySet};
use crate::config::ObserverConfig;
use crate::error::Error;
use crate::stream::{ConnectionChangeStream, change_stream};

static GLOBAL: OnceLock<ObservableMySqlDatabase> = OnceLock::new();

/// Wrapper around `MySqlDatabase` that provides change observation.
///
/// Applications normally use the single process-wide instance from
/// [`global`](Self::global) or [`init`](Self::init). [`new`](Self::new) builds
/// an independent instance for embedding or tests.
pub struct ObservableMySqlDatabase {
   db: Arc<MySqlDatabase>,
   broker: Arc<ObservationBroker>,
}

impl ObservableMySqlDatabase {
   /// Create a new observable database wrapper.
   ///
   /// # Arguments
   ///
   /// * `db` - The `MySqlDatabase` instance to observe
   /// * `config` - Observer configuration
   pub fn new(db: Arc<MySqlDatabase>, config: ObserverConfig) -> Self {
      let broker = ObservationBroker::new(config.channel_capacity);
      Self { db, broker }
   }

   /// Returns the process-wide instance, creating it with the default
   /// connection configuration (`localhost:3306`, no credentials) on first use.
   ///
   /// Safe to call from any thread; exactly one instance is ever created.
   pub fn global() -> &'static Self {
      GLOBAL.get_or_init(|| {
         debug!("Creating global MySQL connection manager with default configuration");
         Self::new(Arc::new(MySqlDatabase::default()), ObserverConfig::default())
      })
   }

   /// Creates the process-wide instance with an explicit configuration.
   ///
   /// Call this once at startup, before anything calls [`global`](Self::global).
   /// Returns [`Error::AlreadyInitialized`] if the instance already exists,
   /// leaving the existing one untouched.
   pub fn init(connection: MySqlConnectionConfig, config: ObserverConfig) -> Result<&'static Self> {
      let mut created = false;
      let instance = GLOBAL.get_or_init(|| {
         created = true;
         Self::new(Arc::new(MySqlDatabase::new(connection)), config)
      });

      if created {
         debug!("Initialized global MySQL connection manager");
         Ok(instance)
      } else {
         Err(Error::AlreadyInitialized)
      }
   }

   /// Subscribe to change notifications for every property.
   ///
   /// Use [`subscribe_stream`](Self::subscribe_stream) for filtered delivery.
   pub fn subscribe(&self) -> broadcast::Receiver<ConnectionChange> {
      self.broker.subscribe()
   }

   /// Subscribe and get a `Stream` for easier async iteration.
   ///
   /// Only changes to the given properties are yielded; an empty list yields
   /// everything.
   pub fn subscribe_stream<I>(&self, properties: I) -> ConnectionChangeStream
   where
      I: IntoIterator<Item = Property>,
   {
      let mut properties: PropertySet = properties.into_iter().collect();
      if properties.is_empty() {
         properties = PropertySet::ALL;
      }
      change_stream(self.broker.subscribe(), properties)
   }

   /// Opens the connection with the current configuration.
   ///
   /// Publishes one `Open` change afterwards whether or not the attempt
   /// succeeded, then returns the outcome.
   pub async fn open(&self) -> Result<()> {
      let (transition, result) = self.db.open_with_transition().await;
      self.publish_open_change(transition);
      result.map_err(Error::ConnMgr)
   }

   /// Closes the connection. Publishes one `Open` change even if nothing
   /// was open.
   pub async fn close(&self) {
      let transition = self.db.close().await;
      self.publish_open_change(transition);
   }

   /// Closes the connection unless an `open()` is still connecting or a
   /// [`ConnectionGuard`] is held, in which case nothing happens and `false`
   /// is returned. Publishes an `Open` change only when the close ran.
   pub async fn try_close(&self) -> bool {
      match self.db.try_close().await {
         Some(transition) => {
            self.publish_open_change(transition);
            true
         }
         None => {
            debug!("Connection busy, close skipped");
            false
         }
      }
   }

   /// Acquires exclusive access to the live connection.
   pub async fn acquire(&self) -> Result<ConnectionGuard> {
      self.db.acquire().await.map_err(Error::ConnMgr)
   }

   pub fn is_open(&self) -> bool {
      self.db.is_open()
   }

   pub fn config(&self) -> MySqlConnectionConfig {
      self.db.config()
   }

   pub fn live_config(&self) -> Option<MySqlConnectionConfig> {
      self.db.live_config()
   }

   pub fn port(&self) -> u16 {
      self.db.port()
   }

   pub fn host_name(&self) -> String {
      self.db.host_name()
   }

   pub fn user_name(&self) -> String {
      self.db.user_name()
   }

   pub fn password(&self) -> String {
      self.db.password()
   }

   pub fn database_name(&self) -> String {
      self.db.database_name()
   }

   pub fn set_port(&self, port: u16) {
      self.db.set_port(port);
      self.publish(Property::Port);
   }

   pub fn set_host_name(&self, host_name: impl Into<String>) {
      self.db.set_host_name(host_name);
      self.publish(Property::HostName);
   }

   pub fn set_user_name(&self, user_name: impl Into<String>) {
      self.db.set_user_name(user_name);
      self.publish(Property::UserName);
   }

   pub fn set_password(&self, password: impl Into<String>) {
      self.db.set_password(password);
      self.publish(Property::Password);
   }

   pub fn set_database_name(&self, database_name: impl Into<String>) {
      self.db.set_database_name(database_name);
      self.publish(Property::DatabaseName);
   }

   /// Get the underlying `MySqlDatabase`.
   ///
   /// Writes made directly through it are not observed.
   pub fn inner(&self) -> &Arc<MySqlDatabase> {
      &self.db
   }

   /// Returns a reference to the underlying observation broker.
   pub fn broker(&self) -> &Arc<ObservationBroker> {
      &self.broker
   }

   fn publish(&self, property: Property) {
      let is_open = self.db.is_open();
      self
         .broker
         .publish(ConnectionChange::new(property, is_open, is_open));
   }

   fn publish_open_change(&self, transition: StateTransition) {
      let StateTransition { was_open, is_open } = transition;
      debug!(was_open, is_open, "Connection open state notified");
      self
         .broker
         .publish(ConnectionChange::new(Property::Open, was_open, is_open));
   }
}

impl Clone for ObservableMySqlDatabase {
   fn clone(&self) -> Self {
      Self {
         db: Arc::clone(&self.db),
         broker: Arc::clone(&self.broker),
      }
   }
}
