use std::fmt;
use std::time::Instant;

/// An observable property of the connection manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
   Port,
   HostName,
   UserName,
   Password,
   DatabaseName,
   /// The open/closed state of the connection
   Open,
}

impl Property {
   /// All properties, in declaration order.
   pub const ALL: [Property; 6] = [
      Property::Port,
      Property::HostName,
      Property::UserName,
      Property::Password,
      Property::DatabaseName,
      Property::Open,
   ];

   /// Stable camelCase name, suitable for event payloads.
   pub fn name(self) -> &'static str {
      match self {
         Property::Port => "port",
         Property::HostName => "hostName",
         Property::UserName => "userName",
         Property::Password => "password",
         Property::DatabaseName => "databaseName",
         Property::Open => "isOpen",
      }
   }
}

impl fmt::Display for Property {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str(self.name())
   }
}

/// A set of [`Property`] values, used to pick which changes a stream yields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropertySet(u8);

impl PropertySet {
   pub const EMPTY: PropertySet = PropertySet(0);
   pub const ALL: PropertySet = PropertySet((1 << Property::ALL.len()) - 1);

   pub fn contains(self, property: Property) -> bool {
      self.0 & bit(property) != 0
   }

   pub fn insert(&mut self, property: Property) {
      self.0 |= bit(property);
   }

   pub fn is_empty(self) -> bool {
      self.0 == 0
   }
}

impl FromIterator<Property> for PropertySet {
   fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
      let mut set = PropertySet::EMPTY;
      for property in iter {
         set.insert(property);
      }
      set
   }
}

fn bit(property: Property) -> u8 {
   1 << property as u8
}

/// Notification that a property of the connection manager was written.
///
/// Carries no values; listeners read the current value back from the
/// manager. `Open` notifications are sent after every `open()` and `close()`
/// call, including ones that did not change the state, so `was_open` and
/// `is_open` are included to tell the two apart.
#[derive(Debug, Clone)]
pub struct ConnectionChange {
   pub property: Property,
   /// Open state just before the operation that produced this change
   pub was_open: bool,
   /// Open state just after it
   pub is_open: bool,
   pub timestamp: Instant,
}

impl ConnectionChange {
   pub fn new(property: Property, was_open: bool, is_open: bool) -> Self {
      Self {
         property,
         was_open,
         is_open,
         timestamp: Instant::now(),
      }
   }

   /// Returns true if the connection actually opened or closed.
   pub fn is_transition(&self) -> bool {
      self.was_open != self.is_open
   }
}

/// Item yielded by [`ConnectionChangeStream`](crate::ConnectionChangeStream).
#[derive(Debug, Clone)]
pub enum ConnectionChangeEvent {
   Change(ConnectionChange),
   /// The subscriber fell behind and this many notifications were dropped.
   Lagged(u64),
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_property_names_are_unique() {
      let mut names: Vec<_> = Property::ALL.iter().map(|p| p.name()).collect();
      names.sort_unstable();
      names.dedup();
      assert_eq!(names.len(), Property::ALL.len());
   }

   #[test]
   fn test_property_set_membership() {
      let set: PropertySet = [Property::Open, Property::HostName, Property::Open]
         .into_iter()
         .collect();

      assert!(set.contains(Property::Open));
      assert!(set.contains(Property::HostName));
      assert!(!set.contains(Property::Password));
      assert!(PropertySet::EMPTY.is_empty());
      assert!(Property::ALL.iter().all(|p| PropertySet::ALL.contains(*p)));
      assert_eq!(Property::ALL.into_iter().collect::<PropertySet>(), PropertySet::ALL);
   }

   #[test]
   fn test_is_transition() {
      assert!(ConnectionChange::new(Property::Open, false, true).is_transition());
      assert!(ConnectionChange::new(Property::Open, true, false).is_transition());
      assert!(!ConnectionChange::new(Property::Open, false, false).is_transition());
      assert!(!ConnectionChange::new(Property::Port, true, true).is_transition());
   }
}
