//! Typed collection notifications.

use crate::collection::Collection;
use crate::model::Model;

/// A notification fired by a [`Collection`] after a mutation settles.
///
/// Each variant carries the affected models so a subscriber can update its
/// derived state without re-querying the collection.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionEvent<T> {
    Added(Model<T>),
    Removed(Model<T>),
    Reset(Vec<Model<T>>),
    Changed(Model<T>),
}

impl<T> CollectionEvent<T> {
    pub fn kind(&self) -> &'static str {
        match self {
            CollectionEvent::Added(_) => "add",
            CollectionEvent::Removed(_) => "remove",
            CollectionEvent::Reset(_) => "reset",
            CollectionEvent::Changed(_) => "change",
        }
    }
}

/// Receives a collection's notifications.
///
/// `collection` is the state after the mutation. It is shared, so an
/// observer cannot mutate the collection from inside a notification.
pub trait Observer<T> {
    fn observe(&self, event: &CollectionEvent<T>, collection: &Collection<T>);
}
