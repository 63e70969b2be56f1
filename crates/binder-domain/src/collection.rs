//! Ordered, observable list of models.
//!
//! Insertion order is the canonical render order. Every mutation fires one
//! [`CollectionEvent`] to the subscribed observers, synchronously and in
//! registration order, before the mutating call returns.
//!
//! Observers are held weakly: the collection never keeps a subscriber alive,
//! and observers whose owner has been dropped are pruned on the next
//! dispatch.

use crate::events::{CollectionEvent, Observer};
use crate::model::{Cid, Model};
use binder_core::{BinderError, BinderResult, IdIssuer};
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

pub struct Collection<T> {
    models: Vec<Model<T>>,
    cids: IdIssuer,
    observers: RefCell<Vec<Weak<dyn Observer<T>>>>,
}

impl<T> Collection<T> {
    pub fn new() -> Self {
        Self::with_cid_issuer(IdIssuer::new())
    }

    /// Use `cids` to number the models this collection holds.
    pub fn with_cid_issuer(cids: IdIssuer) -> Self {
        Self {
            models: Vec::new(),
            cids,
            observers: RefCell::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Model<T>> {
        self.models.iter()
    }

    pub fn get(&self, cid: Cid) -> Option<&Model<T>> {
        self.models.iter().find(|m| m.cid() == cid)
    }

    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<&Model<T>> {
        self.models.iter().find(|m| predicate(m.get()))
    }

    pub fn cids(&self) -> Vec<Cid> {
        self.models.iter().map(Model::cid).collect()
    }

    pub fn records(&self) -> Vec<&T> {
        self.models.iter().map(Model::get).collect()
    }

    /// Register an observer. Only a weak reference is kept.
    pub fn subscribe<O: Observer<T> + 'static>(&self, observer: &Rc<O>) {
        let observer: Rc<dyn Observer<T>> = observer.clone();
        self.observers.borrow_mut().push(Rc::downgrade(&observer));
    }

    /// Number of observers still alive.
    pub fn observer_count(&self) -> usize {
        self.observers
            .borrow()
            .iter()
            .filter(|o| o.strong_count() > 0)
            .count()
    }

    fn emit(&self, event: CollectionEvent<T>) {
        let live: Vec<Rc<dyn Observer<T>>> = {
            let mut observers = self.observers.borrow_mut();
            observers.retain(|o| o.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect()
        };
        for observer in live {
            observer.observe(&event, self);
        }
    }

    fn issue_cid(&mut self) -> BinderResult<Cid> {
        Ok(Cid::new(self.cids.next_id()?))
    }
}

impl<T: Clone + PartialEq> Collection<T> {
    /// Append a model and announce it with [`CollectionEvent::Added`].
    pub fn add(&mut self, attrs: T) -> BinderResult<Cid> {
        let cid = self.issue_cid()?;
        let model = Model::new(cid, attrs);
        self.models.push(model.clone());
        self.emit(CollectionEvent::Added(model));
        Ok(cid)
    }

    /// Remove by cid. Unknown cids are ignored and fire nothing.
    pub fn remove(&mut self, cid: Cid) -> Option<Model<T>> {
        let index = self.models.iter().position(|m| m.cid() == cid)?;
        let model = self.models.remove(index);
        self.emit(CollectionEvent::Removed(model.clone()));
        Some(model)
    }

    /// Remove the first model whose record matches `predicate`.
    pub fn remove_where(&mut self, predicate: impl Fn(&T) -> bool) -> Option<Model<T>> {
        let cid = self.find(predicate)?.cid();
        self.remove(cid)
    }

    /// Replace the whole contents. Old models and their cids are discarded;
    /// one [`CollectionEvent::Reset`] is fired for the new set. On error
    /// the contents are left as they were.
    pub fn reset(&mut self, items: Vec<T>) -> BinderResult<()> {
        let models = items
            .into_iter()
            .map(|attrs| Ok(Model::new(self.issue_cid()?, attrs)))
            .collect::<BinderResult<Vec<Model<T>>>>()?;
        self.models = models.clone();
        self.emit(CollectionEvent::Reset(models));
        Ok(())
    }

    /// Mutate one model in place. Fires [`CollectionEvent::Changed`] and
    /// returns `true` only if the record actually changed.
    pub fn update(&mut self, cid: Cid, f: impl FnOnce(&mut T)) -> BinderResult<bool> {
        let model = self
            .models
            .iter_mut()
            .find(|m| m.cid() == cid)
            .ok_or_else(|| BinderError::NotFound(format!("model {}", cid)))?;
        if !model.update(f) {
            return Ok(false);
        }
        let snapshot = model.clone();
        self.emit(CollectionEvent::Changed(snapshot));
        Ok(true)
    }

    pub fn set(&mut self, cid: Cid, attrs: T) -> BinderResult<bool> {
        let model = self
            .models
            .iter_mut()
            .find(|m| m.cid() == cid)
            .ok_or_else(|| BinderError::NotFound(format!("model {}", cid)))?;
        if !model.set(attrs) {
            return Ok(false);
        }
        let snapshot = model.clone();
        self.emit(CollectionEvent::Changed(snapshot));
        Ok(true)
    }
}

impl<T: Serialize> Collection<T> {
    /// Compact JSON array of the records, in collection order.
    pub fn to_json(&self) -> BinderResult<String> {
        serde_json::to_string(&self.records())
            .map_err(|e| BinderError::Serialization(e.to_string()))
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("models", &self.models)
            .field("observers", &self.observer_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        seen: RefCell<Vec<(String, usize)>>,
    }

    impl Observer<String> for Recorder {
        fn observe(&self, event: &CollectionEvent<String>, collection: &Collection<String>) {
            self.seen
                .borrow_mut()
                .push((event.kind().to_string(), collection.len()));
        }
    }

    fn kinds(recorder: &Recorder) -> Vec<String> {
        recorder.seen.borrow().iter().map(|(k, _)| k.clone()).collect()
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut collection = Collection::new();
        collection.add("a".to_string()).unwrap();
        collection.add("b".to_string()).unwrap();
        collection.add("c".to_string()).unwrap();

        let records: Vec<&String> = collection.records();
        assert_eq!(records, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_cids_are_unique_and_stable() {
        let mut collection = Collection::new();
        let a = collection.add("a".to_string()).unwrap();
        let b = collection.add("b".to_string()).unwrap();
        assert_ne!(a, b);

        collection.update(a, |s| s.push('!')).unwrap();
        assert_eq!(collection.get(a).unwrap().cid(), a);
        assert_eq!(collection.get(a).unwrap().get(), "a!");
    }

    #[test]
    fn test_observer_sees_state_after_mutation() {
        let recorder = Rc::new(Recorder::default());
        let mut collection = Collection::new();
        collection.subscribe(&recorder);

        let cid = collection.add("a".to_string()).unwrap();
        collection.add("b".to_string()).unwrap();
        collection.remove(cid);
        collection.reset(vec![]).unwrap();

        assert_eq!(
            *recorder.seen.borrow(),
            vec![
                ("add".to_string(), 1),
                ("add".to_string(), 2),
                ("remove".to_string(), 1),
                ("reset".to_string(), 0),
            ]
        );
    }

    #[test]
    fn test_remove_unknown_cid_fires_nothing() {
        let recorder = Rc::new(Recorder::default());
        let mut collection: Collection<String> = Collection::new();
        collection.subscribe(&recorder);

        assert!(collection.remove(Cid::new(99)).is_none());
        assert!(recorder.seen.borrow().is_empty());
    }

    #[test]
    fn test_remove_where_matches_record() {
        let mut collection = Collection::new();
        collection.add("keep".to_string()).unwrap();
        collection.add("drop".to_string()).unwrap();

        let removed = collection.remove_where(|s| s == "drop").unwrap();
        assert_eq!(removed.get(), "drop");
        assert_eq!(collection.records(), vec!["keep"]);
    }

    #[test]
    fn test_reset_discards_old_cids() {
        let mut collection = Collection::new();
        let old = collection.add("a".to_string()).unwrap();
        collection.reset(vec!["x".to_string(), "y".to_string()]).unwrap();

        assert!(collection.get(old).is_none());
        assert_eq!(collection.len(), 2);
        assert!(!collection.cids().contains(&old));
    }

    #[test]
    fn test_update_without_change_is_silent() {
        let recorder = Rc::new(Recorder::default());
        let mut collection = Collection::new();
        let cid = collection.add("a".to_string()).unwrap();
        collection.subscribe(&recorder);

        assert!(!collection.update(cid, |_| {}).unwrap());
        assert!(collection.update(cid, |s| s.push('b')).unwrap());
        assert_eq!(kinds(&recorder), vec!["change"]);
    }

    #[test]
    fn test_update_unknown_cid_is_not_found() {
        let mut collection: Collection<String> = Collection::new();
        let err = collection.update(Cid::new(5), |_| {}).unwrap_err();
        assert!(matches!(err, BinderError::NotFound(_)));
    }

    #[test]
    fn test_dropped_observer_is_pruned() {
        let recorder = Rc::new(Recorder::default());
        let mut collection = Collection::new();
        collection.subscribe(&recorder);
        assert_eq!(collection.observer_count(), 1);

        drop(recorder);
        collection.add("a".to_string()).unwrap();
        assert_eq!(collection.observer_count(), 0);
    }

    #[test]
    fn test_observers_notified_in_registration_order() {
        struct Tagged {
            tag: &'static str,
            log: Rc<RefCell<Vec<&'static str>>>,
        }

        impl Observer<String> for Tagged {
            fn observe(&self, _: &CollectionEvent<String>, _: &Collection<String>) {
                self.log.borrow_mut().push(self.tag);
            }
        }

        let log = Rc::new(RefCell::new(Vec::new()));
        let first = Rc::new(Tagged {
            tag: "first",
            log: log.clone(),
        });
        let second = Rc::new(Tagged {
            tag: "second",
            log: log.clone(),
        });

        let mut collection = Collection::new();
        collection.subscribe(&first);
        collection.subscribe(&second);
        collection.add("a".to_string()).unwrap();

        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_to_json_is_compact_array_in_order() {
        let mut collection = Collection::new();
        collection.add("a".to_string()).unwrap();
        collection.add("b".to_string()).unwrap();
        assert_eq!(collection.to_json().unwrap(), r#"["a","b"]"#);
    }

    #[test]
    fn test_set_replaces_record_and_notifies() {
        let recorder = Rc::new(Recorder::default());
        let mut collection = Collection::new();
        let cid = collection.add("a".to_string()).unwrap();
        collection.subscribe(&recorder);

        assert!(collection.set(cid, "b".to_string()).unwrap());
        assert!(!collection.set(cid, "b".to_string()).unwrap());

        assert_eq!(collection.get(cid).unwrap().get(), "b");
        assert_eq!(kinds(&recorder), vec!["change"]);
        assert!(collection.set(Cid::new(99), "c".to_string()).is_err());
    }

    #[test]
    fn test_exhausted_cids_leave_collection_untouched() {
        let recorder = Rc::new(Recorder::default());
        let mut collection = Collection::with_cid_issuer(IdIssuer::starting_at(u64::MAX));
        collection.subscribe(&recorder);
        collection.add("last".to_string()).unwrap();

        assert!(collection.add("one more".to_string()).is_err());
        assert!(collection.reset(vec!["x".to_string()]).is_err());

        assert_eq!(collection.records(), vec!["last"]);
        assert_eq!(kinds(&recorder), vec!["add"]);
    }
}
