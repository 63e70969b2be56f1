use binder_core::{BinderError, BinderResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Client id: the bookkeeping identifier a [`Collection`](crate::Collection)
/// assigns to each model it holds. Unique within its collection and fixed
/// for the model's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cid(u64);

impl Cid {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// A record with named fields held by a collection.
///
/// The attribute type `T` declares the field set; `T::default()` provides the
/// default values. Mutation goes through the owning collection so that every
/// change is announced to its observers.
#[derive(Debug, Clone, PartialEq)]
pub struct Model<T> {
    cid: Cid,
    attrs: T,
}

impl<T> Model<T> {
    pub(crate) fn new(cid: Cid, attrs: T) -> Self {
        Self { cid, attrs }
    }

    pub fn cid(&self) -> Cid {
        self.cid
    }

    pub fn get(&self) -> &T {
        &self.attrs
    }
}

impl<T: PartialEq> Model<T> {
    /// Replace the record. Returns `false` when the value is unchanged.
    pub(crate) fn set(&mut self, attrs: T) -> bool {
        if self.attrs == attrs {
            return false;
        }
        self.attrs = attrs;
        true
    }
}

impl<T: PartialEq + Clone> Model<T> {
    pub(crate) fn update(&mut self, f: impl FnOnce(&mut T)) -> bool {
        let before = self.attrs.clone();
        f(&mut self.attrs);
        self.attrs != before
    }
}

impl<T: Serialize> Model<T> {
    /// The record as a JSON object keyed by field name.
    pub fn attributes(&self) -> BinderResult<Map<String, Value>> {
        match serde_json::to_value(&self.attrs)
            .map_err(|e| BinderError::Serialization(e.to_string()))?
        {
            Value::Object(map) => Ok(map),
            other => Err(BinderError::Serialization(format!(
                "model {} does not serialize to an object: {}",
                self.cid, other
            ))),
        }
    }

    pub fn attribute(&self, key: &str) -> BinderResult<Option<Value>> {
        Ok(self.attributes()?.remove(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq, Serialize)]
    struct Note {
        text: String,
        pinned: bool,
    }

    #[test]
    fn test_set_reports_change() {
        let mut model = Model::new(Cid::new(1), Note::default());
        assert!(model.set(Note {
            text: "hi".to_string(),
            pinned: false,
        }));
        assert_eq!(model.get().text, "hi");
    }

    #[test]
    fn test_set_same_value_is_noop() {
        let mut model = Model::new(Cid::new(1), Note::default());
        assert!(!model.set(Note::default()));
    }

    #[test]
    fn test_update_detects_change() {
        let mut model = Model::new(Cid::new(1), Note::default());
        assert!(model.update(|n| n.pinned = true));
        assert!(!model.update(|n| n.pinned = true));
    }

    #[test]
    fn test_attributes_use_field_names_and_defaults() {
        let model = Model::new(Cid::new(7), Note::default());
        let attrs = model.attributes().unwrap();
        assert_eq!(attrs["text"], "");
        assert_eq!(attrs["pinned"], false);
        assert_eq!(model.attribute("missing").unwrap(), None);
    }

    #[test]
    fn test_non_object_attributes_are_rejected() {
        let model = Model::new(Cid::new(3), 42u32);
        assert!(model.attributes().is_err());
    }

    #[test]
    fn test_cid_display() {
        assert_eq!(Cid::new(12).to_string(), "c12");
    }
}
