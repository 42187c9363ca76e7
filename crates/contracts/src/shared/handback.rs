//! Hand-back payloads between a detail view and its list view
//!
//! A detail view never mutates the list it came from. After a save or a
//! delete it hands back one named payload (`newContact`, `updatedContact`,
//! `deletedContactId`, ...) and the list view folds it into its local copy.

use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::domain::common::AggregateId;

/// A record that can travel in a hand-back payload
pub trait HandbackRecord: Clone + Serialize + DeserializeOwned {
    type Id: AggregateId;

    /// Entity name used to build the payload key (`"Contact"` -> `newContact`)
    fn entity_name() -> &'static str;

    fn record_id(&self) -> Self::Id;

    /// Display order of the list view; insertion order by default
    fn sort_list(_items: &mut [Self]) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum Handback<T: HandbackRecord> {
    New(T),
    Updated(T),
    Deleted(T::Id),
}

impl<T: HandbackRecord> Handback<T> {
    pub fn key(&self) -> String {
        match self {
            Handback::New(_) => format!("new{}", T::entity_name()),
            Handback::Updated(_) => format!("updated{}", T::entity_name()),
            Handback::Deleted(_) => format!("deleted{}Id", T::entity_name()),
        }
    }

    /// Parses `{"<key>": <payload>}`; `None` for any other shape or entity
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let map = value.as_object()?;
        if map.len() != 1 {
            return None;
        }
        let (key, payload) = map.iter().next()?;
        let entity = T::entity_name();

        if key == &format!("new{}", entity) {
            serde_json::from_value(payload.clone()).ok().map(Handback::New)
        } else if key == &format!("updated{}", entity) {
            serde_json::from_value(payload.clone())
                .ok()
                .map(Handback::Updated)
        } else if key == &format!("deleted{}Id", entity) {
            let id = T::Id::from_string(payload.as_str()?).ok()?;
            Some(Handback::Deleted(id))
        } else {
            None
        }
    }
}

impl<T: HandbackRecord> Serialize for Handback<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Handback::New(record) | Handback::Updated(record) => {
                map.serialize_entry(&self.key(), record)?
            }
            Handback::Deleted(id) => map.serialize_entry(&self.key(), &id.as_string())?,
        }
        map.end()
    }
}

/// Local copy of a list view, reconciled through hand-back payloads
#[derive(Debug, Clone)]
pub struct ListView<T: HandbackRecord> {
    items: Vec<T>,
}

impl<T: HandbackRecord> ListView<T> {
    pub fn new(mut items: Vec<T>) -> Self {
        T::sort_list(&mut items);
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Folds one payload into the list. Returns whether the list changed.
    ///
    /// Applying the same payload twice leaves the list as after the first
    /// application; a `New` whose id is already listed is ignored.
    pub fn apply(&mut self, handback: Handback<T>) -> bool {
        let changed = match handback {
            Handback::New(record) => {
                let id = record.record_id();
                if self.items.iter().any(|r| r.record_id() == id) {
                    false
                } else {
                    self.items.push(record);
                    true
                }
            }
            Handback::Updated(record) => {
                let id = record.record_id();
                match self.items.iter_mut().find(|r| r.record_id() == id) {
                    Some(slot) => {
                        *slot = record;
                        true
                    }
                    None => false,
                }
            }
            Handback::Deleted(id) => {
                let before = self.items.len();
                self.items.retain(|r| r.record_id() != id);
                self.items.len() != before
            }
        };
        if changed {
            T::sort_list(&mut self.items);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    crate::uuid_aggregate_id!(NoteId);

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: NoteId,
        text: String,
    }

    impl HandbackRecord for Note {
        type Id = NoteId;

        fn entity_name() -> &'static str {
            "Note"
        }

        fn record_id(&self) -> NoteId {
            self.id
        }

        fn sort_list(items: &mut [Self]) {
            items.sort_by(|a, b| a.text.cmp(&b.text));
        }
    }

    fn note(text: &str) -> Note {
        Note {
            id: NoteId::new_v4(),
            text: text.into(),
        }
    }

    #[test]
    fn test_payload_keys() {
        let n = note("a");
        assert_eq!(Handback::New(n.clone()).key(), "newNote");
        assert_eq!(Handback::Updated(n.clone()).key(), "updatedNote");
        assert_eq!(Handback::<Note>::Deleted(n.id).key(), "deletedNoteId");
    }

    #[test]
    fn test_serialize_and_parse_payload() {
        let n = note("hello");
        let json = serde_json::to_value(Handback::New(n.clone())).unwrap();
        assert_eq!(json["newNote"]["text"], "hello");
        assert_eq!(Handback::<Note>::from_json(&json), Some(Handback::New(n.clone())));

        let json = serde_json::to_value(Handback::<Note>::Deleted(n.id)).unwrap();
        assert_eq!(json["deletedNoteId"], n.id.to_string());
        assert_eq!(Handback::<Note>::from_json(&json), Some(Handback::Deleted(n.id)));
    }

    #[test]
    fn test_parse_rejects_other_entities() {
        let json = serde_json::json!({ "newContact": { "id": "x" } });
        assert!(Handback::<Note>::from_json(&json).is_none());
    }

    #[test]
    fn test_duplicate_new_is_ignored() {
        let n = note("b");
        let mut view = ListView::new(vec![note("a")]);
        assert!(view.apply(Handback::New(n.clone())));
        assert!(!view.apply(Handback::New(n)));
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn test_update_replaces_and_resorts() {
        let a = note("a");
        let b = note("b");
        let mut view = ListView::new(vec![b.clone(), a.clone()]);
        assert_eq!(view.items()[0].text, "a");

        let mut renamed = a.clone();
        renamed.text = "c".into();
        assert!(view.apply(Handback::Updated(renamed)));
        assert_eq!(view.items()[0].id, b.id);
        assert_eq!(view.items()[1].text, "c");
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let a = note("a");
        let b = note("b");
        let mut view = ListView::new(vec![a.clone(), b.clone()]);
        assert!(view.apply(Handback::Deleted(a.id)));
        assert!(!view.apply(Handback::Deleted(a.id)));
        assert_eq!(view.items(), &[b]);
    }
}
