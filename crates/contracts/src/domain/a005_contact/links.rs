//! Parent/child links between contacts and their follow-up interviews

use super::aggregate::{Contact, ContactId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// What deleting a contact does to the follow-ups that reference it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrphanPolicy {
    /// Children keep pointing at the deleted parent
    #[default]
    AllowDangling,
    /// Delete is refused while live children exist
    Forbid,
    /// Children are deleted with their parent, recursively
    Cascade,
}

/// Follow-ups of `parent`, derived by scanning `contacts`
pub fn children_of(contacts: &[Contact], parent: ContactId) -> Vec<&Contact> {
    contacts
        .iter()
        .filter(|c| c.parent_contact_id == Some(parent))
        .collect()
}

/// Incremental parent -> children index, kept in step with the contact table.
///
/// Removing a parent leaves its children entry in place, so a dangling
/// reference still resolves the same way a scan would.
#[derive(Debug, Clone, Default)]
pub struct ContactLinks {
    children: BTreeMap<ContactId, BTreeSet<ContactId>>,
}

impl ContactLinks {
    pub fn from_contacts<'a>(contacts: impl IntoIterator<Item = &'a Contact>) -> Self {
        let mut links = Self::default();
        for contact in contacts {
            links.insert(contact);
        }
        links
    }

    pub fn insert(&mut self, contact: &Contact) {
        if let Some(parent) = contact.parent_contact_id {
            self.children.entry(parent).or_default().insert(contact.base.id);
        }
    }

    pub fn remove(&mut self, contact: &Contact) {
        if let Some(parent) = contact.parent_contact_id {
            if let Some(set) = self.children.get_mut(&parent) {
                set.remove(&contact.base.id);
                if set.is_empty() {
                    self.children.remove(&parent);
                }
            }
        }
    }

    pub fn children(&self, parent: ContactId) -> Vec<ContactId> {
        self.children
            .get(&parent)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn has_children(&self, parent: ContactId) -> bool {
        self.children.contains_key(&parent)
    }

    /// Every follow-up reachable from `root`, depth first, `root` excluded
    pub fn descendants(&self, root: ContactId) -> Vec<ContactId> {
        let mut out = Vec::new();
        let mut stack = self.children(root);
        let mut seen = BTreeSet::from([root]);
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            out.push(id);
            stack.extend(self.children(id));
        }
        out
    }
}
