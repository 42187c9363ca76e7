use crate::shared::data::store::Tables;
use contracts::domain::a001_client::aggregate::ClientId;
use contracts::domain::a002_person::aggregate::PersonId;
use contracts::domain::a005_contact::aggregate::{Contact, ContactId};

/// Live contacts of a client, newest first
pub fn list_by_client(tables: &Tables, client_id: ClientId) -> Vec<&Contact> {
    let mut items: Vec<&Contact> = tables
        .contacts
        .iter()
        .filter(|c| c.client_id == client_id && !c.base.metadata.is_deleted)
        .collect();
    items.sort_by(|a, b| b.contact_date.cmp(&a.contact_date));
    items
}

pub fn get_by_id(tables: &Tables, client_id: ClientId, id: ContactId) -> Option<&Contact> {
    tables
        .contacts
        .iter()
        .find(|c| c.base.id == id && c.client_id == client_id && !c.base.metadata.is_deleted)
}

pub fn get_mut(tables: &mut Tables, client_id: ClientId, id: ContactId) -> Option<&mut Contact> {
    tables
        .contacts
        .iter_mut()
        .find(|c| c.base.id == id && c.client_id == client_id && !c.base.metadata.is_deleted)
}

/// Live follow-ups of `parent`, resolved through the link index
pub fn children(tables: &Tables, client_id: ClientId, parent: ContactId) -> Vec<&Contact> {
    let mut items: Vec<&Contact> = tables
        .contact_links
        .children(parent)
        .into_iter()
        .filter_map(|id| get_by_id(tables, client_id, id))
        .collect();
    items.sort_by(|a, b| a.contact_date.cmp(&b.contact_date));
    items
}

pub fn insert(tables: &mut Tables, contact: Contact) {
    tables.contact_links.insert(&contact);
    tables.contacts.push(contact);
}

/// Marks one contact deleted and drops it from its parent's children.
/// Returns false when the contact is unknown or already deleted.
pub fn soft_delete(tables: &mut Tables, client_id: ClientId, id: ContactId, agent: &str) -> bool {
    let Some(contact) = get_mut(tables, client_id, id) else {
        return false;
    };
    contact.base.metadata.is_deleted = true;
    contact.before_write(agent);
    let removed = contact.clone();
    tables.contact_links.remove(&removed);
    true
}

/// Clears `person_id` on every contact of the client that points at it.
/// Returns the number of contacts touched.
pub fn detach_person(
    tables: &mut Tables,
    client_id: ClientId,
    person_id: PersonId,
    agent: &str,
) -> usize {
    let mut touched = 0;
    for contact in tables
        .contacts
        .iter_mut()
        .filter(|c| c.client_id == client_id && c.person_id == Some(person_id))
    {
        contact.person_id = None;
        contact.before_write(agent);
        touched += 1;
    }
    touched
}
