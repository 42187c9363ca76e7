use crate::shared::data::store::Tables;
use contracts::domain::a001_client::aggregate::ClientId;
use contracts::domain::a002_person::aggregate::{Person, PersonId};

/// Live people of a client, by last then first name
pub fn list_by_client(tables: &Tables, client_id: ClientId) -> Vec<&Person> {
    let mut items: Vec<&Person> = tables
        .people
        .iter()
        .filter(|p| p.client_id == client_id && !p.base.metadata.is_deleted)
        .collect();
    items.sort_by(|a, b| {
        a.last_name
            .to_lowercase()
            .cmp(&b.last_name.to_lowercase())
            .then_with(|| a.first_name.to_lowercase().cmp(&b.first_name.to_lowercase()))
    });
    items
}

pub fn get_by_id(tables: &Tables, client_id: ClientId, id: PersonId) -> Option<&Person> {
    tables.people.iter().find(|p| {
        p.base.id == id && p.client_id == client_id && !p.base.metadata.is_deleted
    })
}

pub fn get_mut(tables: &mut Tables, client_id: ClientId, id: PersonId) -> Option<&mut Person> {
    tables.people.iter_mut().find(|p| {
        p.base.id == id && p.client_id == client_id && !p.base.metadata.is_deleted
    })
}

pub fn insert(tables: &mut Tables, person: Person) {
    tables.people.push(person);
}

pub fn soft_delete(tables: &mut Tables, client_id: ClientId, id: PersonId, agent: &str) -> bool {
    match get_mut(tables, client_id, id) {
        Some(person) => {
            person.base.metadata.is_deleted = true;
            person.before_write(agent);
            true
        }
        None => false,
    }
}
