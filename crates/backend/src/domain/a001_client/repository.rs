use crate::shared::data::store::Tables;
use contracts::domain::a001_client::aggregate::{Client, ClientId};

pub fn list_all(tables: &Tables) -> Vec<&Client> {
    tables
        .clients
        .iter()
        .filter(|c| !c.base.metadata.is_deleted)
        .collect()
}

pub fn get_by_id(tables: &Tables, id: ClientId) -> Option<&Client> {
    tables
        .clients
        .iter()
        .find(|c| c.base.id == id && !c.base.metadata.is_deleted)
}

pub fn get_mut(tables: &mut Tables, id: ClientId) -> Option<&mut Client> {
    tables
        .clients
        .iter_mut()
        .find(|c| c.base.id == id && !c.base.metadata.is_deleted)
}

pub fn exists(tables: &Tables, id: ClientId) -> bool {
    get_by_id(tables, id).is_some()
}
