use crate::shared::data::store::Tables;
use contracts::domain::a001_client::aggregate::ClientId;
use contracts::domain::a004_subscription::aggregate::{Subscription, SubscriptionId};

/// Live subscriptions of a client, most recent first
pub fn list_by_client(tables: &Tables, client_id: ClientId) -> Vec<&Subscription> {
    let mut items: Vec<&Subscription> = tables
        .subscriptions
        .iter()
        .filter(|s| s.client_id == client_id && !s.base.metadata.is_deleted)
        .collect();
    items.sort_by(|a, b| b.subscription_date.cmp(&a.subscription_date));
    items
}

pub fn get_by_id(tables: &Tables, client_id: ClientId, id: SubscriptionId) -> Option<&Subscription> {
    tables.subscriptions.iter().find(|s| {
        s.base.id == id && s.client_id == client_id && !s.base.metadata.is_deleted
    })
}

pub fn get_mut(
    tables: &mut Tables,
    client_id: ClientId,
    id: SubscriptionId,
) -> Option<&mut Subscription> {
    tables.subscriptions.iter_mut().find(|s| {
        s.base.id == id && s.client_id == client_id && !s.base.metadata.is_deleted
    })
}

pub fn insert(tables: &mut Tables, subscription: Subscription) {
    tables.subscriptions.push(subscription);
}
