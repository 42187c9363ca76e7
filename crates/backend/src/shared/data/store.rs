use contracts::domain::a001_client::aggregate::Client;
use contracts::domain::a002_person::aggregate::Person;
use contracts::domain::a004_subscription::aggregate::Subscription;
use contracts::domain::a005_contact::aggregate::Contact;
use contracts::domain::a005_contact::links::ContactLinks;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// All mutable CRM data. Deleted records stay with `metadata.is_deleted` set.
#[derive(Debug, Default)]
pub struct Tables {
    pub clients: Vec<Client>,
    pub people: Vec<Person>,
    pub contacts: Vec<Contact>,
    /// parent -> follow-ups over live contacts
    pub contact_links: ContactLinks,
    pub subscriptions: Vec<Subscription>,
}

impl Tables {
    pub fn rebuild_links(&mut self) {
        self.contact_links = ContactLinks::from_contacts(
            self.contacts.iter().filter(|c| !c.base.metadata.is_deleted),
        );
    }
}

/// Single source of truth behind one lock; each service call takes it once
#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<Tables>>,
}

impl Store {
    pub fn new(mut tables: Tables) -> Self {
        tables.rebuild_links();
        Self {
            inner: Arc::new(RwLock::new(tables)),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.inner.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.inner.write().await
    }
}
