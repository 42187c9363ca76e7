use super::config::Config;
use super::data::store::{Store, Tables};
use super::logger::ActivityLog;
use contracts::domain::a005_contact::links::OrphanPolicy;
use std::sync::Arc;

/// Shared state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Store,
    pub activity: ActivityLog,
    /// Name stamped into `modified_by` and agent fields
    pub agent: Arc<str>,
    pub orphan_policy: OrphanPolicy,
}

impl AppState {
    pub fn new(tables: Tables, agent: &str, orphan_policy: OrphanPolicy) -> Self {
        Self {
            store: Store::new(tables),
            activity: ActivityLog::new(),
            agent: Arc::from(agent),
            orphan_policy,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let tables = if config.store.seed_mock_data {
            super::data::seed::mock_tables()?
        } else {
            Tables::default()
        };
        tracing::info!(
            clients = tables.clients.len(),
            people = tables.people.len(),
            contacts = tables.contacts.len(),
            subscriptions = tables.subscriptions.len(),
            orphan_policy = ?config.store.orphan_policy,
            "Store initialized"
        );
        Ok(Self::new(
            tables,
            &config.session.agent,
            config.store.orphan_policy,
        ))
    }
}
