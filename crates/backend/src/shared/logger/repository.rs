use chrono::Utc;
use contracts::shared::logger::LogEntry;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Entries kept before the oldest ones are dropped
pub const DEFAULT_CAPACITY: usize = 1000;

#[derive(Debug, Default)]
struct Entries {
    next_id: i64,
    items: VecDeque<LogEntry>,
}

/// In-memory activity log, shared by all handlers. Bounded: past `capacity`
/// entries the oldest one is dropped on each append.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    inner: Arc<RwLock<Entries>>,
    capacity: usize,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::default(),
            capacity: capacity.max(1),
        }
    }

    /// Append one entry
    pub async fn log_event(&self, source: &str, category: &str, message: &str) -> LogEntry {
        let mut entries = self.inner.write().await;
        entries.next_id += 1;
        let entry = LogEntry {
            id: entries.next_id,
            timestamp: Utc::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
            source: source.to_string(),
            category: category.to_string(),
            message: message.to_string(),
        };
        while entries.items.len() >= self.capacity {
            entries.items.pop_front();
        }
        entries.items.push_back(entry.clone());
        entry
    }

    /// All entries, newest first
    pub async fn get_all_logs(&self) -> Vec<LogEntry> {
        let entries = self.inner.read().await;
        entries.items.iter().rev().cloned().collect()
    }

    pub async fn clear_all_logs(&self) {
        self.inner.write().await.items.clear();
    }
}
