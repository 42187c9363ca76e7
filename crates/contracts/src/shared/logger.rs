use serde::{Deserialize, Serialize};

/// Activity log record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub timestamp: String,
    pub source: String, // "server" or "client"
    pub category: String,
    pub message: String,
}
