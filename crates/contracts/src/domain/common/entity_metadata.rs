use serde::{Deserialize, Serialize};

/// Lifecycle metadata of an aggregate instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMetadata {
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    /// Agent who made the last change
    pub modified_by: Option<String>,
    /// Soft delete
    pub is_deleted: bool,
    /// Bumped on every write
    pub version: i32,
}

impl EntityMetadata {
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            modified_by: None,
            is_deleted: false,
            version: 0,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now();
    }

    pub fn increment_version(&mut self) {
        self.version += 1;
    }

    /// Stamp a write by `agent`
    pub fn record_write(&mut self, agent: &str) {
        self.touch();
        self.increment_version();
        self.modified_by = Some(agent.to_string());
    }
}

impl Default for EntityMetadata {
    fn default() -> Self {
        Self::new()
    }
}
