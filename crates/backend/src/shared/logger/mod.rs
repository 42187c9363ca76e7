pub mod repository;

use contracts::domain::common::AggregateRoot;

pub use repository::ActivityLog;

impl ActivityLog {
    /// Server-side event
    ///
    /// ```ignore
    /// state.activity.log("a005_contact", "Entretien réalisé CNT-1A2B3C4D").await;
    /// ```
    pub async fn log(&self, category: &str, message: &str) {
        tracing::info!(category, "{}", message);
        self.log_event("server", category, message).await;
    }

    /// Event about aggregate `A`, filed under its full name (`a005_contact`)
    pub async fn record<A: AggregateRoot>(&self, message: &str) {
        self.log(&A::full_name(), message).await;
    }
}
