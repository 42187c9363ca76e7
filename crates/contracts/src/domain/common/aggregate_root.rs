use super::EntityMetadata;

/// Root of an aggregate
///
/// Instance accessors plus the static naming used by the store, the
/// hand-back payloads and the UI labels.
pub trait AggregateRoot {
    /// Identifier type
    type Id;

    // ============================================================================
    // Instance data
    // ============================================================================

    fn id(&self) -> Self::Id;

    /// Business code of the record (e.g. "C2024-00147", "ASS-RC-PRO")
    fn code(&self) -> &str;

    /// Description / display name of the record
    fn description(&self) -> &str;

    fn metadata(&self) -> &EntityMetadata;

    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    // ============================================================================
    // Class metadata
    // ============================================================================

    /// Aggregate index in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Collection name in the store (e.g. "client")
    fn collection_name() -> &'static str;

    /// UI label, singular (e.g. "Client")
    fn element_name() -> &'static str;

    /// UI label, plural (e.g. "Clients")
    fn list_name() -> &'static str;

    /// Full aggregate name (e.g. "a001_client")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
