use crate::domain::common::{AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::error::{DomainResult, ValidationErrors};
use crate::shared::handback::HandbackRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================
crate::uuid_aggregate_id!(ClientId);

// ============================================================================
// Enums
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn display_name(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Faible",
            RiskLevel::Moderate => "Modéré",
            RiskLevel::High => "Élevé",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    Active,
    Inactive,
    Prospect,
}

impl ClientStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            ClientStatus::Active => "Actif",
            ClientStatus::Inactive => "Inactif",
            ClientStatus::Prospect => "Prospect",
        }
    }
}

pub const MAX_POTENTIAL: u8 = 100;

// ============================================================================
// Aggregate Root
// ============================================================================
/// Client file. `base.code` holds the client number, `base.description` the
/// denomination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    #[serde(flatten)]
    pub base: BaseAggregate<ClientId>,

    pub main_address: String,
    pub is_legal_entity: bool,
    #[serde(default)]
    pub segments: Vec<String>,
    pub agency: String,
    pub referent_advisor: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub creation_date: NaiveDate,
    pub last_interaction: Option<NaiveDate>,
    pub contract_count: u32,
    pub total_balance: f64,
    pub risk: RiskLevel,
    /// Score 0..=100
    pub potential: u8,
    pub status: ClientStatus,
    pub rating: Option<String>,
}

/// Fixture / import input for a client
#[derive(Debug, Clone)]
pub struct NewClient {
    pub client_number: String,
    pub denomination: String,
    pub main_address: String,
    pub is_legal_entity: bool,
    pub segments: Vec<String>,
    pub agency: String,
    pub referent_advisor: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub creation_date: NaiveDate,
    pub last_interaction: Option<NaiveDate>,
    pub contract_count: u32,
    pub total_balance: f64,
    pub risk: RiskLevel,
    pub potential: u8,
    pub status: ClientStatus,
    pub rating: Option<String>,
}

impl Client {
    pub fn new_for_insert(input: NewClient) -> Self {
        let base = BaseAggregate::new(
            ClientId::new_v4(),
            input.client_number,
            input.denomination,
        );
        Self {
            base,
            main_address: input.main_address,
            is_legal_entity: input.is_legal_entity,
            segments: input.segments,
            agency: input.agency,
            referent_advisor: input.referent_advisor,
            phone: input.phone,
            email: input.email,
            creation_date: input.creation_date,
            last_interaction: input.last_interaction,
            contract_count: input.contract_count,
            total_balance: input.total_balance,
            risk: input.risk,
            potential: input.potential,
            status: input.status,
            rating: input.rating,
        }
    }

    pub fn client_number(&self) -> &str {
        &self.base.code
    }

    pub fn denomination(&self) -> &str {
        &self.base.description
    }

    /// City = last comma-separated segment of the main address
    pub fn city(&self) -> &str {
        self.main_address
            .rsplit(',')
            .next()
            .map(str::trim)
            .unwrap_or("")
    }

    /// Adds the segment when absent, removes it otherwise
    pub fn toggle_segment(&mut self, segment: &str) {
        if let Some(pos) = self.segments.iter().position(|s| s == segment) {
            self.segments.remove(pos);
        } else {
            self.segments.push(segment.to_string());
        }
    }

    pub fn update(&mut self, dto: &ClientDto) {
        self.base.description = dto.denomination.clone();
        self.main_address = dto.main_address.clone();
        self.segments = dto.segments.clone();
        self.agency = dto.agency.clone();
        self.referent_advisor = dto.referent_advisor.clone();
        self.phone = dto.phone.clone();
        self.email = dto.email.clone();
        self.status = dto.status;
        self.risk = dto.risk;
        self.potential = dto.potential;
        self.rating = dto.rating.clone();
    }

    pub fn validate(&self) -> DomainResult<()> {
        let mut errors = ValidationErrors::new();
        errors.require_text("denomination", &self.base.description);
        if self.potential > MAX_POTENTIAL {
            errors.add("potential", format!("must be between 0 and {}", MAX_POTENTIAL));
        }
        errors.into_result()
    }

    pub fn before_write(&mut self, agent: &str) {
        self.base.metadata.record_write(agent);
    }
}

impl AggregateRoot for Client {
    type Id = ClientId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "client"
    }

    fn element_name() -> &'static str {
        "Client"
    }

    fn list_name() -> &'static str {
        "Clients"
    }
}

impl HandbackRecord for Client {
    type Id = ClientId;

    fn entity_name() -> &'static str {
        "Client"
    }

    fn record_id(&self) -> ClientId {
        self.base.id
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientDto {
    pub denomination: String,
    pub main_address: String,
    #[serde(default)]
    pub segments: Vec<String>,
    pub agency: String,
    pub referent_advisor: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: ClientStatus,
    pub risk: RiskLevel,
    pub potential: u8,
    pub rating: Option<String>,
}

impl From<&Client> for ClientDto {
    fn from(c: &Client) -> Self {
        Self {
            denomination: c.base.description.clone(),
            main_address: c.main_address.clone(),
            segments: c.segments.clone(),
            agency: c.agency.clone(),
            referent_advisor: c.referent_advisor.clone(),
            phone: c.phone.clone(),
            email: c.email.clone(),
            status: c.status,
            risk: c.risk,
            potential: c.potential,
            rating: c.rating.clone(),
        }
    }
}
