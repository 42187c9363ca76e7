use crate::domain::a001_client::aggregate::ClientId;
use crate::domain::common::{AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::error::{DomainResult, ValidationErrors};
use crate::shared::handback::HandbackRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
crate::uuid_aggregate_id!(PersonId);

pub const DEFAULT_ROLE: &str = "Membre";

/// Tax profile of a person
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxProfile {
    pub tax_regime: Option<String>,
    /// Percent
    pub tax_rate: Option<f64>,
    pub tax_shares: Option<f64>,
    pub taxable_income: Option<f64>,
}

// ============================================================================
// Aggregate Root
// ============================================================================
/// Person attached to a client. `base.description` carries the full name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(flatten)]
    pub base: BaseAggregate<PersonId>,

    pub client_id: ClientId,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub role: String,
    pub family_situation: Option<String>,
    pub address: Option<String>,
    pub income: Option<f64>,
    pub charges: Option<f64>,
    pub profession: Option<String>,
    pub tax_profile: Option<TaxProfile>,
}

impl Person {
    pub fn new_for_insert(client_id: ClientId, dto: &PersonDto) -> Self {
        let code = format!("PER-{}", &Uuid::new_v4().simple().to_string()[..8]);
        let base = BaseAggregate::new(PersonId::new_v4(), code, String::new());
        let mut person = Self {
            base,
            client_id,
            first_name: String::new(),
            last_name: String::new(),
            birth_date: None,
            email: String::new(),
            phone: String::new(),
            role: DEFAULT_ROLE.to_string(),
            family_situation: None,
            address: None,
            income: None,
            charges: None,
            profession: None,
            tax_profile: None,
        };
        person.update(dto);
        person
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn update(&mut self, dto: &PersonDto) {
        self.first_name = dto.first_name.trim().to_string();
        self.last_name = dto.last_name.trim().to_string();
        self.base.description = self.full_name();
        self.birth_date = dto.birth_date;
        self.email = dto.email.clone().unwrap_or_default();
        self.phone = dto.phone.clone().unwrap_or_default();
        self.role = dto
            .role
            .clone()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ROLE.to_string());
        self.family_situation = dto.family_situation.clone();
        self.address = dto.address.clone();
        self.income = dto.income;
        self.charges = dto.charges;
        self.profession = dto.profession.clone();
        self.tax_profile = dto.tax_profile.clone();
        self.base.comment = dto.comment.clone();
    }

    pub fn validate(&self) -> DomainResult<()> {
        let mut errors = ValidationErrors::new();
        errors.require_text("first_name", &self.first_name);
        errors.require_text("last_name", &self.last_name);
        if self.income.map_or(false, |v| v < 0.0) {
            errors.add("income", "must not be negative");
        }
        if self.charges.map_or(false, |v| v < 0.0) {
            errors.add("charges", "must not be negative");
        }
        errors.into_result()
    }

    pub fn before_write(&mut self, agent: &str) {
        self.base.metadata.record_write(agent);
    }
}

impl AggregateRoot for Person {
    type Id = PersonId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "person"
    }

    fn element_name() -> &'static str {
        "Personne"
    }

    fn list_name() -> &'static str {
        "Membres"
    }
}

impl HandbackRecord for Person {
    type Id = PersonId;

    fn entity_name() -> &'static str {
        "Person"
    }

    fn record_id(&self) -> PersonId {
        self.base.id
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PersonDto {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub family_situation: Option<String>,
    pub address: Option<String>,
    pub income: Option<f64>,
    pub charges: Option<f64>,
    pub profession: Option<String>,
    pub tax_profile: Option<TaxProfile>,
    pub comment: Option<String>,
}
