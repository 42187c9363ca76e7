use crate::domain::common::{AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::contract_domain::ContractDomain;
use crate::enums::periodicity::Periodicity;
use serde::{Deserialize, Serialize};

// ============================================================================
// ID Types
// ============================================================================
crate::uuid_aggregate_id!(ContractTemplateId);
crate::uuid_aggregate_id!(TemplateOptionId);

/// Optional add-on of a catalogue contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateOption {
    pub id: TemplateOptionId,
    pub code: String,
    pub name: String,
    pub description: String,
    pub monthly_price: f64,
    pub annual_price: f64,
    pub is_free: bool,
}

impl TemplateOption {
    pub fn new(
        code: &str,
        name: &str,
        description: &str,
        monthly_price: f64,
        annual_price: f64,
        is_free: bool,
    ) -> Self {
        Self {
            id: TemplateOptionId::new_v4(),
            code: code.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            monthly_price,
            annual_price,
            is_free,
        }
    }

    /// Price charged for the option; free options always cost nothing
    pub fn price(&self, periodicity: Periodicity) -> f64 {
        if self.is_free {
            return 0.0;
        }
        match periodicity {
            Periodicity::Monthly => self.monthly_price,
            Periodicity::Annual => self.annual_price,
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
/// Immutable catalogue entry. `base.code` is the contract code,
/// `base.description` the title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractTemplate {
    #[serde(flatten)]
    pub base: BaseAggregate<ContractTemplateId>,

    pub summary: String,
    pub domain: ContractDomain,
    pub base_monthly_price: f64,
    /// Set independently; not required to equal `base_monthly_price * 12`
    pub base_annual_price: f64,
    /// Fixed, ordered
    pub options: Vec<TemplateOption>,
    pub standard_duration_months: Option<u32>,
}

impl ContractTemplate {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        code: &str,
        title: &str,
        summary: &str,
        domain: ContractDomain,
        base_monthly_price: f64,
        base_annual_price: f64,
        standard_duration_months: Option<u32>,
        options: Vec<TemplateOption>,
    ) -> Self {
        Self {
            base: BaseAggregate::new(
                ContractTemplateId::new_v4(),
                code.to_string(),
                title.to_string(),
            ),
            summary: summary.to_string(),
            domain,
            base_monthly_price,
            base_annual_price,
            options,
            standard_duration_months,
        }
    }

    pub fn title(&self) -> &str {
        &self.base.description
    }

    pub fn base_price(&self, periodicity: Periodicity) -> f64 {
        match periodicity {
            Periodicity::Monthly => self.base_monthly_price,
            Periodicity::Annual => self.base_annual_price,
        }
    }

    pub fn option(&self, id: TemplateOptionId) -> Option<&TemplateOption> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn has_option(&self, id: TemplateOptionId) -> bool {
        self.option(id).is_some()
    }
}

impl AggregateRoot for ContractTemplate {
    type Id = ContractTemplateId;

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
        "a003"
    }

    fn collection_name() -> &'static str {
        "contract_template"
    }

    fn element_name() -> &'static str {
        "Contrat"
    }

    fn list_name() -> &'static str {
        "Catalogue des contrats"
    }
}

// ============================================================================
// Catalogue search
// ============================================================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateSearch {
    /// Matched against title and summary, case-insensitive
    #[serde(default)]
    pub search: String,
    pub domain: Option<ContractDomain>,
}

impl TemplateSearch {
    pub fn matches(&self, template: &ContractTemplate) -> bool {
        let term = self.search.trim().to_lowercase();
        let matches_search = term.is_empty()
            || template.title().to_lowercase().contains(&term)
            || template.summary.to_lowercase().contains(&term);
        let matches_domain = self.domain.map_or(true, |d| template.domain == d);
        matches_search && matches_domain
    }
}

/// Domains present in the catalogue, in first-seen order
pub fn distinct_domains(templates: &[ContractTemplate]) -> Vec<ContractDomain> {
    let mut domains = Vec::new();
    for template in templates {
        if !domains.contains(&template.domain) {
            domains.push(template.domain);
        }
    }
    domains
}
