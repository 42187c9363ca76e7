use super::pricing::{check_selection, compute_amounts, option_statuses, toggle_option, Amounts};
use crate::domain::a001_client::aggregate::ClientId;
use crate::domain::a003_contract_template::aggregate::{
    ContractTemplate, ContractTemplateId, TemplateOptionId,
};
use crate::domain::common::{AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::contract_domain::ContractDomain;
use crate::enums::periodicity::Periodicity;
use crate::shared::error::{DomainError, DomainResult, ValidationErrors};
use crate::shared::handback::HandbackRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
crate::uuid_aggregate_id!(SubscriptionId);

pub const DEFAULT_DURATION_MONTHS: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionStatus {
    Subscribed,
    NotSubscribed,
}

impl OptionStatus {
    pub fn toggled(self) -> Self {
        match self {
            OptionStatus::Subscribed => OptionStatus::NotSubscribed,
            OptionStatus::NotSubscribed => OptionStatus::Subscribed,
        }
    }
}

/// Status of one template option inside a subscription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionOption {
    pub option_id: TemplateOptionId,
    pub status: OptionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionState {
    #[default]
    Planned,
    Active,
    Terminated,
    Cancelled,
}

impl SubscriptionState {
    pub fn code(&self) -> &'static str {
        match self {
            SubscriptionState::Planned => "planned",
            SubscriptionState::Active => "active",
            SubscriptionState::Terminated => "terminated",
            SubscriptionState::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SubscriptionState::Planned => "Planifié",
            SubscriptionState::Active => "Actif",
            SubscriptionState::Terminated => "Résilié",
            SubscriptionState::Cancelled => "Annulé",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubscriptionState::Terminated | SubscriptionState::Cancelled
        )
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
/// A client's instance of a catalogue template. `base.code` is the
/// subscription code, `base.description` the template title.
///
/// The option list always mirrors the template's options and the amounts are
/// recomputed on every periodicity or option change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(flatten)]
    pub base: BaseAggregate<SubscriptionId>,

    pub client_id: ClientId,
    pub template_id: ContractTemplateId,
    pub periodicity: Periodicity,
    pub subscription_date: NaiveDate,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration_months: u32,
    pub state: SubscriptionState,
    options: Vec<SubscriptionOption>,
    monthly_amount: f64,
    annual_amount: f64,
    pub origin_agent: String,
    pub origin_date: NaiveDate,
}

impl Subscription {
    /// Builds a subscription from a catalogue selection
    pub fn from_template(
        client_id: ClientId,
        template: &ContractTemplate,
        dto: &NewSubscriptionDto,
        agent: &str,
        today: NaiveDate,
    ) -> DomainResult<Self> {
        let mut errors = ValidationErrors::new();
        errors.require("subscription_date", &dto.subscription_date);
        let duration = check_duration(
            &mut errors,
            dto.duration_months
                .or_else(|| template.standard_duration_months.map(i64::from))
                .unwrap_or(i64::from(DEFAULT_DURATION_MONTHS)),
        );
        let state = dto.state.unwrap_or_default();
        if state.is_terminal() {
            errors.add("state", "a new subscription is planned or active");
        }
        check_selection(&mut errors, template, &dto.subscribed_option_ids);
        errors.into_result()?;

        let code = format!(
            "{}-{}",
            template.base.code,
            &Uuid::new_v4().simple().to_string()[..8].to_uppercase()
        );
        let mut subscription = Self {
            base: BaseAggregate::new(
                SubscriptionId::new_v4(),
                code,
                template.title().to_string(),
            ),
            client_id,
            template_id: template.base.id,
            periodicity: dto.periodicity,
            subscription_date: dto.subscription_date.unwrap_or(today),
            start_date: dto.start_date,
            end_date: None,
            duration_months: duration,
            state,
            options: option_statuses(template, &dto.subscribed_option_ids),
            monthly_amount: 0.0,
            annual_amount: 0.0,
            origin_agent: agent.to_string(),
            origin_date: today,
        };
        subscription.recompute(template);
        Ok(subscription)
    }

    pub fn options(&self) -> &[SubscriptionOption] {
        &self.options
    }

    pub fn amounts(&self) -> Amounts {
        Amounts {
            monthly: self.monthly_amount,
            annual: self.annual_amount,
        }
    }

    pub fn is_subscribed(&self, option_id: TemplateOptionId) -> bool {
        self.options
            .iter()
            .any(|s| s.option_id == option_id && s.status == OptionStatus::Subscribed)
    }

    pub fn subscribed_count(&self) -> usize {
        self.options
            .iter()
            .filter(|s| s.status == OptionStatus::Subscribed)
            .count()
    }

    fn recompute(&mut self, template: &ContractTemplate) {
        let amounts = compute_amounts(template, self.periodicity, &self.options);
        self.monthly_amount = amounts.monthly;
        self.annual_amount = amounts.annual;
    }

    fn ensure_editable(&self, action: &'static str) -> DomainResult<()> {
        if self.state.is_terminal() {
            return Err(DomainError::InvalidTransition {
                entity: "subscription",
                from: self.state.code().to_string(),
                action,
            });
        }
        Ok(())
    }

    fn ensure_template(&self, template: &ContractTemplate) -> DomainResult<()> {
        if template.base.id != self.template_id {
            return Err(DomainError::Conflict(format!(
                "subscription {} is not an instance of template {}",
                self.base.code, template.base.code
            )));
        }
        Ok(())
    }

    pub fn set_periodicity(
        &mut self,
        template: &ContractTemplate,
        periodicity: Periodicity,
    ) -> DomainResult<()> {
        self.ensure_template(template)?;
        self.ensure_editable("edit")?;
        self.periodicity = periodicity;
        self.recompute(template);
        Ok(())
    }

    pub fn toggle_option(
        &mut self,
        template: &ContractTemplate,
        option_id: TemplateOptionId,
    ) -> DomainResult<()> {
        self.ensure_template(template)?;
        self.ensure_editable("edit")?;
        if !self.options.iter().any(|s| s.option_id == option_id) {
            return Err(DomainError::not_found("option", option_id));
        }
        self.options = toggle_option(&self.options, option_id);
        self.recompute(template);
        Ok(())
    }

    /// Applies an edit form. The option list must cover exactly the
    /// template's options.
    pub fn apply_update(
        &mut self,
        template: &ContractTemplate,
        dto: &SubscriptionUpdateDto,
    ) -> DomainResult<()> {
        self.ensure_template(template)?;
        self.ensure_editable("edit")?;

        let mut errors = ValidationErrors::new();
        errors.require("subscription_date", &dto.subscription_date);
        let duration = check_duration(&mut errors, dto.duration_months.unwrap_or(0));
        if !covers_template(template, &dto.options) {
            errors.add("options", "one status per contract option is required");
        }
        errors.into_result()?;

        if let Some(date) = dto.subscription_date {
            self.subscription_date = date;
        }
        self.periodicity = dto.periodicity;
        self.start_date = dto.start_date;
        self.duration_months = duration;
        self.options = template
            .options
            .iter()
            .filter_map(|opt| dto.options.iter().find(|s| s.option_id == opt.id).cloned())
            .collect();
        self.recompute(template);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// planned -> active
    pub fn activate(&mut self) -> DomainResult<()> {
        if self.state != SubscriptionState::Planned {
            return Err(self.refused("activate"));
        }
        self.state = SubscriptionState::Active;
        Ok(())
    }

    /// active -> terminated, end date mandatory
    pub fn terminate(&mut self, end_date: Option<NaiveDate>) -> DomainResult<()> {
        if self.state != SubscriptionState::Active {
            return Err(self.refused("terminate"));
        }
        let end_date =
            end_date.ok_or_else(|| DomainError::invalid_field("end_date", "required"))?;
        let mut errors = ValidationErrors::new();
        self.check_end_date(&mut errors, end_date);
        errors.into_result()?;
        self.end_date = Some(end_date);
        self.state = SubscriptionState::Terminated;
        Ok(())
    }

    /// planned | active -> cancelled
    pub fn cancel(&mut self) -> DomainResult<()> {
        if self.state.is_terminal() {
            return Err(self.refused("cancel"));
        }
        self.state = SubscriptionState::Cancelled;
        Ok(())
    }

    /// Coverage starts at the start date, or the subscription date without one
    fn coverage_start(&self) -> NaiveDate {
        self.start_date.unwrap_or(self.subscription_date)
    }

    fn check_end_date(&self, errors: &mut ValidationErrors, end: NaiveDate) {
        let floor = self.coverage_start();
        if end < floor {
            errors.add("end_date", format!("must not be before {}", floor));
        }
    }

    fn refused(&self, action: &'static str) -> DomainError {
        DomainError::InvalidTransition {
            entity: "subscription",
            from: self.state.code().to_string(),
            action,
        }
    }

    /// Invariants against the catalogue entry
    pub fn validate(&self, template: &ContractTemplate) -> DomainResult<()> {
        self.ensure_template(template)?;
        let mut errors = ValidationErrors::new();
        if self.duration_months == 0 {
            errors.add("duration_months", "must be greater than 0");
        }
        if !covers_template(template, &self.options) {
            errors.add("options", "one status per contract option is required");
        }
        if let Some(end) = self.end_date {
            self.check_end_date(&mut errors, end);
        }
        if self.amounts() != compute_amounts(template, self.periodicity, &self.options) {
            errors.add("amounts", "derived amounts are stale");
        }
        errors.into_result()
    }

    pub fn before_write(&mut self, agent: &str) {
        self.base.metadata.record_write(agent);
    }
}

fn check_duration(errors: &mut ValidationErrors, months: i64) -> u32 {
    if months <= 0 {
        errors.add("duration_months", "must be greater than 0");
        return 0;
    }
    u32::try_from(months).unwrap_or_else(|_| {
        errors.add("duration_months", "is too large");
        0
    })
}

/// Exactly one status per template option, nothing else
fn covers_template(template: &ContractTemplate, options: &[SubscriptionOption]) -> bool {
    options.len() == template.options.len()
        && template
            .options
            .iter()
            .all(|opt| options.iter().filter(|s| s.option_id == opt.id).count() == 1)
}

impl AggregateRoot for Subscription {
    type Id = SubscriptionId;

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
        "a004"
    }

    fn collection_name() -> &'static str {
        "subscription"
    }

    fn element_name() -> &'static str {
        "Souscription"
    }

    fn list_name() -> &'static str {
        "Souscriptions"
    }
}

impl HandbackRecord for Subscription {
    type Id = SubscriptionId;

    fn entity_name() -> &'static str {
        "Subscription"
    }

    fn record_id(&self) -> SubscriptionId {
        self.base.id
    }
}

// ============================================================================
// DTOs
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NewSubscriptionDto {
    pub template_id: Option<ContractTemplateId>,
    #[serde(default)]
    pub periodicity: Periodicity,
    pub subscription_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    /// Defaults to the template's standard duration, then 12
    pub duration_months: Option<i64>,
    pub state: Option<SubscriptionState>,
    #[serde(default)]
    pub subscribed_option_ids: Vec<TemplateOptionId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionUpdateDto {
    pub periodicity: Periodicity,
    pub subscription_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub duration_months: Option<i64>,
    pub options: Vec<SubscriptionOption>,
}

impl From<&Subscription> for SubscriptionUpdateDto {
    fn from(s: &Subscription) -> Self {
        Self {
            periodicity: s.periodicity,
            subscription_date: Some(s.subscription_date),
            start_date: s.start_date,
            duration_months: Some(i64::from(s.duration_months)),
            options: s.options.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TerminateRequest {
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub confirmed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleOptionRequest {
    pub option_id: TemplateOptionId,
}

// ============================================================================
// Stats
// ============================================================================
/// Totals over the active subscriptions of a list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SubscriptionStats {
    pub active_count: usize,
    pub active_monthly_total: f64,
    pub active_annual_total: f64,
}

impl SubscriptionStats {
    pub fn from_subscriptions<'a>(items: impl IntoIterator<Item = &'a Subscription>) -> Self {
        items
            .into_iter()
            .filter(|s| s.state == SubscriptionState::Active)
            .fold(Self::default(), |mut acc, s| {
                acc.active_count += 1;
                acc.active_monthly_total += s.monthly_amount;
                acc.active_annual_total += s.annual_amount;
                acc
            })
    }
}

/// Subscriptions of one catalogue domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainBreakdown {
    pub domain: ContractDomain,
    pub count: usize,
    pub last_subscription_date: NaiveDate,
}

/// Per-domain count and most recent subscription date, in domain order
pub fn domain_breakdown(
    subscriptions: &[&Subscription],
    templates: &[ContractTemplate],
) -> Vec<DomainBreakdown> {
    let mut rows: Vec<DomainBreakdown> = Vec::new();
    for sub in subscriptions {
        let Some(template) = templates.iter().find(|t| t.base.id == sub.template_id) else {
            continue;
        };
        match rows.iter_mut().find(|r| r.domain == template.domain) {
            Some(row) => {
                row.count += 1;
                if sub.subscription_date > row.last_subscription_date {
                    row.last_subscription_date = sub.subscription_date;
                }
            }
            None => rows.push(DomainBreakdown {
                domain: template.domain,
                count: 1,
                last_subscription_date: sub.subscription_date,
            }),
        }
    }
    rows.sort_by_key(|r| r.domain);
    rows
}
