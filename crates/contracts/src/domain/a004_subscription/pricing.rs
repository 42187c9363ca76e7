//! Catalogue-driven subscription pricing
//!
//! Monthly periodicity: `monthly = Bm + Σ Om`, `annual = monthly * 12`.
//! Annual periodicity: `annual = Ba + Σ Oa`, `monthly = annual / 12`.
//! Only subscribed, non-free options contribute. No rounding happens here;
//! amounts are rounded to the cent for display only.

use super::aggregate::{OptionStatus, SubscriptionOption};
use crate::domain::a003_contract_template::aggregate::{ContractTemplate, TemplateOptionId};
use crate::enums::periodicity::Periodicity;
use crate::shared::error::{DomainResult, ValidationErrors};
use serde::{Deserialize, Serialize};

pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Derived monthly/annual totals of a subscription
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Amounts {
    pub monthly: f64,
    pub annual: f64,
}

/// Totals for `template` billed per `periodicity` with the given option statuses.
///
/// Statuses referring to options the template does not have are ignored.
pub fn compute_amounts(
    template: &ContractTemplate,
    periodicity: Periodicity,
    options: &[SubscriptionOption],
) -> Amounts {
    let options_cost: f64 = template
        .options
        .iter()
        .filter(|opt| {
            options
                .iter()
                .any(|s| s.option_id == opt.id && s.status == OptionStatus::Subscribed)
        })
        .map(|opt| opt.price(periodicity))
        .sum();

    match periodicity {
        Periodicity::Monthly => {
            let monthly = template.base_monthly_price + options_cost;
            Amounts {
                monthly,
                annual: monthly * MONTHS_PER_YEAR,
            }
        }
        Periodicity::Annual => {
            let annual = template.base_annual_price + options_cost;
            Amounts {
                monthly: annual / MONTHS_PER_YEAR,
                annual,
            }
        }
    }
}

/// Flips the status of `option_id`, leaving every other entry untouched
pub fn toggle_option(
    options: &[SubscriptionOption],
    option_id: TemplateOptionId,
) -> Vec<SubscriptionOption> {
    options
        .iter()
        .map(|s| {
            if s.option_id == option_id {
                SubscriptionOption {
                    option_id: s.option_id,
                    status: s.status.toggled(),
                }
            } else {
                s.clone()
            }
        })
        .collect()
}

/// One status per template option, `subscribed` for the listed ids
pub fn option_statuses(
    template: &ContractTemplate,
    subscribed: &[TemplateOptionId],
) -> Vec<SubscriptionOption> {
    template
        .options
        .iter()
        .map(|opt| SubscriptionOption {
            option_id: opt.id,
            status: if subscribed.contains(&opt.id) {
                OptionStatus::Subscribed
            } else {
                OptionStatus::NotSubscribed
            },
        })
        .collect()
}

/// Pricing preview request for the creation form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub periodicity: Periodicity,
    #[serde(default)]
    pub subscribed_option_ids: Vec<TemplateOptionId>,
}

/// Every selected option must belong to the template
pub fn check_selection(
    errors: &mut ValidationErrors,
    template: &ContractTemplate,
    selected: &[TemplateOptionId],
) {
    for id in selected.iter().filter(|id| !template.has_option(**id)) {
        errors.add(
            "subscribed_option_ids",
            format!("option {} is not part of the contract", id),
        );
    }
}

/// Prices a selection, refusing it exactly as subscription creation would
pub fn quote(template: &ContractTemplate, request: &QuoteRequest) -> DomainResult<Amounts> {
    let mut errors = ValidationErrors::new();
    check_selection(&mut errors, template, &request.subscribed_option_ids);
    errors.into_result()?;
    let statuses = option_statuses(template, &request.subscribed_option_ids);
    Ok(compute_amounts(template, request.periodicity, &statuses))
}
