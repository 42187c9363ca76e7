use serde::{Deserialize, Serialize};

/// Billing cycle of a subscription
///
/// Selects which base/option price field drives the derived totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Periodicity {
    #[default]
    Monthly,
    Annual,
}

impl Periodicity {
    pub fn code(&self) -> &'static str {
        match self {
            Periodicity::Monthly => "monthly",
            Periodicity::Annual => "annual",
        }
    }

    /// UI label
    pub fn display_name(&self) -> &'static str {
        match self {
            Periodicity::Monthly => "Mensuelle",
            Periodicity::Annual => "Annuelle",
        }
    }

    pub fn all() -> Vec<Periodicity> {
        vec![Periodicity::Monthly, Periodicity::Annual]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "monthly" => Some(Periodicity::Monthly),
            "annual" => Some(Periodicity::Annual),
            _ => None,
        }
    }
}

impl std::fmt::Display for Periodicity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
