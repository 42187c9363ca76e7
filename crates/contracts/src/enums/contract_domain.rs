use serde::{Deserialize, Serialize};

/// Business domain of a catalogue contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractDomain {
    Insurance,
    Telephony,
    Energy,
    Internet,
}

impl ContractDomain {
    pub fn code(&self) -> &'static str {
        match self {
            ContractDomain::Insurance => "insurance",
            ContractDomain::Telephony => "telephony",
            ContractDomain::Energy => "energy",
            ContractDomain::Internet => "internet",
        }
    }

    /// UI label
    pub fn display_name(&self) -> &'static str {
        match self {
            ContractDomain::Insurance => "Assurance",
            ContractDomain::Telephony => "Téléphonie",
            ContractDomain::Energy => "Énergie",
            ContractDomain::Internet => "Internet",
        }
    }

    pub fn all() -> Vec<ContractDomain> {
        vec![
            ContractDomain::Insurance,
            ContractDomain::Telephony,
            ContractDomain::Energy,
            ContractDomain::Internet,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "insurance" => Some(ContractDomain::Insurance),
            "telephony" => Some(ContractDomain::Telephony),
            "energy" => Some(ContractDomain::Energy),
            "internet" => Some(ContractDomain::Internet),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContractDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for domain in ContractDomain::all() {
            assert_eq!(ContractDomain::from_code(domain.code()), Some(domain));
        }
        assert_eq!(ContractDomain::from_code("banking"), None);
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&ContractDomain::Telephony).unwrap();
        assert_eq!(json, "\"telephony\"");
    }
}
