use crate::shared::error::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

crate::uuid_aggregate_id!(OfferId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferType {
    Contract,
    Product,
}

impl OfferType {
    pub fn display_name(&self) -> &'static str {
        match self {
            OfferType::Contract => "Contrat",
            OfferType::Product => "Produit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    #[default]
    Proposed,
    Accepted,
    Refused,
}

impl OfferStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            OfferStatus::Proposed => "Proposé",
            OfferStatus::Accepted => "Accepté",
            OfferStatus::Refused => "Refusé",
        }
    }
}

/// Contract or product proposed during a realized interview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    pub offer_type: OfferType,
    pub name: String,
    pub description: Option<String>,
    pub annotation: Option<String>,
    pub status: OfferStatus,
}

impl Offer {
    /// New offers always start as proposed
    pub fn proposed(
        offer_type: OfferType,
        name: String,
        description: Option<String>,
        annotation: Option<String>,
    ) -> Self {
        Self {
            id: OfferId::new_v4(),
            offer_type,
            name,
            description,
            annotation: annotation.filter(|a| !a.trim().is_empty()),
            status: OfferStatus::Proposed,
        }
    }

    /// The client's answer; only a proposed offer can be decided
    pub fn decide(&mut self, status: OfferStatus) -> DomainResult<()> {
        if self.status != OfferStatus::Proposed {
            return Err(DomainError::InvalidTransition {
                entity: "offer",
                from: format!("{:?}", self.status).to_lowercase(),
                action: "decide",
            });
        }
        if status == OfferStatus::Proposed {
            return Err(DomainError::invalid_field(
                "status",
                "must be accepted or refused",
            ));
        }
        self.status = status;
        Ok(())
    }
}

/// Offer picked from the catalogue while realizing an interview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferDraft {
    pub offer_type: OfferType,
    pub name: String,
    pub annotation: Option<String>,
}
