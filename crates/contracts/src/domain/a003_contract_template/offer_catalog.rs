use super::aggregate::ContractTemplate;
use crate::domain::a005_contact::offer::{Offer, OfferDraft, OfferType};
use crate::shared::error::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

/// Something that may be proposed to a client during an interview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferCatalogItem {
    pub offer_type: OfferType,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfferSearch {
    pub offer_type: Option<OfferType>,
    #[serde(default)]
    pub search: String,
}

/// Offer names an interview may propose
#[derive(Debug, Clone, Default)]
pub struct OfferCatalog {
    items: Vec<OfferCatalogItem>,
}

impl OfferCatalog {
    /// Contract offers are the catalogue templates followed by the extra
    /// contract names; names are unique per type.
    pub fn build(
        templates: &[ContractTemplate],
        extra_contracts: &[&str],
        products: &[&str],
    ) -> Self {
        let mut catalog = Self::default();
        for template in templates {
            catalog.push(OfferCatalogItem {
                offer_type: OfferType::Contract,
                name: template.title().to_string(),
                description: Some(template.summary.clone()),
            });
        }
        for name in extra_contracts {
            catalog.push(OfferCatalogItem {
                offer_type: OfferType::Contract,
                name: name.to_string(),
                description: None,
            });
        }
        for name in products {
            catalog.push(OfferCatalogItem {
                offer_type: OfferType::Product,
                name: name.to_string(),
                description: None,
            });
        }
        catalog
    }

    fn push(&mut self, item: OfferCatalogItem) {
        if self.find(item.offer_type, &item.name).is_none() {
            self.items.push(item);
        }
    }

    pub fn items(&self) -> &[OfferCatalogItem] {
        &self.items
    }

    pub fn find(&self, offer_type: OfferType, name: &str) -> Option<&OfferCatalogItem> {
        self.items
            .iter()
            .find(|i| i.offer_type == offer_type && i.name == name)
    }

    pub fn search(&self, query: &OfferSearch) -> Vec<&OfferCatalogItem> {
        let term = query.search.trim().to_lowercase();
        self.items
            .iter()
            .filter(|i| query.offer_type.map_or(true, |t| i.offer_type == t))
            .filter(|i| {
                term.is_empty()
                    || i.name.to_lowercase().contains(&term)
                    || i.description
                        .as_deref()
                        .map_or(false, |d| d.to_lowercase().contains(&term))
            })
            .collect()
    }

    /// Turns a draft into a proposed offer; the name must come from the catalogue
    pub fn propose(&self, draft: &OfferDraft) -> DomainResult<Offer> {
        let item = self.find(draft.offer_type, &draft.name).ok_or_else(|| {
            DomainError::invalid_field(
                "offers",
                format!(
                    "unknown {} offer '{}'",
                    draft.offer_type.display_name().to_lowercase(),
                    draft.name
                ),
            )
        })?;
        Ok(Offer::proposed(
            item.offer_type,
            item.name.clone(),
            item.description.clone(),
            draft.annotation.clone(),
        ))
    }
}
