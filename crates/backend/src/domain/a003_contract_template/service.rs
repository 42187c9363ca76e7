use crate::shared::data::catalog::CATALOG;
use contracts::domain::a003_contract_template::aggregate::{
    distinct_domains, ContractTemplate, ContractTemplateId, TemplateSearch,
};
use contracts::domain::a003_contract_template::offer_catalog::{OfferCatalogItem, OfferSearch};
use contracts::domain::a004_subscription::pricing::{quote, Amounts, QuoteRequest};
use contracts::enums::contract_domain::ContractDomain;
use contracts::shared::error::{DomainError, DomainResult};

pub fn list(search: &TemplateSearch) -> Vec<ContractTemplate> {
    CATALOG
        .templates
        .iter()
        .filter(|t| search.matches(t))
        .cloned()
        .collect()
}

pub fn get_by_id(id: ContractTemplateId) -> DomainResult<ContractTemplate> {
    CATALOG
        .template(id)
        .cloned()
        .ok_or_else(|| DomainError::not_found("contract template", id))
}

pub fn domains() -> Vec<ContractDomain> {
    distinct_domains(&CATALOG.templates)
}

/// Pricing preview for the subscription form
pub fn quote_template(id: ContractTemplateId, request: &QuoteRequest) -> DomainResult<Amounts> {
    let template = CATALOG
        .template(id)
        .ok_or_else(|| DomainError::not_found("contract template", id))?;
    quote(template, request)
}

pub fn offers(search: &OfferSearch) -> Vec<OfferCatalogItem> {
    CATALOG.offers.search(search).into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::catalog::option_ids;
    use contracts::domain::a003_contract_template::aggregate::TemplateOptionId;
    use contracts::domain::a005_contact::offer::OfferType;
    use contracts::enums::periodicity::Periodicity;

    #[test]
    fn test_list_filters_by_domain_and_term() {
        let energy = list(&TemplateSearch {
            search: String::new(),
            domain: Some(ContractDomain::Energy),
        });
        assert_eq!(energy.len(), 2);

        let fibre = list(&TemplateSearch {
            search: "FIBRE".into(),
            domain: None,
        });
        assert_eq!(fibre.len(), 1);
        assert_eq!(fibre[0].base.code, "NET-FIBRE-PRO");
        assert_eq!(domains().len(), 4);
    }

    #[test]
    fn test_quote_reference_contract() {
        let rc = CATALOG.template_by_code("ASS-RC-PRO").unwrap();
        let request = QuoteRequest {
            periodicity: Periodicity::Monthly,
            subscribed_option_ids: option_ids(rc, &["OPT_ASS_RC_001", "OPT_ASS_RC_002"]),
        };
        let amounts = quote_template(rc.base.id, &request).unwrap();
        assert_eq!(amounts.monthly, 250.0);
        assert_eq!(amounts.annual, 3000.0);

        let stray = QuoteRequest {
            periodicity: Periodicity::Monthly,
            subscribed_option_ids: vec![TemplateOptionId::new_v4()],
        };
        assert!(matches!(
            quote_template(rc.base.id, &stray),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            get_by_id(ContractTemplateId::new_v4()),
            Err(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn test_offer_search() {
        let products = offers(&OfferSearch {
            offer_type: Some(OfferType::Product),
            search: "prêt".into(),
        });
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Prêt Professionnel");
    }
}
