//! Fixed contract catalogue and offer lists

use contracts::domain::a003_contract_template::aggregate::{
    ContractTemplate, ContractTemplateId, TemplateOption, TemplateOptionId,
};
use contracts::domain::a003_contract_template::offer_catalog::OfferCatalog;
use contracts::enums::contract_domain::ContractDomain;
use once_cell::sync::Lazy;

/// Contract names offered in interviews besides the catalogue templates
pub const AVAILABLE_CONTRACTS: &[&str] = &[
    "Assurance Responsabilité Civile Professionnelle",
    "Assurance Cyber-Risques",
    "Assurance Flotte Automobile",
    "Assurance Multirisque Professionnelle",
    "Assurance Protection Juridique",
    "Contrat Téléphonie Mobile",
    "Contrat Internet Fibre",
    "Contrat Énergie Électricité",
    "Contrat Énergie Gaz",
];

pub const AVAILABLE_PRODUCTS: &[&str] = &[
    "Carte Bancaire Premium",
    "Compte Épargne Rémunéré",
    "Prêt Professionnel",
    "Crédit Équipement",
    "Assurance Vie",
    "Plan d'Épargne Entreprise",
    "Terminal de Paiement",
    "Solution de Gestion de Trésorerie",
];

pub struct Catalog {
    pub templates: Vec<ContractTemplate>,
    pub offers: OfferCatalog,
}

impl Catalog {
    pub fn template(&self, id: ContractTemplateId) -> Option<&ContractTemplate> {
        self.templates.iter().find(|t| t.base.id == id)
    }

    pub fn template_by_code(&self, code: &str) -> Option<&ContractTemplate> {
        self.templates.iter().find(|t| t.base.code == code)
    }
}

/// Option ids of `template` for the given option codes; unknown codes are skipped
pub fn option_ids(template: &ContractTemplate, codes: &[&str]) -> Vec<TemplateOptionId> {
    template
        .options
        .iter()
        .filter(|o| codes.contains(&o.code.as_str()))
        .map(|o| o.id)
        .collect()
}

pub static CATALOG: Lazy<Catalog> = Lazy::new(|| {
    let templates = templates();
    let offers = OfferCatalog::build(&templates, AVAILABLE_CONTRACTS, AVAILABLE_PRODUCTS);
    Catalog { templates, offers }
});

fn opt(code: &str, name: &str, description: &str, monthly: f64, annual: f64) -> TemplateOption {
    TemplateOption::new(code, name, description, monthly, annual, false)
}

fn free(code: &str, name: &str, description: &str) -> TemplateOption {
    TemplateOption::new(code, name, description, 0.0, 0.0, true)
}

fn templates() -> Vec<ContractTemplate> {
    vec![
        ContractTemplate::new(
            "ASS-RC-PRO",
            "Assurance Responsabilité Civile Professionnelle",
            "Couverture RC pour activités professionnelles - Protection contre les dommages causés à des tiers dans le cadre de votre activité",
            ContractDomain::Insurance,
            200.0,
            2400.0,
            Some(12),
            vec![
                opt("OPT_ASS_RC_001", "Protection Juridique", "Assistance juridique en cas de litige", 50.0, 600.0),
                free("OPT_ASS_RC_002", "Assistance 24/7", "Support téléphonique disponible 24h/24"),
                opt("OPT_ASS_RC_003", "Extension Cyber-Risques", "Couverture complémentaire contre les attaques informatiques", 75.0, 900.0),
            ],
        ),
        ContractTemplate::new(
            "ASS-CYBER",
            "Assurance Cyber-Risques",
            "Protection complète contre les attaques informatiques, violations de données et interruptions d'activité liées au numérique",
            ContractDomain::Insurance,
            150.0,
            1800.0,
            Some(12),
            vec![
                opt("OPT_ASS_CYBER_001", "Audit de Sécurité Annuel", "Audit complet de votre infrastructure informatique", 100.0, 1200.0),
                opt("OPT_ASS_CYBER_002", "Formation Personnel", "Sessions de formation cybersécurité pour vos équipes", 50.0, 600.0),
            ],
        ),
        ContractTemplate::new(
            "ASS-FLOTTE-AUTO",
            "Assurance Flotte Automobile",
            "Assurance tous risques pour votre parc de véhicules professionnels (minimum 3 véhicules)",
            ContractDomain::Insurance,
            300.0,
            3600.0,
            Some(12),
            vec![
                opt("OPT_ASS_FLOTTE_001", "Véhicule de Remplacement", "Mise à disposition d'un véhicule en cas de panne ou accident", 80.0, 960.0),
                free("OPT_ASS_FLOTTE_002", "Assistance Dépannage 24/7", "Service de dépannage disponible partout en France"),
            ],
        ),
        ContractTemplate::new(
            "TEL-MOBILE-ENT",
            "Pack Téléphonie Mobile Entreprise",
            "Forfaits mobiles illimités pour vos collaborateurs - Appels, SMS et data 4G/5G",
            ContractDomain::Telephony,
            450.0,
            5400.0,
            Some(24),
            vec![
                opt("OPT_TEL_MOBILE_001", "Roaming International", "Appels et data à l'étranger inclus (Europe + USA)", 100.0, 1200.0),
                opt("OPT_TEL_MOBILE_002", "Téléphones Professionnels", "Location de smartphones dernière génération", 150.0, 1800.0),
            ],
        ),
        ContractTemplate::new(
            "TEL-FIXE-ENT",
            "Téléphonie Fixe Professionnelle",
            "Standard téléphonique VoIP avec numéros illimités et fonctionnalités avancées",
            ContractDomain::Telephony,
            250.0,
            3000.0,
            Some(36),
            vec![
                opt("OPT_TEL_FIXE_001", "Serveur Vocal Interactif", "SVI personnalisé pour l'accueil de vos clients", 75.0, 900.0),
                opt("OPT_TEL_FIXE_002", "Enregistrement d'Appels", "Système d'enregistrement et d'archivage des communications", 50.0, 600.0),
            ],
        ),
        ContractTemplate::new(
            "NET-FIBRE-PRO",
            "Internet Fibre Professionnelle",
            "Connexion fibre optique très haut débit avec garantie de temps de rétablissement",
            ContractDomain::Internet,
            150.0,
            1800.0,
            Some(12),
            vec![
                opt("OPT_NET_FIBRE_001", "Débit Garanti", "Garantie de débit minimum avec compensation en cas de non-respect", 100.0, 1200.0),
                opt("OPT_NET_FIBRE_002", "IP Fixes", "Attribution de 5 adresses IP fixes", 30.0, 360.0),
                free("OPT_NET_FIBRE_003", "Support Technique 24/7", "Assistance technique disponible jour et nuit"),
            ],
        ),
        ContractTemplate::new(
            "ENRG-ELEC-PRO",
            "Contrat Énergie Électricité Professionnelle",
            "Fourniture d'électricité pour locaux professionnels avec tarifs compétitifs",
            ContractDomain::Energy,
            400.0,
            4800.0,
            Some(24),
            vec![
                opt("OPT_ENRG_ELEC_001", "Énergie Verte", "Électricité 100% d'origine renouvelable", 50.0, 600.0),
                free("OPT_ENRG_ELEC_002", "Suivi Consommation", "Plateforme de monitoring en temps réel de votre consommation"),
            ],
        ),
        ContractTemplate::new(
            "ENRG-GAZ-PRO",
            "Contrat Énergie Gaz Professionnel",
            "Fourniture de gaz naturel pour chauffage et process industriels",
            ContractDomain::Energy,
            350.0,
            4200.0,
            Some(24),
            vec![
                opt("OPT_ENRG_GAZ_001", "Biogaz", "Option biogaz pour réduire votre empreinte carbone", 80.0, 960.0),
                free("OPT_ENRG_GAZ_002", "Prix Fixes", "Garantie de prix fixe pendant toute la durée du contrat"),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a003_contract_template::aggregate::distinct_domains;
    use contracts::domain::a005_contact::offer::OfferType;

    #[test]
    fn test_catalog_contents() {
        assert_eq!(CATALOG.templates.len(), 8);
        assert_eq!(
            distinct_domains(&CATALOG.templates),
            vec![
                ContractDomain::Insurance,
                ContractDomain::Telephony,
                ContractDomain::Internet,
                ContractDomain::Energy
            ]
        );
        let rc = CATALOG.template_by_code("ASS-RC-PRO").unwrap();
        assert_eq!(CATALOG.template(rc.base.id).unwrap().base.code, "ASS-RC-PRO");
        assert_eq!(option_ids(rc, &["OPT_ASS_RC_001", "NOPE"]).len(), 1);
    }

    #[test]
    fn test_offer_catalog_dedupes_template_titles() {
        let contracts = CATALOG
            .offers
            .items()
            .iter()
            .filter(|i| i.offer_type == OfferType::Contract)
            .count();
        // 8 titles + 9 names, three of them shared
        assert_eq!(contracts, 14);
        assert!(CATALOG
            .offers
            .find(OfferType::Product, "Terminal de Paiement")
            .is_some());
    }
}
