//! Demo data loaded at startup when `store.seed_mock_data` is set

use super::catalog::{option_ids, CATALOG};
use super::store::Tables;
use chrono::{NaiveDate, NaiveDateTime};
use contracts::domain::a001_client::aggregate::{
    Client, ClientId, ClientStatus, NewClient, RiskLevel,
};
use contracts::domain::a002_person::aggregate::{Person, PersonDto, TaxProfile};
use contracts::domain::a003_contract_template::aggregate::ContractTemplate;
use contracts::domain::a004_subscription::aggregate::{
    NewSubscriptionDto, Subscription, SubscriptionState,
};
use contracts::domain::a005_contact::aggregate::{
    Contact, ContactType, FollowUpDto, NewContactDto,
};
use contracts::domain::a005_contact::offer::{OfferDraft, OfferType};
use contracts::enums::periodicity::Periodicity;

fn date(s: &str) -> anyhow::Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
}

fn at(s: &str) -> anyhow::Result<NaiveDateTime> {
    Ok(NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")?)
}

#[allow(clippy::too_many_arguments)]
fn client(
    number: &str,
    denomination: &str,
    address: &str,
    is_legal_entity: bool,
    segments: [&str; 2],
    agency: &str,
    advisor: &str,
    phone: &str,
    email: &str,
    created: &str,
    last_interaction: Option<&str>,
    contract_count: u32,
    total_balance: f64,
    risk: RiskLevel,
    potential: u8,
    status: ClientStatus,
    rating: &str,
) -> anyhow::Result<Client> {
    Ok(Client::new_for_insert(NewClient {
        client_number: number.into(),
        denomination: denomination.into(),
        main_address: address.into(),
        is_legal_entity,
        segments: segments.iter().map(|s| s.to_string()).collect(),
        agency: agency.into(),
        referent_advisor: advisor.into(),
        phone: Some(phone.into()),
        email: Some(email.into()),
        creation_date: date(created)?,
        last_interaction: last_interaction.map(date).transpose()?,
        contract_count,
        total_balance,
        risk,
        potential,
        status,
        rating: Some(rating.into()),
    }))
}

fn clients() -> anyhow::Result<Vec<Client>> {
    use ClientStatus::*;
    use RiskLevel::*;
    Ok(vec![
        client("C2024-00147", "Entreprise TechnoSolutions SARL", "25 Avenue des Champs-Élysées, 75008 Paris", true, ["PME", "Tech"], "Paris Centre", "Marie Dubois", "01 42 56 78 90", "contact@technosolutions.fr", "2022-03-15", Some("2024-11-10"), 8, 450_000.0, Low, 85, Active, "A+")?,
        client("C2023-00892", "Martin & Associés", "12 Rue de la Paix, 69002 Lyon", true, ["Services", "Conseil"], "Lyon Bellecour", "Pierre Lefebvre", "04 78 92 34 56", "info@martin-associes.fr", "2021-06-20", Some("2024-11-15"), 5, 280_000.0, Moderate, 72, Active, "A")?,
        client("C2024-01203", "Sophie Lefèvre", "8 Boulevard Gambetta, 33000 Bordeaux", false, ["Particulier", "Premium"], "Bordeaux Centre", "Jean Moreau", "05 56 78 90 12", "sophie.lefevre@email.com", "2024-01-08", Some("2024-11-12"), 3, 125_000.0, Low, 68, Active, "B+")?,
        client("C2022-00456", "Groupe Immobilier Horizon", "45 Rue du Faubourg Saint-Honoré, 75008 Paris", true, ["Grande Entreprise", "Immobilier"], "Paris Opéra", "Claire Bernard", "01 53 43 21 09", "contact@groupe-horizon.fr", "2020-09-12", Some("2024-11-08"), 12, 1_250_000.0, Moderate, 92, Active, "A+")?,
        client("C2024-00678", "Julien Mercier", "17 Avenue Jean Jaurès, 31000 Toulouse", false, ["Particulier", "Standard"], "Toulouse Capitole", "Antoine Rousseau", "05 61 23 45 67", "j.mercier@email.com", "2024-02-14", Some("2024-11-14"), 2, 45_000.0, Low, 55, Active, "B")?,
        client("C2023-01145", "Boulangerie Artisanale du Coin", "3 Place du Marché, 13001 Marseille", true, ["TPE", "Commerce"], "Marseille Vieux-Port", "Isabelle Petit", "04 91 33 22 11", "boulangerie.artisanale@email.fr", "2023-05-22", Some("2024-10-28"), 4, 78_000.0, High, 48, Active, "C+")?,
        client("C2024-00334", "Émilie Girard", "22 Rue de Strasbourg, 67000 Strasbourg", false, ["Particulier", "Jeune"], "Strasbourg Centre", "Marc Laurent", "03 88 12 34 56", "emilie.girard@email.com", "2024-03-10", None, 1, 15_000.0, Low, 62, Prospect, "B-")?,
        client("C2021-00923", "Cabinet Médical Saint-Louis", "56 Boulevard Haussmann, 75009 Paris", true, ["Profession Libérale", "Santé"], "Paris République", "Sophie Martin", "01 48 78 90 12", "cabinet.saintlouis@medical.fr", "2021-04-18", Some("2024-11-16"), 6, 320_000.0, Low, 78, Active, "A")?,
    ])
}

fn people(techno: ClientId, lefevre: ClientId) -> anyhow::Result<Vec<Person>> {
    let mut dupont = Person::new_for_insert(
        techno,
        &PersonDto {
            first_name: "Jean".into(),
            last_name: "Dupont".into(),
            birth_date: Some(date("1975-05-12")?),
            email: Some("jean.dupont@technosolutions.fr".into()),
            phone: Some("06 12 34 56 78".into()),
            role: Some("Gérant".into()),
            family_situation: Some("Marié".into()),
            address: Some("15 Rue de la République, 75008 Paris".into()),
            income: Some(85_000.0),
            profession: Some("Directeur Général".into()),
            tax_profile: Some(TaxProfile {
                tax_regime: Some("Régime réel".into()),
                tax_rate: Some(30.0),
                tax_shares: Some(2.5),
                taxable_income: Some(78_000.0),
            }),
            ..Default::default()
        },
    );
    dupont.base.code = "PER001".into();
    dupont.before_write("Marie Dubois");

    let mut sophie = Person::new_for_insert(
        lefevre,
        &PersonDto {
            first_name: "Sophie".into(),
            last_name: "Lefèvre".into(),
            birth_date: Some(date("1988-08-23")?),
            email: Some("sophie.lefevre@email.com".into()),
            phone: Some("06 78 90 12 34".into()),
            role: Some("Titulaire".into()),
            family_situation: Some("Célibataire".into()),
            address: Some("8 Boulevard Gambetta, 33000 Bordeaux".into()),
            income: Some(52_000.0),
            profession: Some("Architecte".into()),
            tax_profile: Some(TaxProfile {
                tax_regime: Some("Micro-entreprise".into()),
                tax_rate: Some(14.0),
                tax_shares: Some(1.0),
                taxable_income: Some(48_000.0),
            }),
            ..Default::default()
        },
    );
    sophie.base.code = "PER002".into();
    sophie.before_write("Jean Moreau");

    Ok(vec![dupont, sophie])
}

fn contacts(techno: ClientId, martin: ClientId) -> anyhow::Result<Vec<Contact>> {
    let mut prospecting = Contact::create(
        techno,
        &NewContactDto {
            contact_type: ContactType::Commercial,
            motive: "Appel de prospection".into(),
            comment: None,
            contact_date: Some(at("2024-11-10T09:30:00")?),
            person_id: None,
            state: None,
        },
        "Marie Dubois",
    )?;
    prospecting.base.code = "CNT001".into();

    let mut review = prospecting.plan_follow_up(
        &FollowUpDto {
            motive: "Bilan annuel des contrats".into(),
            contact_date: Some(at("2024-11-25T10:00:00")?),
            comment: None,
            person_id: None,
        },
        "Marie Dubois",
    )?;
    review.base.code = "CNT002".into();

    let mut inquiry = Contact::create(
        martin,
        &NewContactDto {
            contact_type: ContactType::Spontaneous,
            motive: "Demande d'information produit".into(),
            comment: None,
            contact_date: Some(at("2024-11-08T15:20:00")?),
            person_id: None,
            state: None,
        },
        "Pierre Lefebvre",
    )?;
    inquiry.base.code = "CNT003".into();

    let mut proposal = inquiry.plan_follow_up(
        &FollowUpDto {
            motive: "Proposition nouvelle assurance".into(),
            contact_date: Some(at("2024-11-15T14:00:00")?),
            comment: Some("Client intéressé, en attente de devis".into()),
            person_id: None,
        },
        "Pierre Lefebvre",
    )?;
    proposal.base.code = "CNT004".into();
    let offer = CATALOG.offers.propose(&OfferDraft {
        offer_type: OfferType::Contract,
        name: "Assurance Cyber-Risques".into(),
        annotation: Some("Client demande délai de réflexion".into()),
    })?;
    proposal.realize("Devis envoyé, relance prévue dans 10 jours", vec![offer])?;

    let mut contacts = vec![prospecting, review, inquiry, proposal];
    for contact in &mut contacts {
        let agent = contact.agent.clone();
        contact.before_write(&agent);
    }
    Ok(contacts)
}

#[allow(clippy::too_many_arguments)]
fn subscription(
    client_id: ClientId,
    template: &ContractTemplate,
    code: &str,
    periodicity: Periodicity,
    subscribed: &str,
    start: &str,
    duration_months: i64,
    options: &[&str],
) -> anyhow::Result<Subscription> {
    let subscribed_on = date(subscribed)?;
    let mut subscription = Subscription::from_template(
        client_id,
        template,
        &NewSubscriptionDto {
            template_id: Some(template.base.id),
            periodicity,
            subscription_date: Some(subscribed_on),
            start_date: Some(date(start)?),
            duration_months: Some(duration_months),
            state: Some(SubscriptionState::Active),
            subscribed_option_ids: option_ids(template, options),
        },
        "Marie Dubois",
        subscribed_on,
    )?;
    subscription.base.code = code.into();
    subscription.before_write("Marie Dubois");
    Ok(subscription)
}

fn subscriptions(techno: ClientId) -> anyhow::Result<Vec<Subscription>> {
    let rc = CATALOG
        .template_by_code("ASS-RC-PRO")
        .ok_or_else(|| anyhow::anyhow!("catalogue is missing ASS-RC-PRO"))?;
    let mobile = CATALOG
        .template_by_code("TEL-MOBILE-ENT")
        .ok_or_else(|| anyhow::anyhow!("catalogue is missing TEL-MOBILE-ENT"))?;

    Ok(vec![
        subscription(
            techno,
            rc,
            "ASS-PRO-2024-147",
            Periodicity::Annual,
            "2022-03-20",
            "2022-04-01",
            12,
            &["OPT_ASS_RC_001", "OPT_ASS_RC_002"],
        )?,
        subscription(
            techno,
            mobile,
            "TEL-ENT-2023-892",
            Periodicity::Monthly,
            "2023-01-10",
            "2023-02-01",
            24,
            &[],
        )?,
    ])
}

/// Eight clients, two people, two contact chains and two active subscriptions
pub fn mock_tables() -> anyhow::Result<Tables> {
    let clients = clients()?;
    let techno = clients[0].base.id;
    let martin = clients[1].base.id;
    let lefevre = clients[2].base.id;

    let mut tables = Tables {
        people: people(techno, lefevre)?,
        contacts: contacts(techno, martin)?,
        subscriptions: subscriptions(techno)?,
        clients,
        ..Default::default()
    };
    tables.rebuild_links();
    Ok(tables)
}
