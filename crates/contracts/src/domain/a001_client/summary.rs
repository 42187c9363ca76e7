use super::aggregate::Client;
use crate::domain::a002_person::aggregate::Person;
use crate::domain::a003_contract_template::aggregate::ContractTemplate;
use crate::domain::a004_subscription::aggregate::{
    domain_breakdown, DomainBreakdown, Subscription, SubscriptionStats,
};
use crate::domain::a005_contact::aggregate::{Contact, ContactState, ContactType};
use serde::{Deserialize, Serialize};

/// Counters shown on the client detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSummary {
    pub people_count: usize,
    pub contact_count: usize,
    pub planned_interview_count: usize,
    pub subscriptions: SubscriptionStats,
    pub domains: Vec<DomainBreakdown>,
}

impl ClientSummary {
    /// Only live records belonging to `client` are counted
    pub fn build(
        client: &Client,
        people: &[Person],
        contacts: &[Contact],
        subscriptions: &[Subscription],
        templates: &[ContractTemplate],
    ) -> Self {
        let id = client.base.id;
        let own_contacts: Vec<&Contact> = contacts
            .iter()
            .filter(|c| c.client_id == id && !c.base.metadata.is_deleted)
            .collect();
        let own_subscriptions: Vec<&Subscription> = subscriptions
            .iter()
            .filter(|s| s.client_id == id && !s.base.metadata.is_deleted)
            .collect();

        Self {
            people_count: people
                .iter()
                .filter(|p| p.client_id == id && !p.base.metadata.is_deleted)
                .count(),
            contact_count: own_contacts.len(),
            planned_interview_count: own_contacts
                .iter()
                .filter(|c| {
                    c.contact_type == ContactType::Interview && c.state == ContactState::Planned
                })
                .count(),
            subscriptions: SubscriptionStats::from_subscriptions(own_subscriptions.iter().copied()),
            domains: domain_breakdown(&own_subscriptions, templates),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_client::aggregate::tests::sample_client;
    use crate::domain::a002_person::aggregate::tests::sample_person;
    use crate::domain::a003_contract_template::aggregate::tests::rc_pro_template;
    use crate::domain::a004_subscription::aggregate::NewSubscriptionDto;
    use crate::domain::a005_contact::aggregate::tests::{at, commercial};
    use crate::domain::a005_contact::aggregate::FollowUpDto;
    use crate::enums::periodicity::Periodicity;
    use chrono::NaiveDate;

    #[test]
    fn test_summary_counts_own_records() {
        let client = sample_client();
        let stranger = sample_client();
        let template = rc_pro_template();

        let people = vec![
            sample_person(client.base.id),
            sample_person(stranger.base.id),
        ];
        let first = commercial(client.base.id);
        let interview = first
            .plan_follow_up(
                &FollowUpDto {
                    motive: "Signature".into(),
                    contact_date: Some(at(2024, 12, 1, 10)),
                    ..Default::default()
                },
                "Marie Dubois",
            )
            .unwrap();
        let contacts = vec![first, interview, commercial(stranger.base.id)];

        let today = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
        let dto = NewSubscriptionDto {
            template_id: Some(template.base.id),
            periodicity: Periodicity::Monthly,
            subscription_date: Some(today),
            subscribed_option_ids: vec![template.options[0].id],
            ..Default::default()
        };
        let mut active =
            Subscription::from_template(client.base.id, &template, &dto, "agent", today).unwrap();
        active.activate().unwrap();
        let planned =
            Subscription::from_template(client.base.id, &template, &dto, "agent", today).unwrap();
        let subscriptions = vec![active, planned];

        let summary = ClientSummary::build(
            &client,
            &people,
            &contacts,
            &subscriptions,
            std::slice::from_ref(&template),
        );
        assert_eq!(summary.people_count, 1);
        assert_eq!(summary.contact_count, 2);
        assert_eq!(summary.planned_interview_count, 1);
        assert_eq!(summary.subscriptions.active_count, 1);
        assert_eq!(summary.subscriptions.active_monthly_total, 250.0);
        assert_eq!(summary.domains.len(), 1);
        assert_eq!(summary.domains[0].count, 2);
    }
}
