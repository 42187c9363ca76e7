use super::offer::{Offer, OfferId, OfferStatus};
use crate::domain::a001_client::aggregate::ClientId;
use crate::domain::a002_person::aggregate::PersonId;
use crate::domain::common::{AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::error::{DomainError, DomainResult, ValidationErrors};
use crate::shared::handback::HandbackRecord;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
crate::uuid_aggregate_id!(ContactId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactType {
    Commercial,
    Spontaneous,
    Interview,
}

impl ContactType {
    pub fn code(&self) -> &'static str {
        match self {
            ContactType::Commercial => "commercial",
            ContactType::Spontaneous => "spontaneous",
            ContactType::Interview => "interview",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ContactType::Commercial => "Contact commercial",
            ContactType::Spontaneous => "Contact spontané",
            ContactType::Interview => "Entretien",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContactState {
    Planned,
    #[default]
    Realized,
    Cancelled,
}

impl ContactState {
    pub fn code(&self) -> &'static str {
        match self {
            ContactState::Planned => "planned",
            ContactState::Realized => "realized",
            ContactState::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ContactState::Planned => "Planifié",
            ContactState::Realized => "Réalisé",
            ContactState::Cancelled => "Annulé",
        }
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
/// A logged interaction with a client.
///
/// `base.description` holds the motive and `base.comment` the free comment.
/// Interviews are the only contacts with a lifecycle; they are planned as
/// follow-ups of an earlier contact and then realized or cancelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(flatten)]
    pub base: BaseAggregate<ContactId>,

    pub client_id: ClientId,
    pub person_id: Option<PersonId>,
    pub contact_type: ContactType,
    pub contact_date: NaiveDateTime,
    pub state: ContactState,
    pub agent: String,
    pub parent_contact_id: Option<ContactId>,
    #[serde(default)]
    pub offers: Vec<Offer>,
    pub closing_comment: Option<String>,
}

fn contact_code() -> String {
    format!(
        "CNT-{}",
        &Uuid::new_v4().simple().to_string()[..8].to_uppercase()
    )
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl Contact {
    /// Direct entry of a commercial or spontaneous contact
    pub fn create(client_id: ClientId, dto: &NewContactDto, agent: &str) -> DomainResult<Self> {
        let mut errors = ValidationErrors::new();
        errors.require_text("motive", &dto.motive);
        errors.require("contact_date", &dto.contact_date);
        if dto.contact_type == ContactType::Interview {
            errors.add("contact_type", "interviews are planned as follow-ups");
        }
        let state = dto.state.unwrap_or_default();
        if state == ContactState::Cancelled {
            errors.add("state", "a new contact is planned or realized");
        }
        errors.into_result()?;
        let contact_date = dto
            .contact_date
            .ok_or_else(|| DomainError::invalid_field("contact_date", "required"))?;

        let mut base = BaseAggregate::new(
            ContactId::new_v4(),
            contact_code(),
            dto.motive.trim().to_string(),
        );
        base.set_comment(non_blank(&dto.comment));

        let contact = Self {
            base,
            client_id,
            person_id: dto.person_id,
            contact_type: dto.contact_type,
            contact_date,
            state,
            agent: agent.to_string(),
            parent_contact_id: None,
            offers: Vec::new(),
            closing_comment: None,
        };
        contact.validate()?;
        Ok(contact)
    }

    /// Plans an interview following up on `self`
    pub fn plan_follow_up(&self, dto: &FollowUpDto, agent: &str) -> DomainResult<Contact> {
        if self.state == ContactState::Cancelled {
            return Err(DomainError::InvalidTransition {
                entity: "contact",
                from: self.state.code().to_string(),
                action: "follow up",
            });
        }
        let mut errors = ValidationErrors::new();
        errors.require_text("motive", &dto.motive);
        errors.require("contact_date", &dto.contact_date);
        errors.into_result()?;

        let mut base = BaseAggregate::new(
            ContactId::new_v4(),
            contact_code(),
            dto.motive.trim().to_string(),
        );
        base.set_comment(non_blank(&dto.comment));

        Ok(Contact {
            base,
            client_id: self.client_id,
            person_id: dto.person_id.or(self.person_id),
            contact_type: ContactType::Interview,
            contact_date: dto.contact_date.unwrap_or(self.contact_date),
            state: ContactState::Planned,
            agent: agent.to_string(),
            parent_contact_id: Some(self.base.id),
            offers: Vec::new(),
            closing_comment: None,
        })
    }

    pub fn motive(&self) -> &str {
        &self.base.description
    }

    pub fn is_interview(&self) -> bool {
        self.contact_type == ContactType::Interview
    }

    fn ensure_planned_interview(&self, action: &'static str) -> DomainResult<()> {
        if !self.is_interview() || self.state != ContactState::Planned {
            return Err(DomainError::InvalidTransition {
                entity: "contact",
                from: format!("{} {}", self.contact_type.code(), self.state.code()),
                action,
            });
        }
        Ok(())
    }

    /// planned interview -> realized, with its closing comment and offers
    pub fn realize(&mut self, closing_comment: &str, offers: Vec<Offer>) -> DomainResult<()> {
        self.ensure_planned_interview("realize")?;
        if closing_comment.trim().is_empty() {
            return Err(DomainError::invalid_field("closing_comment", "required"));
        }
        self.state = ContactState::Realized;
        self.closing_comment = Some(closing_comment.trim().to_string());
        self.offers = offers;
        Ok(())
    }

    /// planned interview -> cancelled; no further edits afterwards
    pub fn cancel(&mut self) -> DomainResult<()> {
        self.ensure_planned_interview("cancel")?;
        self.state = ContactState::Cancelled;
        Ok(())
    }

    /// Edits motive, date, comment and person. Type, state and parent never change.
    pub fn update(&mut self, dto: &ContactUpdateDto) -> DomainResult<()> {
        if self.state == ContactState::Cancelled {
            return Err(DomainError::InvalidTransition {
                entity: "contact",
                from: self.state.code().to_string(),
                action: "edit",
            });
        }
        let mut errors = ValidationErrors::new();
        errors.require_text("motive", &dto.motive);
        errors.require("contact_date", &dto.contact_date);
        errors.into_result()?;

        self.base.description = dto.motive.trim().to_string();
        self.base.set_comment(non_blank(&dto.comment));
        if let Some(date) = dto.contact_date {
            self.contact_date = date;
        }
        self.person_id = dto.person_id;
        Ok(())
    }

    /// Records the client's answer to one offer of a realized interview
    pub fn decide_offer(&mut self, offer_id: OfferId, status: OfferStatus) -> DomainResult<&Offer> {
        if self.state != ContactState::Realized {
            return Err(DomainError::InvalidTransition {
                entity: "contact",
                from: self.state.code().to_string(),
                action: "decide offer",
            });
        }
        let offer = self
            .offers
            .iter_mut()
            .find(|o| o.id == offer_id)
            .ok_or_else(|| DomainError::not_found("offer", offer_id))?;
        offer.decide(status)?;
        Ok(offer)
    }

    pub fn validate(&self) -> DomainResult<()> {
        let mut errors = ValidationErrors::new();
        errors.require_text("motive", self.motive());
        if !self.is_interview() {
            if !self.offers.is_empty() {
                errors.add("offers", "only interviews carry offers");
            }
            if self.closing_comment.is_some() {
                errors.add("closing_comment", "only interviews carry a closing comment");
            }
        }
        if self.parent_contact_id == Some(self.base.id) {
            errors.add("parent_contact_id", "a contact cannot follow up on itself");
        }
        errors.into_result()
    }

    pub fn before_write(&mut self, agent: &str) {
        self.base.metadata.record_write(agent);
    }
}

impl AggregateRoot for Contact {
    type Id = ContactId;

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
        "a005"
    }

    fn collection_name() -> &'static str {
        "contact"
    }

    fn element_name() -> &'static str {
        "Contact"
    }

    fn list_name() -> &'static str {
        "Contacts"
    }
}

impl HandbackRecord for Contact {
    type Id = ContactId;

    fn entity_name() -> &'static str {
        "Contact"
    }

    fn record_id(&self) -> ContactId {
        self.base.id
    }

    /// Newest first
    fn sort_list(items: &mut [Self]) {
        items.sort_by(|a, b| b.contact_date.cmp(&a.contact_date));
    }
}

// ============================================================================
// DTOs
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContactDto {
    pub contact_type: ContactType,
    #[serde(default)]
    pub motive: String,
    pub comment: Option<String>,
    pub contact_date: Option<NaiveDateTime>,
    pub person_id: Option<PersonId>,
    /// Realized when omitted
    pub state: Option<ContactState>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FollowUpDto {
    #[serde(default)]
    pub motive: String,
    pub contact_date: Option<NaiveDateTime>,
    pub comment: Option<String>,
    /// Inherited from the parent contact when omitted
    pub person_id: Option<PersonId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactUpdateDto {
    #[serde(default)]
    pub motive: String,
    pub comment: Option<String>,
    pub contact_date: Option<NaiveDateTime>,
    pub person_id: Option<PersonId>,
}

impl From<&Contact> for ContactUpdateDto {
    fn from(c: &Contact) -> Self {
        Self {
            motive: c.motive().to_string(),
            comment: c.base.comment.clone(),
            contact_date: Some(c.contact_date),
            person_id: c.person_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RealizeDto {
    #[serde(default)]
    pub closing_comment: String,
    #[serde(default)]
    pub offers: Vec<super::offer::OfferDraft>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OfferDecisionDto {
    pub status: OfferStatus,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::a005_contact::offer::OfferType;
    use chrono::NaiveDate;

    pub(crate) fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    pub(crate) fn commercial(client_id: ClientId) -> Contact {
        Contact::create(
            client_id,
            &NewContactDto {
                contact_type: ContactType::Commercial,
                motive: "Présentation offre assurance".into(),
                comment: Some("Client intéressé".into()),
                contact_date: Some(at(2024, 11, 15, 14)),
                person_id: None,
                state: None,
            },
            "Marie Dubois",
        )
        .unwrap()
    }

    fn follow_up(parent: &Contact) -> Contact {
        parent
            .plan_follow_up(
                &FollowUpDto {
                    motive: "Signature contrat".into(),
                    contact_date: Some(at(2024, 11, 22, 10)),
                    ..Default::default()
                },
                "Marie Dubois",
            )
            .unwrap()
    }

    fn offer() -> Offer {
        Offer::proposed(OfferType::Contract, "Assurance Cyber-Risques".into(), None, None)
    }

    #[test]
    fn test_create_defaults_to_realized() {
        let contact = commercial(ClientId::new_v4());
        assert_eq!(contact.state, ContactState::Realized);
        assert_eq!(contact.motive(), "Présentation offre assurance");
        assert!(contact.base.code.starts_with("CNT-"));
        assert!(contact.parent_contact_id.is_none());
    }

    #[test]
    fn test_create_rejects_interview_and_blank_motive() {
        let dto = NewContactDto {
            contact_type: ContactType::Interview,
            motive: " ".into(),
            comment: None,
            contact_date: None,
            person_id: None,
            state: Some(ContactState::Cancelled),
        };
        match Contact::create(ClientId::new_v4(), &dto, "agent") {
            Err(DomainError::Validation(errors)) => {
                assert!(errors.has("motive"));
                assert!(errors.has("contact_date"));
                assert!(errors.has("contact_type"));
                assert!(errors.has("state"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_follow_up_links_to_parent() {
        let parent = commercial(ClientId::new_v4());
        let child = follow_up(&parent);
        assert_eq!(child.parent_contact_id, Some(parent.base.id));
        assert_eq!(child.state, ContactState::Planned);
        assert_eq!(child.contact_type, ContactType::Interview);
        assert_eq!(child.client_id, parent.client_id);
        assert!(child.validate().is_ok());
    }

    #[test]
    fn test_follow_up_requires_motive() {
        let parent = commercial(ClientId::new_v4());
        let result = parent.plan_follow_up(
            &FollowUpDto {
                contact_date: Some(at(2024, 12, 1, 9)),
                ..Default::default()
            },
            "agent",
        );
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_realize_planned_interview() {
        let parent = commercial(ClientId::new_v4());
        let mut interview = follow_up(&parent);

        assert!(matches!(
            interview.realize("  ", vec![offer()]),
            Err(DomainError::Validation(_))
        ));
        interview
            .realize("Contrat signé", vec![offer()])
            .unwrap();
        assert_eq!(interview.state, ContactState::Realized);
        assert_eq!(interview.offers.len(), 1);
        assert_eq!(interview.offers[0].status, OfferStatus::Proposed);

        assert!(interview.realize("encore", vec![]).is_err());
        assert!(interview.cancel().is_err());
    }

    #[test]
    fn test_cancel_is_terminal() {
        let parent = commercial(ClientId::new_v4());
        let mut interview = follow_up(&parent);
        interview.cancel().unwrap();
        assert_eq!(interview.state, ContactState::Cancelled);

        assert!(interview.realize("trop tard", vec![]).is_err());
        assert!(matches!(
            interview.update(&ContactUpdateDto::from(&parent)),
            Err(DomainError::InvalidTransition { .. })
        ));
        assert!(matches!(
            interview.plan_follow_up(&FollowUpDto::default(), "agent"),
            Err(DomainError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_non_interviews_have_no_transitions() {
        let mut contact = commercial(ClientId::new_v4());
        assert!(contact.cancel().is_err());
        assert!(contact.realize("fin", vec![]).is_err());
    }

    #[test]
    fn test_only_interviews_carry_offers() {
        let mut contact = commercial(ClientId::new_v4());
        contact.offers.push(offer());
        contact.closing_comment = Some("x".into());
        match contact.validate() {
            Err(DomainError::Validation(errors)) => {
                assert!(errors.has("offers"));
                assert!(errors.has("closing_comment"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_update_keeps_type_state_and_parent() {
        let parent = commercial(ClientId::new_v4());
        let mut interview = follow_up(&parent);
        let mut dto = ContactUpdateDto::from(&interview);
        dto.motive = "Signature contrat cyber".into();
        dto.comment = Some("   ".into());
        interview.update(&dto).unwrap();

        assert_eq!(interview.motive(), "Signature contrat cyber");
        assert_eq!(interview.base.comment, None);
        assert_eq!(interview.state, ContactState::Planned);
        assert_eq!(interview.parent_contact_id, Some(parent.base.id));
    }

    #[test]
    fn test_decide_offer() {
        let parent = commercial(ClientId::new_v4());
        let mut interview = follow_up(&parent);
        let proposed = offer();
        let offer_id = proposed.id;
        assert!(interview.decide_offer(offer_id, OfferStatus::Accepted).is_err());

        interview.realize("fait", vec![proposed]).unwrap();
        assert!(matches!(
            interview.decide_offer(OfferId::new_v4(), OfferStatus::Accepted),
            Err(DomainError::NotFound { .. })
        ));
        let decided = interview
            .decide_offer(offer_id, OfferStatus::Refused)
            .unwrap();
        assert_eq!(decided.status, OfferStatus::Refused);
    }

    #[test]
    fn test_list_sorts_newest_first() {
        let client_id = ClientId::new_v4();
        let older = commercial(client_id);
        let newer = follow_up(&older);
        let mut items = vec![older.clone(), newer.clone()];
        Contact::sort_list(&mut items);
        assert_eq!(items[0].base.id, newer.base.id);
    }
}
