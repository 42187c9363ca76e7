use super::repository;
use crate::domain::a001_client::repository as clients;
use crate::domain::a002_person::repository as people;
use crate::shared::app_state::AppState;
use crate::shared::data::catalog::CATALOG;
use crate::shared::data::store::Tables;
use contracts::domain::a001_client::aggregate::ClientId;
use contracts::domain::a002_person::aggregate::PersonId;
use contracts::domain::a005_contact::aggregate::{
    Contact, ContactId, ContactUpdateDto, FollowUpDto, NewContactDto, OfferDecisionDto, RealizeDto,
};
use contracts::domain::a005_contact::links::OrphanPolicy;
use contracts::domain::a005_contact::offer::{Offer, OfferId};
use contracts::shared::error::{require_confirmation, DomainError, DomainResult};
use contracts::shared::handback::Handback;
use serde::Serialize;

/// A contact with its place in the follow-up chain
#[derive(Debug, Clone, Serialize)]
pub struct ContactDetail {
    pub contact: Contact,
    /// `None` when there is no parent or the parent was deleted
    pub parent: Option<Contact>,
    pub children: Vec<Contact>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactDeletion {
    #[serde(flatten)]
    pub handback: Handback<Contact>,
    /// Follow-ups removed along with the contact under the cascade policy
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cascaded: Vec<ContactId>,
}

fn ensure_client(tables: &Tables, client_id: ClientId) -> DomainResult<()> {
    if clients::exists(tables, client_id) {
        Ok(())
    } else {
        Err(DomainError::not_found("client", client_id))
    }
}

/// A referenced person must be a live person of the same client
fn ensure_person(tables: &Tables, client_id: ClientId, person_id: Option<PersonId>) -> DomainResult<()> {
    match person_id {
        Some(id) if people::get_by_id(tables, client_id, id).is_none() => Err(
            DomainError::invalid_field("person_id", "unknown person for this client"),
        ),
        _ => Ok(()),
    }
}

fn refused(code: &str, action: &str, e: DomainError) -> DomainError {
    if matches!(e, DomainError::InvalidTransition { .. }) {
        tracing::warn!(%code, "{} refused: {}", action, e);
    }
    e
}

pub async fn list(state: &AppState, client_id: ClientId) -> DomainResult<Vec<Contact>> {
    let tables = state.store.read().await;
    ensure_client(&tables, client_id)?;
    Ok(repository::list_by_client(&tables, client_id)
        .into_iter()
        .cloned()
        .collect())
}

pub async fn get_by_id(
    state: &AppState,
    client_id: ClientId,
    id: ContactId,
) -> DomainResult<ContactDetail> {
    let tables = state.store.read().await;
    ensure_client(&tables, client_id)?;
    let contact = repository::get_by_id(&tables, client_id, id)
        .ok_or_else(|| DomainError::not_found("contact", id))?;
    let parent = contact
        .parent_contact_id
        .and_then(|p| repository::get_by_id(&tables, client_id, p))
        .cloned();
    let children = repository::children(&tables, client_id, id)
        .into_iter()
        .cloned()
        .collect();
    Ok(ContactDetail {
        contact: contact.clone(),
        parent,
        children,
    })
}

pub async fn create(
    state: &AppState,
    client_id: ClientId,
    dto: NewContactDto,
) -> DomainResult<Handback<Contact>> {
    let mut tables = state.store.write().await;
    ensure_client(&tables, client_id)?;
    ensure_person(&tables, client_id, dto.person_id)?;

    let mut contact = Contact::create(client_id, &dto, &state.agent)?;
    contact.before_write(&state.agent);
    repository::insert(&mut tables, contact.clone());
    drop(tables);

    state
        .activity
        .record::<Contact>(
            &format!(
                "Contact {} créé ({}): {}",
                contact.base.code,
                contact.contact_type.display_name(),
                contact.motive()
            ),
        )
        .await;
    Ok(Handback::New(contact))
}

pub async fn update(
    state: &AppState,
    client_id: ClientId,
    id: ContactId,
    dto: ContactUpdateDto,
) -> DomainResult<Handback<Contact>> {
    let mut tables = state.store.write().await;
    ensure_client(&tables, client_id)?;
    ensure_person(&tables, client_id, dto.person_id)?;
    let slot = repository::get_mut(&mut tables, client_id, id)
        .ok_or_else(|| DomainError::not_found("contact", id))?;

    let mut contact = slot.clone();
    contact
        .update(&dto)
        .map_err(|e| refused(&contact.base.code, "edit", e))?;
    contact.validate()?;
    contact.before_write(&state.agent);
    *slot = contact.clone();
    drop(tables);

    state
        .activity
        .record::<Contact>(&format!("Contact {} modifié", contact.base.code))
        .await;
    Ok(Handback::Updated(contact))
}

/// Plans an interview following up on contact `id`
pub async fn follow_up(
    state: &AppState,
    client_id: ClientId,
    id: ContactId,
    dto: FollowUpDto,
) -> DomainResult<Handback<Contact>> {
    let mut tables = state.store.write().await;
    ensure_client(&tables, client_id)?;
    ensure_person(&tables, client_id, dto.person_id)?;
    let parent = repository::get_by_id(&tables, client_id, id)
        .ok_or_else(|| DomainError::not_found("contact", id))?;

    let mut interview = parent
        .plan_follow_up(&dto, &state.agent)
        .map_err(|e| refused(&parent.base.code, "follow up", e))?;
    let parent_code = parent.base.code.clone();
    interview.validate()?;
    interview.before_write(&state.agent);
    repository::insert(&mut tables, interview.clone());
    drop(tables);

    state
        .activity
        .record::<Contact>(
            &format!(
                "Entretien {} planifié suite au contact {}",
                interview.base.code, parent_code
            ),
        )
        .await;
    Ok(Handback::New(interview))
}

pub async fn realize(
    state: &AppState,
    client_id: ClientId,
    id: ContactId,
    dto: RealizeDto,
) -> DomainResult<Handback<Contact>> {
    let offers = dto
        .offers
        .iter()
        .map(|draft| CATALOG.offers.propose(draft))
        .collect::<DomainResult<Vec<Offer>>>()?;

    let mut tables = state.store.write().await;
    ensure_client(&tables, client_id)?;
    let slot = repository::get_mut(&mut tables, client_id, id)
        .ok_or_else(|| DomainError::not_found("contact", id))?;

    let mut contact = slot.clone();
    contact
        .realize(&dto.closing_comment, offers)
        .map_err(|e| refused(&contact.base.code, "realize", e))?;
    contact.validate()?;
    contact.before_write(&state.agent);
    *slot = contact.clone();
    drop(tables);

    state
        .activity
        .record::<Contact>(
            &format!(
                "Entretien {} réalisé, {} offre(s)",
                contact.base.code,
                contact.offers.len()
            ),
        )
        .await;
    Ok(Handback::Updated(contact))
}

pub async fn cancel(
    state: &AppState,
    client_id: ClientId,
    id: ContactId,
    confirmed: bool,
) -> DomainResult<Handback<Contact>> {
    require_confirmation(confirmed, "cancel interview")?;
    let mut tables = state.store.write().await;
    ensure_client(&tables, client_id)?;
    let slot = repository::get_mut(&mut tables, client_id, id)
        .ok_or_else(|| DomainError::not_found("contact", id))?;

    let mut contact = slot.clone();
    contact
        .cancel()
        .map_err(|e| refused(&contact.base.code, "cancel", e))?;
    contact.before_write(&state.agent);
    *slot = contact.clone();
    drop(tables);

    state
        .activity
        .record::<Contact>(&format!("Entretien {} annulé", contact.base.code))
        .await;
    Ok(Handback::Updated(contact))
}

pub async fn decide_offer(
    state: &AppState,
    client_id: ClientId,
    id: ContactId,
    offer_id: OfferId,
    dto: OfferDecisionDto,
) -> DomainResult<Handback<Contact>> {
    let mut tables = state.store.write().await;
    ensure_client(&tables, client_id)?;
    let slot = repository::get_mut(&mut tables, client_id, id)
        .ok_or_else(|| DomainError::not_found("contact", id))?;

    let mut contact = slot.clone();
    let offer_name = contact
        .decide_offer(offer_id, dto.status)
        .map(|o| o.name.clone())
        .map_err(|e| refused(&slot.base.code, "decide offer", e))?;
    contact.before_write(&state.agent);
    *slot = contact.clone();
    drop(tables);

    state
        .activity
        .record::<Contact>(
            &format!(
                "Offre \"{}\" de l'entretien {}: {}",
                offer_name,
                contact.base.code,
                dto.status.display_name()
            ),
        )
        .await;
    Ok(Handback::Updated(contact))
}

/// Deletes a contact; its follow-ups are handled per the configured orphan policy
pub async fn delete(
    state: &AppState,
    client_id: ClientId,
    id: ContactId,
    confirmed: bool,
) -> DomainResult<ContactDeletion> {
    require_confirmation(confirmed, "delete contact")?;
    let mut tables = state.store.write().await;
    ensure_client(&tables, client_id)?;
    let code = repository::get_by_id(&tables, client_id, id)
        .map(|c| c.base.code.clone())
        .ok_or_else(|| DomainError::not_found("contact", id))?;

    let cascaded = match state.orphan_policy {
        OrphanPolicy::AllowDangling => Vec::new(),
        OrphanPolicy::Forbid => {
            if tables.contact_links.has_children(id) {
                return Err(DomainError::Conflict(format!(
                    "contact {} still has follow-up interviews",
                    code
                )));
            }
            Vec::new()
        }
        OrphanPolicy::Cascade => tables.contact_links.descendants(id),
    };

    repository::soft_delete(&mut tables, client_id, id, &state.agent);
    for child in &cascaded {
        repository::soft_delete(&mut tables, client_id, *child, &state.agent);
    }
    drop(tables);

    let message = if cascaded.is_empty() {
        format!("Contact {} supprimé", code)
    } else {
        format!("Contact {} supprimé avec {} suivi(s)", code, cascaded.len())
    };
    state.activity.record::<Contact>(&message).await;
    Ok(ContactDeletion {
        handback: Handback::Deleted(id),
        cascaded,
    })
}
