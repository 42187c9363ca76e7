use super::repository;
use crate::domain::a001_client::repository as clients;
use crate::shared::app_state::AppState;
use crate::shared::data::catalog::CATALOG;
use crate::shared::data::store::Tables;
use contracts::domain::a001_client::aggregate::ClientId;
use contracts::domain::a003_contract_template::aggregate::{ContractTemplate, TemplateOptionId};
use contracts::domain::a004_subscription::aggregate::{
    NewSubscriptionDto, Subscription, SubscriptionId, SubscriptionStats, SubscriptionUpdateDto,
    TerminateRequest,
};
use contracts::shared::error::{require_confirmation, DomainError, DomainResult};
use contracts::shared::handback::Handback;
use contracts::shared::money::format_eur;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionList {
    pub items: Vec<Subscription>,
    pub stats: SubscriptionStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionDetail {
    pub subscription: Subscription,
    pub template: ContractTemplate,
}

fn ensure_client(tables: &Tables, client_id: ClientId) -> DomainResult<()> {
    if clients::exists(tables, client_id) {
        Ok(())
    } else {
        Err(DomainError::not_found("client", client_id))
    }
}

fn template_of(subscription: &Subscription) -> DomainResult<&'static ContractTemplate> {
    CATALOG
        .template(subscription.template_id)
        .ok_or_else(|| DomainError::not_found("contract template", subscription.template_id))
}

pub async fn list(state: &AppState, client_id: ClientId) -> DomainResult<SubscriptionList> {
    let tables = state.store.read().await;
    ensure_client(&tables, client_id)?;
    let items = repository::list_by_client(&tables, client_id);
    let stats = SubscriptionStats::from_subscriptions(items.iter().copied());
    Ok(SubscriptionList {
        items: items.into_iter().cloned().collect(),
        stats,
    })
}

pub async fn get_by_id(
    state: &AppState,
    client_id: ClientId,
    id: SubscriptionId,
) -> DomainResult<SubscriptionDetail> {
    let tables = state.store.read().await;
    ensure_client(&tables, client_id)?;
    let subscription = repository::get_by_id(&tables, client_id, id)
        .ok_or_else(|| DomainError::not_found("subscription", id))?;
    Ok(SubscriptionDetail {
        template: template_of(subscription)?.clone(),
        subscription: subscription.clone(),
    })
}

/// New subscription from a catalogue selection
pub async fn create(
    state: &AppState,
    client_id: ClientId,
    dto: NewSubscriptionDto,
) -> DomainResult<Handback<Subscription>> {
    let template_id = dto
        .template_id
        .ok_or_else(|| DomainError::invalid_field("template_id", "required"))?;
    let template = CATALOG
        .template(template_id)
        .ok_or_else(|| DomainError::not_found("contract template", template_id))?;

    let mut tables = state.store.write().await;
    ensure_client(&tables, client_id)?;

    let today = chrono::Utc::now().date_naive();
    let mut subscription =
        Subscription::from_template(client_id, template, &dto, &state.agent, today)?;
    subscription.validate(template)?;
    subscription.before_write(&state.agent);
    repository::insert(&mut tables, subscription.clone());
    drop(tables);

    state
        .activity
        .record::<Subscription>(
            &format!(
                "Souscription {} créée ({}), {} par mois",
                subscription.base.code,
                template.title(),
                format_eur(subscription.amounts().monthly)
            ),
        )
        .await;
    Ok(Handback::New(subscription))
}

/// Applies `change` to a copy of the subscription and stores it once it is valid
async fn mutate<F>(
    state: &AppState,
    client_id: ClientId,
    id: SubscriptionId,
    label: &str,
    change: F,
) -> DomainResult<Handback<Subscription>>
where
    F: FnOnce(&mut Subscription, &ContractTemplate) -> DomainResult<()>,
{
    let mut tables = state.store.write().await;
    ensure_client(&tables, client_id)?;
    let slot = repository::get_mut(&mut tables, client_id, id)
        .ok_or_else(|| DomainError::not_found("subscription", id))?;
    let template = template_of(slot)?;

    let mut subscription = slot.clone();
    if let Err(e) = change(&mut subscription, template) {
        tracing::warn!(code = %subscription.base.code, "{} refused: {}", label, e);
        return Err(e);
    }
    subscription.validate(template)?;
    subscription.before_write(&state.agent);
    *slot = subscription.clone();
    drop(tables);

    state
        .activity
        .record::<Subscription>(
            &format!("Souscription {}: {}", subscription.base.code, label),
        )
        .await;
    Ok(Handback::Updated(subscription))
}

pub async fn update(
    state: &AppState,
    client_id: ClientId,
    id: SubscriptionId,
    dto: SubscriptionUpdateDto,
) -> DomainResult<Handback<Subscription>> {
    mutate(state, client_id, id, "modification", |s, t| {
        s.apply_update(t, &dto)
    })
    .await
}

pub async fn toggle_option(
    state: &AppState,
    client_id: ClientId,
    id: SubscriptionId,
    option_id: TemplateOptionId,
) -> DomainResult<Handback<Subscription>> {
    mutate(state, client_id, id, "option basculée", |s, t| {
        s.toggle_option(t, option_id)
    })
    .await
}

pub async fn activate(
    state: &AppState,
    client_id: ClientId,
    id: SubscriptionId,
) -> DomainResult<Handback<Subscription>> {
    mutate(state, client_id, id, "activation", |s, _| s.activate()).await
}

pub async fn terminate(
    state: &AppState,
    client_id: ClientId,
    id: SubscriptionId,
    request: TerminateRequest,
) -> DomainResult<Handback<Subscription>> {
    require_confirmation(request.confirmed, "terminate subscription")?;
    mutate(state, client_id, id, "résiliation", |s, _| {
        s.terminate(request.end_date)
    })
    .await
}

pub async fn cancel(
    state: &AppState,
    client_id: ClientId,
    id: SubscriptionId,
    confirmed: bool,
) -> DomainResult<Handback<Subscription>> {
    require_confirmation(confirmed, "cancel subscription")?;
    mutate(state, client_id, id, "annulation", |s, _| s.cancel()).await
}

pub async fn delete(
    state: &AppState,
    client_id: ClientId,
    id: SubscriptionId,
    confirmed: bool,
) -> DomainResult<Handback<Subscription>> {
    require_confirmation(confirmed, "delete subscription")?;
    let mut tables = state.store.write().await;
    ensure_client(&tables, client_id)?;
    let subscription = repository::get_mut(&mut tables, client_id, id)
        .ok_or_else(|| DomainError::not_found("subscription", id))?;
    subscription.base.metadata.is_deleted = true;
    subscription.before_write(&state.agent);
    let code = subscription.base.code.clone();
    drop(tables);

    state
        .activity
        .record::<Subscription>(&format!("Souscription {} supprimée", code))
        .await;
    Ok(Handback::Deleted(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::catalog::option_ids;
    use crate::shared::data::seed::mock_tables;
    use chrono::NaiveDate;
    use contracts::domain::a004_subscription::aggregate::SubscriptionState;
    use contracts::domain::a005_contact::links::OrphanPolicy;
    use contracts::enums::periodicity::Periodicity;

    fn state() -> AppState {
        AppState::new(mock_tables().unwrap(), "Agent Test", OrphanPolicy::default())
    }

    async fn client_id(state: &AppState, index: usize) -> ClientId {
        state.store.read().await.clients[index].base.id
    }

    fn rc() -> &'static ContractTemplate {
        CATALOG.template_by_code("ASS-RC-PRO").unwrap()
    }

    fn new_dto() -> NewSubscriptionDto {
        NewSubscriptionDto {
            template_id: Some(rc().base.id),
            periodicity: Periodicity::Monthly,
            subscription_date: NaiveDate::from_ymd_opt(2024, 11, 20),
            subscribed_option_ids: option_ids(rc(), &["OPT_ASS_RC_001"]),
            ..Default::default()
        }
    }

    fn record(handback: Handback<Subscription>) -> Subscription {
        match handback {
            Handback::New(s) | Handback::Updated(s) => s,
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_and_stats() {
        let state = state();
        let client_id = client_id(&state, 0).await;
        let list = list(&state, client_id).await.unwrap();
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.items[0].base.code, "TEL-ENT-2023-892");
        assert_eq!(list.stats.active_count, 2);
        assert_eq!(list.stats.active_annual_total, 8400.0);
    }

    #[tokio::test]
    async fn test_create_then_price_changes() {
        let state = state();
        let client_id = client_id(&state, 1).await;

        let created = create(&state, client_id, new_dto()).await.unwrap();
        assert_eq!(created.key(), "newSubscription");
        let sub = record(created);
        assert_eq!(sub.state, SubscriptionState::Planned);
        assert_eq!(sub.amounts().annual, 3000.0);
        assert_eq!(sub.origin_agent, "Agent Test");

        let paid = option_ids(rc(), &["OPT_ASS_RC_001"])[0];
        let toggled = record(toggle_option(&state, client_id, sub.base.id, paid).await.unwrap());
        assert_eq!(toggled.amounts().monthly, 200.0);
        assert_eq!(toggled.amounts().annual, 2400.0);

        let mut dto = SubscriptionUpdateDto::from(&toggled);
        dto.periodicity = Periodicity::Annual;
        let updated = record(update(&state, client_id, sub.base.id, dto).await.unwrap());
        assert_eq!(updated.amounts().annual, 2400.0);
        assert_eq!(updated.amounts().monthly, 200.0);
    }

    #[tokio::test]
    async fn test_create_requires_known_template() {
        let state = state();
        let client_id = client_id(&state, 1).await;
        let mut dto = new_dto();
        dto.template_id = None;
        assert!(matches!(
            create(&state, client_id, dto).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            create(&state, ClientId::new_v4(), new_dto()).await,
            Err(DomainError::NotFound { entity: "client", .. })
        ));
    }

    #[tokio::test]
    async fn test_lifecycle_with_confirmation() {
        let state = state();
        let client_id = client_id(&state, 1).await;
        let sub = record(create(&state, client_id, new_dto()).await.unwrap());
        let id = sub.base.id;

        let terminate_req = TerminateRequest {
            end_date: NaiveDate::from_ymd_opt(2025, 11, 20),
            confirmed: true,
        };
        assert!(matches!(
            terminate(&state, client_id, id, terminate_req.clone()).await,
            Err(DomainError::InvalidTransition { .. })
        ));

        activate(&state, client_id, id).await.unwrap();
        assert!(matches!(
            terminate(
                &state,
                client_id,
                id,
                TerminateRequest {
                    confirmed: false,
                    ..terminate_req.clone()
                }
            )
            .await,
            Err(DomainError::ConfirmationRequired(_))
        ));
        let ended = record(terminate(&state, client_id, id, terminate_req).await.unwrap());
        assert_eq!(ended.state, SubscriptionState::Terminated);

        assert!(matches!(
            cancel(&state, client_id, id, true).await,
            Err(DomainError::InvalidTransition { .. })
        ));

        // still stored as terminated
        let detail = get_by_id(&state, client_id, id).await.unwrap();
        assert_eq!(detail.subscription.state, SubscriptionState::Terminated);
        assert_eq!(detail.template.base.code, "ASS-RC-PRO");
    }

    #[tokio::test]
    async fn test_delete() {
        let state = state();
        let client_id = client_id(&state, 0).await;
        let id = list(&state, client_id).await.unwrap().items[0].base.id;

        assert!(matches!(
            delete(&state, client_id, id, false).await,
            Err(DomainError::ConfirmationRequired(_))
        ));
        assert_eq!(
            delete(&state, client_id, id, true).await.unwrap(),
            Handback::Deleted(id)
        );
        assert_eq!(list(&state, client_id).await.unwrap().items.len(), 1);
        assert!(matches!(
            get_by_id(&state, client_id, id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
