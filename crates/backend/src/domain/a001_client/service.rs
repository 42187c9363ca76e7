use super::repository;
use crate::shared::app_state::AppState;
use crate::shared::data::catalog::CATALOG;
use contracts::domain::a001_client::aggregate::{Client, ClientDto, ClientId};
use contracts::domain::a001_client::search::ClientSearch;
use contracts::domain::a001_client::summary::ClientSummary;
use contracts::shared::error::{DomainError, DomainResult};
use contracts::shared::handback::Handback;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ClientDetail {
    pub client: Client,
    pub summary: ClientSummary,
}

/// Dashboard search
pub async fn search(state: &AppState, query: &ClientSearch) -> Vec<Client> {
    let tables = state.store.read().await;
    query
        .apply(&tables.clients, &tables.people)
        .into_iter()
        .cloned()
        .collect()
}

pub async fn get_detail(state: &AppState, id: ClientId) -> DomainResult<ClientDetail> {
    let tables = state.store.read().await;
    let client = repository::get_by_id(&tables, id)
        .ok_or_else(|| DomainError::not_found("client", id))?;
    let summary = ClientSummary::build(
        client,
        &tables.people,
        &tables.contacts,
        &tables.subscriptions,
        &CATALOG.templates,
    );
    Ok(ClientDetail {
        client: client.clone(),
        summary,
    })
}

pub async fn update(
    state: &AppState,
    id: ClientId,
    dto: ClientDto,
) -> DomainResult<Handback<Client>> {
    let mut tables = state.store.write().await;
    let slot = repository::get_mut(&mut tables, id)
        .ok_or_else(|| DomainError::not_found("client", id))?;

    let mut client = slot.clone();
    client.update(&dto);
    client.validate()?;
    client.before_write(&state.agent);
    *slot = client.clone();
    drop(tables);

    state
        .activity
        .record::<Client>(
            &format!("Client {} mis à jour", client.client_number()),
        )
        .await;
    Ok(Handback::Updated(client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::seed::mock_tables;
    use contracts::domain::a001_client::search::ClientFilter;
    use contracts::domain::a005_contact::links::OrphanPolicy;

    fn state() -> AppState {
        AppState::new(mock_tables().unwrap(), "Agent Test", OrphanPolicy::default())
    }

    async fn first_client(state: &AppState) -> Client {
        state.store.read().await.clients[0].clone()
    }

    #[tokio::test]
    async fn test_search_by_member_and_city() {
        let state = state();
        let by_member = search(
            &state,
            &ClientSearch {
                query: "dupont".into(),
                city: String::new(),
                filter: ClientFilter::Members,
            },
        )
        .await;
        assert_eq!(by_member.len(), 1);
        assert_eq!(by_member[0].client_number(), "C2024-00147");

        let paris = search(
            &state,
            &ClientSearch {
                city: "paris".into(),
                ..Default::default()
            },
        )
        .await;
        assert_eq!(paris.len(), 3);
    }

    #[tokio::test]
    async fn test_detail_summary() {
        let state = state();
        let client = first_client(&state).await;
        let detail = get_detail(&state, client.base.id).await.unwrap();
        assert_eq!(detail.summary.people_count, 1);
        assert_eq!(detail.summary.contact_count, 2);
        assert_eq!(detail.summary.planned_interview_count, 1);
        assert_eq!(detail.summary.subscriptions.active_count, 2);
        assert_eq!(detail.summary.subscriptions.active_monthly_total, 700.0);
        assert_eq!(detail.summary.subscriptions.active_annual_total, 8400.0);
        assert_eq!(detail.summary.domains.len(), 2);
    }

    #[tokio::test]
    async fn test_update_validates_and_stamps_agent() {
        let state = state();
        let client = first_client(&state).await;

        let mut dto = ClientDto::from(&client);
        dto.potential = 101;
        assert!(matches!(
            update(&state, client.base.id, dto).await,
            Err(DomainError::Validation(_))
        ));

        let mut dto = ClientDto::from(&client);
        dto.denomination = "TechnoSolutions SAS".into();
        let handback = update(&state, client.base.id, dto).await.unwrap();
        assert_eq!(handback.key(), "updatedClient");
        match handback {
            Handback::Updated(c) => {
                assert_eq!(c.denomination(), "TechnoSolutions SAS");
                assert_eq!(c.base.metadata.modified_by.as_deref(), Some("Agent Test"));
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(state.activity.get_all_logs().await.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_client() {
        let state = state();
        assert!(matches!(
            get_detail(&state, ClientId::new_v4()).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
