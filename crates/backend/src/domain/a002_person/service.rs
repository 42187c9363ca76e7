use super::repository;
use crate::domain::a001_client::repository as clients;
use crate::domain::a005_contact::repository as contacts;
use crate::shared::app_state::AppState;
use crate::shared::data::store::Tables;
use contracts::domain::a001_client::aggregate::ClientId;
use contracts::domain::a002_person::aggregate::{Person, PersonDto, PersonId};
use contracts::shared::error::{require_confirmation, DomainError, DomainResult};
use contracts::shared::handback::Handback;

fn ensure_client(tables: &Tables, client_id: ClientId) -> DomainResult<()> {
    if clients::exists(tables, client_id) {
        Ok(())
    } else {
        Err(DomainError::not_found("client", client_id))
    }
}

pub async fn list(state: &AppState, client_id: ClientId) -> DomainResult<Vec<Person>> {
    let tables = state.store.read().await;
    ensure_client(&tables, client_id)?;
    Ok(repository::list_by_client(&tables, client_id)
        .into_iter()
        .cloned()
        .collect())
}

pub async fn get_by_id(state: &AppState, client_id: ClientId, id: PersonId) -> DomainResult<Person> {
    let tables = state.store.read().await;
    ensure_client(&tables, client_id)?;
    repository::get_by_id(&tables, client_id, id)
        .cloned()
        .ok_or_else(|| DomainError::not_found("person", id))
}

pub async fn create(
    state: &AppState,
    client_id: ClientId,
    dto: PersonDto,
) -> DomainResult<Handback<Person>> {
    let mut tables = state.store.write().await;
    ensure_client(&tables, client_id)?;

    let mut person = Person::new_for_insert(client_id, &dto);
    person.validate()?;
    person.before_write(&state.agent);
    repository::insert(&mut tables, person.clone());
    drop(tables);

    state
        .activity
        .record::<Person>(&format!("Personne ajoutée: {}", person.full_name()))
        .await;
    Ok(Handback::New(person))
}

pub async fn update(
    state: &AppState,
    client_id: ClientId,
    id: PersonId,
    dto: PersonDto,
) -> DomainResult<Handback<Person>> {
    let mut tables = state.store.write().await;
    ensure_client(&tables, client_id)?;
    let slot = repository::get_mut(&mut tables, client_id, id)
        .ok_or_else(|| DomainError::not_found("person", id))?;

    let mut person = slot.clone();
    person.update(&dto);
    person.validate()?;
    person.before_write(&state.agent);
    *slot = person.clone();
    drop(tables);

    state
        .activity
        .record::<Person>(&format!("Personne modifiée: {}", person.full_name()))
        .await;
    Ok(Handback::Updated(person))
}

pub async fn delete(
    state: &AppState,
    client_id: ClientId,
    id: PersonId,
    confirmed: bool,
) -> DomainResult<Handback<Person>> {
    require_confirmation(confirmed, "delete person")?;
    let mut tables = state.store.write().await;
    ensure_client(&tables, client_id)?;
    if !repository::soft_delete(&mut tables, client_id, id, &state.agent) {
        return Err(DomainError::not_found("person", id));
    }
    // contacts keep no reference to a deleted person
    let detached = contacts::detach_person(&mut tables, client_id, id, &state.agent);
    drop(tables);

    let message = if detached == 0 {
        format!("Personne supprimée: {}", id)
    } else {
        format!("Personne supprimée: {} ({} contact(s) détaché(s))", id, detached)
    };
    state.activity.record::<Person>(&message).await;
    Ok(Handback::Deleted(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::seed::mock_tables;
    use contracts::domain::a005_contact::links::OrphanPolicy;

    fn state() -> AppState {
        AppState::new(mock_tables().unwrap(), "Agent Test", OrphanPolicy::default())
    }

    async fn client_id(state: &AppState, index: usize) -> ClientId {
        state.store.read().await.clients[index].base.id
    }

    fn marie() -> PersonDto {
        PersonDto {
            first_name: "Marie".into(),
            last_name: "Curie".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_update_delete() {
        let state = state();
        let client_id = client_id(&state, 0).await;

        let created = create(&state, client_id, marie()).await.unwrap();
        assert_eq!(created.key(), "newPerson");
        let person = match created {
            Handback::New(p) => p,
            other => panic!("unexpected: {:?}", other),
        };
        assert_eq!(person.role, "Membre");
        assert_eq!(list(&state, client_id).await.unwrap().len(), 2);

        let mut dto = marie();
        dto.role = Some("Associée".into());
        let updated = update(&state, client_id, person.base.id, dto).await.unwrap();
        assert_eq!(updated.key(), "updatedPerson");

        assert!(matches!(
            delete(&state, client_id, person.base.id, false).await,
            Err(DomainError::ConfirmationRequired(_))
        ));
        let deleted = delete(&state, client_id, person.base.id, true).await.unwrap();
        assert_eq!(deleted, Handback::Deleted(person.base.id));
        assert_eq!(list(&state, client_id).await.unwrap().len(), 1);
        assert!(matches!(
            get_by_id(&state, client_id, person.base.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_validation_and_unknown_client() {
        let state = state();
        let client_id = client_id(&state, 0).await;
        assert!(matches!(
            create(&state, client_id, PersonDto::default()).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            create(&state, ClientId::new_v4(), marie()).await,
            Err(DomainError::NotFound { entity: "client", .. })
        ));
    }

    #[tokio::test]
    async fn test_person_of_another_client_is_not_found() {
        let state = state();
        let techno = client_id(&state, 0).await;
        let martin = client_id(&state, 1).await;
        let dupont = list(&state, techno).await.unwrap()[0].base.id;
        assert!(matches!(
            get_by_id(&state, martin, dupont).await,
            Err(DomainError::NotFound { entity: "person", .. })
        ));
    }
}
