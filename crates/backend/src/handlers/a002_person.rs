use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a002_person::aggregate::{Person, PersonDto};
use contracts::shared::error::ConfirmRequest;
use contracts::shared::handback::Handback;

use super::error::{parse_id, ApiResult};
use crate::domain::a002_person::service;
use crate::shared::app_state::AppState;

/// GET /api/clients/:client_id/people
pub async fn list(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> ApiResult<Json<Vec<Person>>> {
    let client_id = parse_id(&client_id)?;
    Ok(Json(service::list(&state, client_id).await?))
}

/// GET /api/clients/:client_id/people/:person_id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((client_id, person_id)): Path<(String, String)>,
) -> ApiResult<Json<Person>> {
    let person = service::get_by_id(&state, parse_id(&client_id)?, parse_id(&person_id)?).await?;
    Ok(Json(person))
}

/// POST /api/clients/:client_id/people
pub async fn create(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Json(dto): Json<PersonDto>,
) -> ApiResult<(StatusCode, Json<Handback<Person>>)> {
    let client_id = parse_id(&client_id)?;
    let handback = service::create(&state, client_id, dto).await?;
    Ok((StatusCode::CREATED, Json(handback)))
}

/// PUT /api/clients/:client_id/people/:person_id
pub async fn update(
    State(state): State<AppState>,
    Path((client_id, person_id)): Path<(String, String)>,
    Json(dto): Json<PersonDto>,
) -> ApiResult<Json<Handback<Person>>> {
    let handback =
        service::update(&state, parse_id(&client_id)?, parse_id(&person_id)?, dto).await?;
    Ok(Json(handback))
}

/// DELETE /api/clients/:client_id/people/:person_id?confirmed=true
pub async fn delete(
    State(state): State<AppState>,
    Path((client_id, person_id)): Path<(String, String)>,
    Query(confirm): Query<ConfirmRequest>,
) -> ApiResult<Json<Handback<Person>>> {
    let handback = service::delete(
        &state,
        parse_id(&client_id)?,
        parse_id(&person_id)?,
        confirm.confirmed,
    )
    .await?;
    Ok(Json(handback))
}
