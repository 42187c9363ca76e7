use axum::extract::{Path, Query, State};
use axum::Json;
use contracts::domain::a001_client::aggregate::{Client, ClientDto};
use contracts::domain::a001_client::search::ClientSearch;
use contracts::shared::handback::Handback;

use super::error::{parse_id, ApiResult};
use crate::domain::a001_client::service::{self, ClientDetail};
use crate::shared::app_state::AppState;

/// GET /api/clients?q=&city=&filter=
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<ClientSearch>,
) -> Json<Vec<Client>> {
    Json(service::search(&state, &query).await)
}

/// GET /api/clients/:client_id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> ApiResult<Json<ClientDetail>> {
    let id = parse_id(&client_id)?;
    Ok(Json(service::get_detail(&state, id).await?))
}

/// PUT /api/clients/:client_id
pub async fn update(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Json(dto): Json<ClientDto>,
) -> ApiResult<Json<Handback<Client>>> {
    let id = parse_id(&client_id)?;
    Ok(Json(service::update(&state, id, dto).await?))
}
