use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a005_contact::aggregate::{
    Contact, ContactUpdateDto, FollowUpDto, NewContactDto, OfferDecisionDto, RealizeDto,
};
use contracts::shared::error::ConfirmRequest;
use contracts::shared::handback::Handback;

use super::error::{confirmed, parse_id, ApiResult};
use crate::domain::a005_contact::service::{self, ContactDeletion, ContactDetail};
use crate::shared::app_state::AppState;

type ContactPath = Path<(String, String)>;

/// GET /api/clients/:client_id/contacts
pub async fn list(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> ApiResult<Json<Vec<Contact>>> {
    Ok(Json(service::list(&state, parse_id(&client_id)?).await?))
}

/// GET /api/clients/:client_id/contacts/:contact_id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((client_id, id)): ContactPath,
) -> ApiResult<Json<ContactDetail>> {
    let detail = service::get_by_id(&state, parse_id(&client_id)?, parse_id(&id)?).await?;
    Ok(Json(detail))
}

/// POST /api/clients/:client_id/contacts
pub async fn create(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Json(dto): Json<NewContactDto>,
) -> ApiResult<(StatusCode, Json<Handback<Contact>>)> {
    let handback = service::create(&state, parse_id(&client_id)?, dto).await?;
    Ok((StatusCode::CREATED, Json(handback)))
}

/// PUT /api/clients/:client_id/contacts/:contact_id
pub async fn update(
    State(state): State<AppState>,
    Path((client_id, id)): ContactPath,
    Json(dto): Json<ContactUpdateDto>,
) -> ApiResult<Json<Handback<Contact>>> {
    let handback = service::update(&state, parse_id(&client_id)?, parse_id(&id)?, dto).await?;
    Ok(Json(handback))
}

/// POST /api/clients/:client_id/contacts/:contact_id/follow-up
pub async fn follow_up(
    State(state): State<AppState>,
    Path((client_id, id)): ContactPath,
    Json(dto): Json<FollowUpDto>,
) -> ApiResult<(StatusCode, Json<Handback<Contact>>)> {
    let handback = service::follow_up(&state, parse_id(&client_id)?, parse_id(&id)?, dto).await?;
    Ok((StatusCode::CREATED, Json(handback)))
}

/// POST /api/clients/:client_id/contacts/:contact_id/realize
pub async fn realize(
    State(state): State<AppState>,
    Path((client_id, id)): ContactPath,
    Json(dto): Json<RealizeDto>,
) -> ApiResult<Json<Handback<Contact>>> {
    let handback = service::realize(&state, parse_id(&client_id)?, parse_id(&id)?, dto).await?;
    Ok(Json(handback))
}

/// POST /api/clients/:client_id/contacts/:contact_id/cancel
pub async fn cancel(
    State(state): State<AppState>,
    Path((client_id, id)): ContactPath,
    confirm: Option<Json<ConfirmRequest>>,
) -> ApiResult<Json<Handback<Contact>>> {
    let handback = service::cancel(
        &state,
        parse_id(&client_id)?,
        parse_id(&id)?,
        confirmed(confirm),
    )
    .await?;
    Ok(Json(handback))
}

/// POST /api/clients/:client_id/contacts/:contact_id/offers/:offer_id/decision
pub async fn decide_offer(
    State(state): State<AppState>,
    Path((client_id, id, offer_id)): Path<(String, String, String)>,
    Json(dto): Json<OfferDecisionDto>,
) -> ApiResult<Json<Handback<Contact>>> {
    let handback = service::decide_offer(
        &state,
        parse_id(&client_id)?,
        parse_id(&id)?,
        parse_id(&offer_id)?,
        dto,
    )
    .await?;
    Ok(Json(handback))
}

/// DELETE /api/clients/:client_id/contacts/:contact_id?confirmed=true
pub async fn delete(
    State(state): State<AppState>,
    Path((client_id, id)): ContactPath,
    Query(confirm): Query<ConfirmRequest>,
) -> ApiResult<Json<ContactDeletion>> {
    let deletion = service::delete(
        &state,
        parse_id(&client_id)?,
        parse_id(&id)?,
        confirm.confirmed,
    )
    .await?;
    Ok(Json(deletion))
}
