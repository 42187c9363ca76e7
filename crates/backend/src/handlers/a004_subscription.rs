use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a004_subscription::aggregate::{
    NewSubscriptionDto, Subscription, SubscriptionUpdateDto, TerminateRequest, ToggleOptionRequest,
};
use contracts::shared::error::ConfirmRequest;
use contracts::shared::handback::Handback;

use super::error::{confirmed, parse_id, ApiResult};
use crate::domain::a004_subscription::service::{self, SubscriptionDetail, SubscriptionList};
use crate::shared::app_state::AppState;

type SubscriptionPath = Path<(String, String)>;

/// GET /api/clients/:client_id/subscriptions
pub async fn list(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> ApiResult<Json<SubscriptionList>> {
    Ok(Json(service::list(&state, parse_id(&client_id)?).await?))
}

/// GET /api/clients/:client_id/subscriptions/:subscription_id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((client_id, id)): SubscriptionPath,
) -> ApiResult<Json<SubscriptionDetail>> {
    let detail = service::get_by_id(&state, parse_id(&client_id)?, parse_id(&id)?).await?;
    Ok(Json(detail))
}

/// POST /api/clients/:client_id/subscriptions
pub async fn create(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Json(dto): Json<NewSubscriptionDto>,
) -> ApiResult<(StatusCode, Json<Handback<Subscription>>)> {
    let handback = service::create(&state, parse_id(&client_id)?, dto).await?;
    Ok((StatusCode::CREATED, Json(handback)))
}

/// PUT /api/clients/:client_id/subscriptions/:subscription_id
pub async fn update(
    State(state): State<AppState>,
    Path((client_id, id)): SubscriptionPath,
    Json(dto): Json<SubscriptionUpdateDto>,
) -> ApiResult<Json<Handback<Subscription>>> {
    let handback = service::update(&state, parse_id(&client_id)?, parse_id(&id)?, dto).await?;
    Ok(Json(handback))
}

/// POST .../subscriptions/:subscription_id/toggle-option
pub async fn toggle_option(
    State(state): State<AppState>,
    Path((client_id, id)): SubscriptionPath,
    Json(request): Json<ToggleOptionRequest>,
) -> ApiResult<Json<Handback<Subscription>>> {
    let handback = service::toggle_option(
        &state,
        parse_id(&client_id)?,
        parse_id(&id)?,
        request.option_id,
    )
    .await?;
    Ok(Json(handback))
}

/// POST .../subscriptions/:subscription_id/activate
pub async fn activate(
    State(state): State<AppState>,
    Path((client_id, id)): SubscriptionPath,
) -> ApiResult<Json<Handback<Subscription>>> {
    let handback = service::activate(&state, parse_id(&client_id)?, parse_id(&id)?).await?;
    Ok(Json(handback))
}

/// POST .../subscriptions/:subscription_id/terminate
pub async fn terminate(
    State(state): State<AppState>,
    Path((client_id, id)): SubscriptionPath,
    request: Option<Json<TerminateRequest>>,
) -> ApiResult<Json<Handback<Subscription>>> {
    let handback = service::terminate(
        &state,
        parse_id(&client_id)?,
        parse_id(&id)?,
        request.map(|Json(r)| r).unwrap_or_default(),
    )
    .await?;
    Ok(Json(handback))
}

/// POST .../subscriptions/:subscription_id/cancel
pub async fn cancel(
    State(state): State<AppState>,
    Path((client_id, id)): SubscriptionPath,
    confirm: Option<Json<ConfirmRequest>>,
) -> ApiResult<Json<Handback<Subscription>>> {
    let handback = service::cancel(
        &state,
        parse_id(&client_id)?,
        parse_id(&id)?,
        confirmed(confirm),
    )
    .await?;
    Ok(Json(handback))
}

/// DELETE /api/clients/:client_id/subscriptions/:subscription_id?confirmed=true
pub async fn delete(
    State(state): State<AppState>,
    Path((client_id, id)): SubscriptionPath,
    Query(confirm): Query<ConfirmRequest>,
) -> ApiResult<Json<Handback<Subscription>>> {
    let handback = service::delete(
        &state,
        parse_id(&client_id)?,
        parse_id(&id)?,
        confirm.confirmed,
    )
    .await?;
    Ok(Json(handback))
}
