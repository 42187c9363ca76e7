use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use contracts::shared::logger::LogEntry;

use crate::shared::app_state::AppState;

/// GET /api/logs
pub async fn list_all(State(state): State<AppState>) -> Json<Vec<LogEntry>> {
    Json(state.activity.get_all_logs().await)
}

/// DELETE /api/logs
pub async fn clear_all(State(state): State<AppState>) -> StatusCode {
    state.activity.clear_all_logs().await;
    StatusCode::NO_CONTENT
}
