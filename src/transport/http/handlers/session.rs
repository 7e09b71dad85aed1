use crate::domain::Session;
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

fn session_response(session: Session) -> Response {
    let alert_message = session.last_alert.map(|a| a.message());
    let data = serde_json::json!({
        "state": session.state,
        "identity": session.state.identity(),
        "last_alert": session.last_alert,
        "alert_message": alert_message,
        "starts": session.starts,
        "started_at": session.started_at,
    });
    (StatusCode::OK, Json(ApiResponse::ok(data))).into_response()
}

#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Current relay session", body = ApiResponse)
    )
)]
pub async fn get_session_handler(State(state): State<AppState>) -> impl IntoResponse {
    session_response(state.relay.session().await)
}

/// Re-runs startup: re-detects accounts and replaces the cached identity.
#[utoipa::path(
    post,
    path = "/api/session/start",
    responses(
        (status = 200, description = "Startup ran; inspect `state` for the outcome", body = ApiResponse)
    )
)]
pub async fn start_session_handler(State(state): State<AppState>) -> impl IntoResponse {
    state.relay.start().await;
    session_response(state.relay.session().await)
}
