use crate::transport::http::handlers::common::dispatch_response;
use crate::transport::http::types::{json_422, ApiResponse, AppState, ExecuteRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/api/execute",
    request_body = ExecuteRequest,
    responses(
        (status = 200, description = "Transaction submitted", body = ApiResponse),
        (status = 400, description = "Argument cannot be encoded", body = ApiResponse),
        (status = 422, description = "Unknown command shape", body = ApiResponse),
        (status = 502, description = "Contract resolution or call failed", body = ApiResponse),
        (status = 503, description = "Relay not ready", body = ApiResponse)
    )
)]
pub async fn execute_handler(
    State(state): State<AppState>,
    body: Result<Json<ExecuteRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match body {
        Ok(b) => b,
        Err(e) => {
            return json_422(
                e,
                "{ command: { type: register_sale|attach_token|end_sale|activate_sale, ... } }",
            )
            .into_response()
        }
    };
    dispatch_response(state.relay.dispatch(request.command).await)
}
