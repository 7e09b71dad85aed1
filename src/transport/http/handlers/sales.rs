use crate::transport::http::handlers::common::dispatch_response;
use crate::transport::http::types::{
    json_422, ApiResponse, AppState, AttachTokenRequest, RegisterSaleRequest,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/api/sales/register",
    request_body = RegisterSaleRequest,
    responses(
        (status = 200, description = "Transaction submitted", body = ApiResponse),
        (status = 400, description = "Argument cannot be encoded", body = ApiResponse),
        (status = 502, description = "Contract resolution or call failed", body = ApiResponse),
        (status = 503, description = "Relay not ready", body = ApiResponse)
    )
)]
pub async fn register_sale_handler(
    State(state): State<AppState>,
    body: Result<Json<RegisterSaleRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match body {
        Ok(b) => b,
        Err(e) => return json_422(e, "{ sale_address, token_address }").into_response(),
    };
    dispatch_response(
        state
            .relay
            .register_sale(&req.sale_address, &req.token_address)
            .await,
    )
}

#[utoipa::path(
    post,
    path = "/api/sales/{sale_id}/token",
    params(("sale_id" = String, Path, description = "Sale id (decimal or 0x hex)")),
    request_body = AttachTokenRequest,
    responses(
        (status = 200, description = "Transaction submitted", body = ApiResponse),
        (status = 400, description = "Argument cannot be encoded", body = ApiResponse),
        (status = 502, description = "Contract resolution or call failed", body = ApiResponse),
        (status = 503, description = "Relay not ready", body = ApiResponse)
    )
)]
pub async fn attach_token_handler(
    State(state): State<AppState>,
    Path(sale_id): Path<String>,
    body: Result<Json<AttachTokenRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match body {
        Ok(b) => b,
        Err(e) => return json_422(e, "{ token_address }").into_response(),
    };
    dispatch_response(state.relay.attach_token(&sale_id, &req.token_address).await)
}

#[utoipa::path(
    post,
    path = "/api/sales/{sale_id}/end",
    params(("sale_id" = String, Path, description = "Sale id (decimal or 0x hex)")),
    responses(
        (status = 200, description = "Transaction submitted", body = ApiResponse),
        (status = 502, description = "Contract resolution or call failed", body = ApiResponse),
        (status = 503, description = "Relay not ready", body = ApiResponse)
    )
)]
pub async fn end_sale_handler(
    State(state): State<AppState>,
    Path(sale_id): Path<String>,
) -> impl IntoResponse {
    dispatch_response(state.relay.end_sale(&sale_id).await)
}

#[utoipa::path(
    post,
    path = "/api/sales/{sale_id}/activate",
    params(("sale_id" = String, Path, description = "Sale id (decimal or 0x hex)")),
    responses(
        (status = 200, description = "Transaction submitted", body = ApiResponse),
        (status = 502, description = "Contract resolution or call failed", body = ApiResponse),
        (status = 503, description = "Relay not ready", body = ApiResponse)
    )
)]
pub async fn activate_sale_handler(
    State(state): State<AppState>,
    Path(sale_id): Path<String>,
) -> impl IntoResponse {
    dispatch_response(state.relay.activate_sale(&sale_id).await)
}
