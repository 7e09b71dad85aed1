use crate::app::relay::{DispatchReceipt, RelayError};
use crate::transport::http::types::ApiResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub fn relay_error_status(err: &RelayError) -> StatusCode {
    match err {
        RelayError::Uninitialized | RelayError::SetupFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
        RelayError::Invoke(e) if e.is_caller_error() => StatusCode::BAD_REQUEST,
        RelayError::Resolve(_) | RelayError::Invoke(_) => StatusCode::BAD_GATEWAY,
    }
}

pub fn dispatch_response(result: Result<DispatchReceipt, RelayError>) -> Response {
    match result {
        Ok(receipt) => match serde_json::to_value(&receipt) {
            Ok(data) => (StatusCode::OK, Json(ApiResponse::ok(data))).into_response(),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::err(format!("Failed to encode receipt: {}", e))),
            )
                .into_response(),
        },
        Err(e) => (relay_error_status(&e), Json(ApiResponse::err(e.to_string()))).into_response(),
    }
}
