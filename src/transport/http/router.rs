use crate::app::relay::DispatchReceipt;
use crate::domain::{Alert, Command, Identity, Session, SetupError, TxOptions};
use crate::transport::http::handlers::{execute, health, sales, session};
use crate::transport::http::types::{
    ApiResponse, AttachTokenRequest, ExecuteRequest, RegisterSaleRequest,
};
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        session::get_session_handler,
        session::start_session_handler,
        sales::register_sale_handler,
        sales::attach_token_handler,
        sales::end_sale_handler,
        sales::activate_sale_handler,
        execute::execute_handler
    ),
    components(schemas(
        ApiResponse,
        RegisterSaleRequest,
        AttachTokenRequest,
        ExecuteRequest,
        Command,
        Identity,
        TxOptions,
        Session,
        Alert,
        SetupError,
        DispatchReceipt
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/api/session", get(session::get_session_handler))
        .route("/api/session/start", post(session::start_session_handler))
        .route("/api/sales/register", post(sales::register_sale_handler))
        .route("/api/sales/:sale_id/token", post(sales::attach_token_handler))
        .route("/api/sales/:sale_id/end", post(sales::end_sale_handler))
        .route("/api/sales/:sale_id/activate", post(sales::activate_sale_handler))
        .route("/api/execute", post(execute::execute_handler))
        .with_state(app_state)
}
