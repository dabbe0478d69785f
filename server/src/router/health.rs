use aide::{
    axum::{routing::get_with, ApiRouter, IntoApiResponse},
    transform::TransformOperation,
};
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::warn;

use crate::state::AppState;

pub fn health_routes(_app_state: AppState) -> ApiRouter<AppState> {
    ApiRouter::new()
        .api_route("/health/ping", get_with(ping, ping_docs))
        .api_route("/health/db", get_with(db_ping, db_ping_docs))
}

pub async fn ping() -> impl IntoApiResponse {
    StatusCode::OK
}

pub fn ping_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Health check")
        .description("Health check endpoint")
        .tag("Health")
        .response::<200, ()>() // Simple 200 OK response with no body
}

pub async fn db_ping(State(state): State<AppState>) -> impl IntoApiResponse {
    match state.with_notes(|notes| notes.ping()).await {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => {
            warn!("Notes database unavailable: {}", e);
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
    }
}

pub fn db_ping_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Database health check")
        .description("Opens the notes database and reports whether it is reachable")
        .tag("Health")
        .response::<200, ()>()
        .response_with::<503, (), _>(|res| res.description("Database cannot be opened"))
}
