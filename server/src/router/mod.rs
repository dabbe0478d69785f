use aide::{axum::ApiRouter, openapi::OpenApi};
use axum::{Extension, Router};
use health::health_routes;
use notes::note_routes;
use notes_core::DbConfig;
use openapi::{api_docs, docs_routes};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::state::AppState;

pub mod health;
pub mod notes;
pub mod openapi;

pub fn setup_router(db: DbConfig) -> Router {
    aide::gen::on_error(|error| {
        warn!("OpenAPI generation: {error}");
    });

    aide::gen::extract_schemas(true);
    let mut api = OpenApi::default();

    let app_state = AppState::new(db);

    ApiRouter::new()
        .merge(health_routes(app_state.clone()))
        .merge(note_routes(app_state.clone()))
        .merge(docs_routes())
        .finish_api_with(&mut api, api_docs)
        .layer(Extension(Arc::new(api)))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
