use std::sync::Arc;

use aide::{
    axum::{routing::get, ApiRouter, IntoApiResponse},
    openapi::{OpenApi, Tag},
    redoc::Redoc,
    transform::TransformOpenApi,
};
use axum::{response::IntoResponse, Extension, Json};

use crate::state::AppState;

pub fn api_docs(api: TransformOpenApi) -> TransformOpenApi {
    api.title("Notes API")
        .summary("CRUD service for notes")
        .description(
            "Create, read, update and delete notes with a title, text and ISO 8601 datetime.",
        )
        .tag(Tag {
            name: "Notes".into(),
            description: Some("Note management".into()),
            ..Default::default()
        })
        .tag(Tag {
            name: "Health".into(),
            description: Some("Liveness checks".into()),
            ..Default::default()
        })
}

pub fn docs_routes() -> ApiRouter<AppState> {
    ApiRouter::new()
        .route(
            "/docs",
            Redoc::new("/docs/api.json")
                .with_title("Notes API")
                .axum_route(),
        )
        .route("/docs/api.json", get(serve_docs))
}

async fn serve_docs(Extension(api): Extension<Arc<OpenApi>>) -> impl IntoApiResponse {
    Json(api.as_ref()).into_response()
}
