#![allow(clippy::unwrap_used)]

use axum_test::TestServer;
use notes_core::DbConfig;
use serde_json::json;
use tempfile::TempDir;

use crate::{model::note::NoteDto, router::setup_router};


/// Server backed by a fresh database; keep the `TempDir` alive for the test
pub fn setup_server() -> (TempDir, TestServer) {
    let dir = TempDir::new().unwrap();
    let app = setup_router(DbConfig::new(dir.path().join("notes.db")));
    let server = TestServer::new(app).unwrap();
    (dir, server)
}

pub async fn create_note(server: &TestServer, title: &str) -> NoteDto {
    let response = server
        .post("/notes")
        .json(&json!({
            "title": title,
            "text": "b",
            "datetime": "2023-01-01T00:00:00Z"
        }))
        .await;

    response.json::<NoteDto>()
}
