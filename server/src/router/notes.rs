use aide::{
    axum::{
        routing::{get_with, post_with},
        ApiRouter, IntoApiResponse,
    },
    transform::TransformOperation,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use notes_core::NoteInput;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::{
    errors::RestResult,
    model::note::{ErrorResponse, FieldErrorDto, NoteDto, NotePayload},
    state::AppState,
};

/// Path segment identifying a note
#[derive(Debug, Deserialize, JsonSchema)]
pub struct NoteIdParam {
    /// Note id as assigned on creation
    pub id: String,
}

async fn create_note(
    State(state): State<AppState>,
    Json(payload): Json<NotePayload>,
) -> impl IntoApiResponse {
    let input: NoteInput = payload.into();

    match state.with_notes(move |notes| notes.create(&input)).await {
        Ok(note) => (StatusCode::CREATED, Json(NoteDto::from(note))).into_response(),
        Err(e) => e.into_response(),
    }
}

fn create_note_docs(op: TransformOperation) -> TransformOperation {
    op.description("Create a note")
        .tag("Notes")
        .response_with::<201, Json<NoteDto>, _>(|res| res.example(example_note()))
        .response_with::<400, Json<Vec<FieldErrorDto>>, _>(|res| {
            res.description("Validation errors, one per rejected field")
        })
}

async fn read_all_notes(State(state): State<AppState>) -> impl IntoApiResponse {
    let result: RestResult<Vec<NoteDto>> = state
        .with_notes(|notes| notes.read_all())
        .await
        .map(|notes| notes.into_iter().map(|n| n.into()).collect());

    match result {
        Ok(notes) => (StatusCode::OK, Json(notes)).into_response(),
        Err(e) => e.into_response(),
    }
}

fn read_all_notes_docs(op: TransformOperation) -> TransformOperation {
    op.description("List all notes in insertion order")
        .tag("Notes")
        .response_with::<200, Json<Vec<NoteDto>>, _>(|res| res.example(vec![example_note()]))
}

async fn read_note(
    State(state): State<AppState>,
    Path(NoteIdParam { id }): Path<NoteIdParam>,
) -> impl IntoApiResponse {
    match state.with_notes(move |notes| notes.read_one(&id)).await {
        Ok(note) => (StatusCode::OK, Json(NoteDto::from(note))).into_response(),
        Err(e) => e.into_response(),
    }
}

fn read_note_docs(op: TransformOperation) -> TransformOperation {
    op.description("Get a note by id")
        .tag("Notes")
        .response_with::<200, Json<NoteDto>, _>(|res| res.example(example_note()))
        .response_with::<404, Json<ErrorResponse>, _>(|res| {
            res.description("No note with that id")
        })
}

async fn update_note(
    State(state): State<AppState>,
    Path(NoteIdParam { id }): Path<NoteIdParam>,
    Json(payload): Json<NotePayload>,
) -> impl IntoApiResponse {
    let input: NoteInput = payload.into();

    match state.with_notes(move |notes| notes.update(&id, &input)).await {
        Ok(note) => (StatusCode::OK, Json(NoteDto::from(note))).into_response(),
        Err(e) => e.into_response(),
    }
}

fn update_note_docs(op: TransformOperation) -> TransformOperation {
    op.description("Replace title, text and datetime of a note")
        .tag("Notes")
        .response_with::<200, Json<NoteDto>, _>(|res| res.example(example_note()))
        .response_with::<400, Json<Vec<FieldErrorDto>>, _>(|res| {
            res.description("Validation errors, one per rejected field")
        })
        .response_with::<404, Json<ErrorResponse>, _>(|res| {
            res.description("No note with that id")
        })
}

async fn delete_note(
    State(state): State<AppState>,
    Path(NoteIdParam { id }): Path<NoteIdParam>,
) -> impl IntoApiResponse {
    match state.with_notes(move |notes| notes.delete(&id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

fn delete_note_docs(op: TransformOperation) -> TransformOperation {
    op.description("Delete a note permanently")
        .tag("Notes")
        .response::<204, ()>()
        .response_with::<404, Json<ErrorResponse>, _>(|res| {
            res.description("No note with that id")
        })
}

fn example_note() -> NoteDto {
    NoteDto {
        id: 1,
        title: "Groceries".to_string(),
        text: "Milk, eggs".to_string(),
        datetime: "2023-01-01T00:00:00Z".to_string(),
    }
}

pub fn note_routes(_app_state: AppState) -> ApiRouter<AppState> {
    ApiRouter::new()
        .api_route(
            "/notes",
            post_with(create_note, create_note_docs).get_with(read_all_notes, read_all_notes_docs),
        )
        .api_route(
            "/notes/:id",
            get_with(read_note, read_note_docs)
                .put_with(update_note, update_note_docs)
                .delete_with(delete_note, delete_note_docs),
        )
}
