//! HTTP handlers for `/books`.

use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bookshelf_http::error::AppError;
use bookshelf_kernel::AppState;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::models::{BookEnvelope, BookList, BookPatch, Message, NewBook};
use super::repo;
use super::schema::{Schema, CREATE_BOOK, UPDATE_BOOK};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route(
            "/{isbn}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(state)
}

async fn list_books(State(state): State<AppState>) -> Result<Json<BookList>, AppError> {
    let books = repo::list(&state.db)
        .await
        .context("failed to list books")?;
    Ok(Json(BookList { books }))
}

async fn get_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<BookEnvelope>, AppError> {
    let book = repo::find(&state.db, &isbn)
        .await
        .with_context(|| format!("failed to load book {isbn}"))?
        .ok_or_else(|| missing(&isbn))?;
    Ok(Json(BookEnvelope { book }))
}

async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<BookEnvelope>), AppError> {
    let new_book: NewBook = validated(&CREATE_BOOK, payload?.0)?;

    let book = repo::insert(&state.db, new_book)
        .await
        .context("failed to create book")?;

    tracing::info!(isbn = %book.isbn, "book created");
    Ok((StatusCode::CREATED, Json(BookEnvelope { book })))
}

async fn update_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<BookEnvelope>, AppError> {
    let patch: BookPatch = validated(&UPDATE_BOOK, payload?.0)?;

    let book = repo::update(&state.db, &isbn, patch)
        .await
        .with_context(|| format!("failed to update book {isbn}"))?
        .ok_or_else(|| missing(&isbn))?;

    tracing::info!(isbn = %book.isbn, "book updated");
    Ok(Json(BookEnvelope { book }))
}

async fn delete_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<Message>, AppError> {
    let deleted = repo::delete(&state.db, &isbn)
        .await
        .with_context(|| format!("failed to delete book {isbn}"))?;
    if !deleted {
        return Err(missing(&isbn));
    }

    tracing::info!(isbn = %isbn, "book deleted");
    Ok(Json(Message {
        message: "Book deleted".to_string(),
    }))
}

fn validated<T: DeserializeOwned>(schema: &Schema, payload: Value) -> Result<T, AppError> {
    schema
        .validate(&payload)
        .map_err(|details| AppError::validation(details, "book payload failed validation"))?;
    serde_json::from_value(payload).map_err(|e| AppError::bad_request(e.to_string()))
}

fn missing(isbn: &str) -> AppError {
    AppError::not_found(format!("There is no book with an isbn of '{isbn}'"))
}
