//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    routing::get,
    Json, Router,
};

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::{
    config::AppConfig,
    error::{AppError, AppResult},
    models::{Book, BookQuery, ValidationFailure},
    AppState,
};

use super::{ApiJson, RequireApiKey};

const DUPLICATE_ISBN: &str = "A book with this ISBN-13 already exists";

/// Characters escaped when an ISBN is placed in a URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

pub fn register(router: Router<AppState>, config: &AppConfig) -> Router<AppState> {
    if config.auth.api_key.is_some() {
        tracing::info!("API key required for book mutations");
    }

    router
        .route("/books", get(search_books).post(create_book))
        .route(
            "/books/:isbn",
            get(get_book).put(update_book).delete(delete_book),
        )
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    operation_id = "CreateBook",
    security(("api_key" = [])),
    request_body = Book,
    responses(
        (status = 201, description = "Book created", body = Book,
            headers(("Location" = String, description = "URL of the created book"))),
        (status = 400, description = "Invalid book or ISBN already exists", body = Vec<ValidationFailure>),
        (status = 401, description = "Missing or wrong API key")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    _: RequireApiKey,
    ApiJson(book): ApiJson<Book>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1], Json<Book>)> {
    let failures = state.services.validator.validate(&book);
    if !failures.is_empty() {
        return Err(AppError::Validation(failures));
    }

    if !state.services.books.create(&book).await? {
        return Err(AppError::Conflict(ValidationFailure::new("isbn", DUPLICATE_ISBN)));
    }

    let location = format!("/books/{}", utf8_percent_encode(&book.isbn, PATH_SEGMENT));
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(book)))
}

/// List all books, or those whose title contains `searchTerm`
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    operation_id = "SearchBooks",
    params(BookQuery),
    responses(
        (status = 200, description = "Matching books", body = Vec<Book>)
    )
)]
pub async fn search_books(
    State(state): State<AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = match query.search_term {
        Some(term) => state.services.books.search_by_title(&term).await?,
        None => state.services.books.get_all().await?,
    };
    Ok(Json(books))
}

/// Get a book by ISBN
#[utoipa::path(
    get,
    path = "/books/{isbn}",
    tag = "books",
    operation_id = "GetBook",
    params(("isbn" = String, Path, description = "Book ISBN")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> AppResult<Json<Book>> {
    state
        .services
        .books
        .get_by_isbn(&isbn)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", isbn)))
}

/// Replace a book's details; the ISBN in the path identifies the record
#[utoipa::path(
    put,
    path = "/books/{isbn}",
    tag = "books",
    operation_id = "UpdateBook",
    security(("api_key" = [])),
    params(("isbn" = String, Path, description = "Book ISBN")),
    request_body = Book,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid book", body = Vec<ValidationFailure>),
        (status = 401, description = "Missing or wrong API key"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    _: RequireApiKey,
    Path(isbn): Path<String>,
    ApiJson(mut book): ApiJson<Book>,
) -> AppResult<Json<Book>> {
    // ISBN is immutable
    book.isbn = isbn;

    let failures = state.services.validator.validate(&book);
    if !failures.is_empty() {
        return Err(AppError::Validation(failures));
    }

    if !state.services.books.update(&book).await? {
        return Err(AppError::NotFound(format!("Book {} not found", book.isbn)));
    }
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{isbn}",
    tag = "books",
    operation_id = "DeleteBook",
    security(("api_key" = [])),
    params(("isbn" = String, Path, description = "Book ISBN")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 401, description = "Missing or wrong API key"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    _: RequireApiKey,
    Path(isbn): Path<String>,
) -> AppResult<StatusCode> {
    if !state.services.books.delete(&isbn).await? {
        return Err(AppError::NotFound(format!("Book {} not found", isbn)));
    }
    Ok(StatusCode::NO_CONTENT)
}
