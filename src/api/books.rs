//! Book endpoints (`/api/libros`)

use axum::{
    extract::{OriginalUri, Path, State},
    http::{header, HeaderName, StatusCode},
    Json,
};
use axum_extra::extract::{Query, WithRejection};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookInput},
        page::{Page, PageParams, PageRequest},
    },
    AppState,
};

use super::location;

/// List books with pagination
#[utoipa::path(
    get,
    path = "/api/libros",
    tag = "libros",
    params(PageParams),
    responses(
        (status = 200, description = "Page of books", body = crate::models::page::BookPage),
        (status = 400, description = "Invalid sort", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<PageParams>, AppError>,
) -> AppResult<Json<Page<Book>>> {
    let page = PageRequest::from_params(&params, &state.config.pagination)?;
    let books = state.services.books.list(&page).await?;
    Ok(Json(books))
}

/// Get a book (its library is never included)
#[utoipa::path(
    get,
    path = "/api/libros/{id}",
    tag = "libros",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 422, description = "Book does not exist", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get_by_id(id).await?;
    Ok(Json(book))
}

/// Create a book in an existing library
#[utoipa::path(
    post,
    path = "/api/libros",
    tag = "libros",
    request_body = BookInput,
    responses(
        (status = 201, description = "Book created", body = Book,
            headers(("Location" = String, description = "URI of the new book"))),
        (status = 400, description = "Invalid body", body = crate::error::ErrorResponse),
        (status = 409, description = "A book with this name already exists", body = crate::error::ErrorResponse),
        (status = 422, description = "Library does not exist", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    WithRejection(Json(data), _): WithRejection<Json<BookInput>, AppError>,
) -> AppResult<(StatusCode, [(HeaderName, String); 1], Json<Book>)> {
    data.validate()?;

    let created = state.services.books.create(&data).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location(&uri, created.id))],
        Json(created),
    ))
}

/// Update a book, possibly moving it to another library
#[utoipa::path(
    put,
    path = "/api/libros/{id}",
    tag = "libros",
    params(("id" = i64, Path, description = "Book ID")),
    request_body = BookInput,
    responses(
        (status = 204, description = "Book updated"),
        (status = 400, description = "Invalid body", body = crate::error::ErrorResponse),
        (status = 409, description = "A book with this name already exists", body = crate::error::ErrorResponse),
        (status = 422, description = "Library or book does not exist", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(data), _): WithRejection<Json<BookInput>, AppError>,
) -> AppResult<StatusCode> {
    data.validate()?;

    state.services.books.update(id, &data).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/api/libros/{id}",
    tag = "libros",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 422, description = "Book does not exist", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<StatusCode> {
    state.services.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
