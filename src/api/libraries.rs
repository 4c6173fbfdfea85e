//! Library endpoints (`/api/biblioteca`)

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
        library::{Library, LibraryInput},
        page::{Page, PageParams, PageRequest},
    },
    AppState,
};

use super::location;

/// List libraries with pagination
#[utoipa::path(
    get,
    path = "/api/biblioteca",
    tag = "biblioteca",
    params(PageParams),
    responses(
        (status = 200, description = "Page of libraries", body = crate::models::page::LibraryPage),
        (status = 400, description = "Invalid sort", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_libraries(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<PageParams>, AppError>,
) -> AppResult<Json<Page<Library>>> {
    let page = PageRequest::from_params(&params, &state.config.pagination)?;
    let libraries = state.services.libraries.list(&page).await?;
    Ok(Json(libraries))
}

/// Get a library with its books
#[utoipa::path(
    get,
    path = "/api/biblioteca/{id}",
    tag = "biblioteca",
    params(("id" = i64, Path, description = "Library ID")),
    responses(
        (status = 200, description = "Library details", body = Library),
        (status = 422, description = "Library does not exist", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_library(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<Json<Library>> {
    let library = state.services.libraries.get_by_id(id).await?;
    Ok(Json(library))
}

/// Create a library
#[utoipa::path(
    post,
    path = "/api/biblioteca",
    tag = "biblioteca",
    request_body = LibraryInput,
    responses(
        (status = 201, description = "Library created", body = Library,
            headers(("Location" = String, description = "URI of the new library"))),
        (status = 400, description = "Invalid body", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_library(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    WithRejection(Json(data), _): WithRejection<Json<LibraryInput>, AppError>,
) -> AppResult<(StatusCode, [(HeaderName, String); 1], Json<Library>)> {
    data.validate()?;

    let created = state.services.libraries.create(&data).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location(&uri, created.id))],
        Json(created),
    ))
}

/// Update a library
#[utoipa::path(
    put,
    path = "/api/biblioteca/{id}",
    tag = "biblioteca",
    params(("id" = i64, Path, description = "Library ID")),
    request_body = LibraryInput,
    responses(
        (status = 204, description = "Library updated"),
        (status = 400, description = "Invalid body", body = crate::error::ErrorResponse),
        (status = 422, description = "Library does not exist", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_library(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(data), _): WithRejection<Json<LibraryInput>, AppError>,
) -> AppResult<StatusCode> {
    data.validate()?;

    state.services.libraries.update(id, &data).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a library and all of its books
#[utoipa::path(
    delete,
    path = "/api/biblioteca/{id}",
    tag = "biblioteca",
    params(("id" = i64, Path, description = "Library ID")),
    responses(
        (status = 204, description = "Library and its books deleted"),
        (status = 422, description = "Library does not exist", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_library(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<StatusCode> {
    state.services.libraries.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
