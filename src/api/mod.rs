//! API handlers for the Biblioteca REST endpoints

pub mod books;
pub mod health;
pub mod libraries;
pub mod openapi;

use axum::{http::Uri, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// `Location` of a freshly created resource: the request path plus its id
pub(crate) fn location(request_uri: &Uri, id: i64) -> String {
    format!("{}/{}", request_uri.path().trim_end_matches('/'), id)
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Libraries
        .route(
            "/api/biblioteca",
            get(libraries::list_libraries).post(libraries::create_library),
        )
        .route(
            "/api/biblioteca/:id",
            get(libraries::get_library)
                .put(libraries::update_library)
                .delete(libraries::delete_library),
        )
        // Books
        .route("/api/libros", get(books::list_books).post(books::create_book))
        .route(
            "/api/libros/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .with_state(state);

    Router::new()
        .merge(api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
