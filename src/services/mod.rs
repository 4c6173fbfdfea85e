//! Business logic services

pub mod books;
pub mod libraries;

use crate::{
    error::{AppError, AppResult},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub libraries: libraries::LibrariesService,
    pub books: books::BooksService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            libraries: libraries::LibrariesService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            repository,
        }
    }

    /// Check that the database answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}

pub(crate) fn library_not_found(id: i64) -> AppError {
    AppError::NotProcessable(format!("Library {} does not exist", id))
}

pub(crate) fn book_not_found(id: i64) -> AppError {
    AppError::NotProcessable(format!("Book {} does not exist", id))
}
