//! Book service
//!
//! Every write resolves the owning library first, under a share lock, so the
//! library cannot be deleted between the check and the write.

use super::{book_not_found, library_not_found};
use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookInput},
        page::{Page, PageRequest},
    },
    repository::{LockMode, Repository},
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

fn required_fields(data: &BookInput) -> AppResult<(&str, i64)> {
    data.fields().ok_or_else(|| {
        AppError::Validation("nombre and biblioteca.id are required".to_string())
    })
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, page: &PageRequest) -> AppResult<Page<Book>> {
        let (books, total) = self.repository.books.list(page).await?;
        Ok(Page::new(books, page, total))
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        self.repository
            .books
            .get_by_id(id)
            .await?
            .map(Book::from)
            .ok_or_else(|| book_not_found(id))
    }

    pub async fn create(&self, data: &BookInput) -> AppResult<Book> {
        let (nombre, biblioteca_id) = required_fields(data)?;

        let mut tx = self.repository.begin().await?;
        self.repository
            .libraries
            .lock(&mut tx, biblioteca_id, LockMode::Share)
            .await?
            .ok_or_else(|| library_not_found(biblioteca_id))?;
        let row = self
            .repository
            .books
            .create(&mut tx, nombre, biblioteca_id)
            .await?;
        tx.commit().await?;

        tracing::info!("Book created: id={} library={}", row.id, biblioteca_id);
        Ok(row.into())
    }

    /// Overwrite the book's name and owning library, keeping its id.
    ///
    /// The library is checked before the book; either missing is
    /// `NotProcessable` and nothing is written.
    pub async fn update(&self, id: i64, data: &BookInput) -> AppResult<()> {
        let (nombre, biblioteca_id) = required_fields(data)?;

        let mut tx = self.repository.begin().await?;
        self.repository
            .libraries
            .lock(&mut tx, biblioteca_id, LockMode::Share)
            .await?
            .ok_or_else(|| library_not_found(biblioteca_id))?;
        self.repository
            .books
            .lock(&mut tx, id, LockMode::Update)
            .await?
            .ok_or_else(|| book_not_found(id))?;
        self.repository
            .books
            .update(&mut tx, id, nombre, biblioteca_id)
            .await?;
        tx.commit().await?;

        tracing::info!("Book updated: id={} library={}", id, biblioteca_id);
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = self.repository.begin().await?;
        self.repository
            .books
            .lock(&mut tx, id, LockMode::Update)
            .await?
            .ok_or_else(|| book_not_found(id))?;
        self.repository.books.delete(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!("Book deleted: id={}", id);
        Ok(())
    }
}
