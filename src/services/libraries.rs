//! Library service

use std::collections::HashMap;

use super::library_not_found;
use crate::{
    error::{AppError, AppResult},
    models::{
        book::Book,
        library::{Library, LibraryInput},
        page::{Page, PageRequest},
    },
    repository::{LockMode, Repository},
};

#[derive(Clone)]
pub struct LibrariesService {
    repository: Repository,
}

fn required_name(data: &LibraryInput) -> AppResult<&str> {
    data.nombre
        .as_deref()
        .ok_or_else(|| AppError::Validation("nombre: is required".to_string()))
}

impl LibrariesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// One page of libraries, each with its books
    pub async fn list(&self, page: &PageRequest) -> AppResult<Page<Library>> {
        let (rows, total) = self.repository.libraries.list(page).await?;

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut books: HashMap<i64, Vec<Book>> = HashMap::new();
        for row in self.repository.books.list_by_libraries(&ids).await? {
            books.entry(row.biblioteca_id).or_default().push(row.into());
        }

        let content = rows
            .into_iter()
            .map(|row| {
                let libros = books.remove(&row.id).unwrap_or_default();
                Library::from_row(row, libros)
            })
            .collect();

        Ok(Page::new(content, page, total))
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Library> {
        let row = self
            .repository
            .libraries
            .get_by_id(id)
            .await?
            .ok_or_else(|| library_not_found(id))?;
        let libros = self.repository.books.list_by_library(id).await?;
        Ok(Library::from_row(row, libros))
    }

    pub async fn create(&self, data: &LibraryInput) -> AppResult<Library> {
        let nombre = required_name(data)?;

        let mut tx = self.repository.begin().await?;
        let row = self.repository.libraries.create(&mut tx, nombre).await?;
        tx.commit().await?;

        tracing::info!("Library created: id={}", row.id);
        Ok(Library::from_row(row, Vec::new()))
    }

    /// Overwrite the library's fields, keeping its id
    pub async fn update(&self, id: i64, data: &LibraryInput) -> AppResult<()> {
        let nombre = required_name(data)?;

        let mut tx = self.repository.begin().await?;
        self.repository
            .libraries
            .lock(&mut tx, id, LockMode::Update)
            .await?
            .ok_or_else(|| library_not_found(id))?;
        self.repository.libraries.update(&mut tx, id, nombre).await?;
        tx.commit().await?;

        tracing::info!("Library updated: id={}", id);
        Ok(())
    }

    /// Delete the library and every book it owns in one transaction
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = self.repository.begin().await?;
        self.repository
            .libraries
            .lock(&mut tx, id, LockMode::Update)
            .await?
            .ok_or_else(|| library_not_found(id))?;
        let removed = self.repository.books.delete_by_library(&mut tx, id).await?;
        self.repository.libraries.delete(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!("Library deleted: id={} ({} book(s) removed)", id, removed);
        Ok(())
    }
}
