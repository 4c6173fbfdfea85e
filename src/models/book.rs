//! Book model
//!
//! The owning library is write-only: it is accepted in [`BookInput`] and never
//! appears in [`Book`].

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// `libros` row
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct BookRow {
    pub id: i64,
    pub nombre: String,
    pub biblioteca_id: i64,
}

/// Book as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub nombre: String,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            id: row.id,
            nombre: row.nombre,
        }
    }
}

/// Reference to the owning library, by id
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LibraryRef {
    #[validate(required(message = "is required"))]
    pub id: Option<i64>,
}

/// Create/update book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct BookInput {
    /// Ignored; the id comes from storage or from the path
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(required(message = "is required"))]
    pub nombre: Option<String>,
    #[validate(required(message = "is required"), nested)]
    pub biblioteca: Option<LibraryRef>,
}

impl BookInput {
    /// Name and library id of a validated request
    pub fn fields(&self) -> Option<(&str, i64)> {
        let nombre = self.nombre.as_deref()?;
        let biblioteca_id = self.biblioteca.as_ref()?.id?;
        Some((nombre, biblioteca_id))
    }
}
