//! Library model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::book::Book;

/// `biblioteca` row
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct LibraryRow {
    pub id: i64,
    pub nombre: String,
}

/// Library as returned by the API, with the books it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Library {
    pub id: i64,
    pub nombre: String,
    /// Books whose library reference points here, ordered by id
    pub libros: Vec<Book>,
}

impl Library {
    pub fn from_row(row: LibraryRow, libros: Vec<Book>) -> Self {
        Self {
            id: row.id,
            nombre: row.nombre,
            libros,
        }
    }
}

/// Create/update library request
///
/// `id` and `libros` are tolerated so a read body can be sent back as is,
/// but neither is written.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LibraryInput {
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(required(message = "is required"))]
    pub nombre: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<Vec<Object>>)]
    pub libros: Option<Vec<serde_json::Value>>,
}
