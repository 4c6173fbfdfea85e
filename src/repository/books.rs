//! Books repository (`libros` table)

use sqlx::{PgConnection, Pool, Postgres};

use super::LockMode;
use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookRow},
        page::PageRequest,
    },
};

fn duplicate_name(nombre: &str) -> String {
    format!("A book named '{}' already exists", nombre)
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// One page of books plus the total count
    pub async fn list(&self, page: &PageRequest) -> AppResult<(Vec<Book>, i64)> {
        let query = format!(
            "SELECT id, nombre FROM libros {} LIMIT $1 OFFSET $2",
            page.order_by()
        );
        let rows = sqlx::query_as::<_, Book>(&query)
            .bind(page.size)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM libros")
            .fetch_one(&self.pool)
            .await?;

        Ok((rows, total))
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Option<BookRow>> {
        let row = sqlx::query_as::<_, BookRow>(
            "SELECT id, nombre, biblioteca_id FROM libros WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Books owned by one library, ordered by id
    pub async fn list_by_library(&self, biblioteca_id: i64) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(
            "SELECT id, nombre FROM libros WHERE biblioteca_id = $1 ORDER BY id",
        )
        .bind(biblioteca_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Books owned by any of the given libraries, ordered by id
    pub async fn list_by_libraries(&self, biblioteca_ids: &[i64]) -> AppResult<Vec<BookRow>> {
        if biblioteca_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query_as::<_, BookRow>(
            "SELECT id, nombre, biblioteca_id FROM libros WHERE biblioteca_id = ANY($1) ORDER BY id",
        )
        .bind(biblioteca_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // =========================================================================
    // WRITE (transaction-scoped)
    // =========================================================================

    /// Fetch a book inside a transaction, holding a row lock until commit
    pub async fn lock(
        &self,
        conn: &mut PgConnection,
        id: i64,
        mode: LockMode,
    ) -> AppResult<Option<BookRow>> {
        let query = format!(
            "SELECT id, nombre, biblioteca_id FROM libros WHERE id = $1 {}",
            mode.as_sql()
        );
        let row = sqlx::query_as::<_, BookRow>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    /// Insert a book; a taken name surfaces as `Conflict`
    pub async fn create(
        &self,
        conn: &mut PgConnection,
        nombre: &str,
        biblioteca_id: i64,
    ) -> AppResult<BookRow> {
        sqlx::query_as::<_, BookRow>(
            r#"
            INSERT INTO libros (nombre, biblioteca_id)
            VALUES ($1, $2)
            RETURNING id, nombre, biblioteca_id
            "#,
        )
        .bind(nombre)
        .bind(biblioteca_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::from_constraint(e, duplicate_name(nombre)))
    }

    /// Overwrite name and owning library; a taken name surfaces as `Conflict`
    pub async fn update(
        &self,
        conn: &mut PgConnection,
        id: i64,
        nombre: &str,
        biblioteca_id: i64,
    ) -> AppResult<()> {
        sqlx::query("UPDATE libros SET nombre = $1, biblioteca_id = $2 WHERE id = $3")
            .bind(nombre)
            .bind(biblioteca_id)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::from_constraint(e, duplicate_name(nombre)))?;
        Ok(())
    }

    pub async fn delete(&self, conn: &mut PgConnection, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM libros WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Delete every book owned by a library, returning how many were removed
    pub async fn delete_by_library(&self, conn: &mut PgConnection, biblioteca_id: i64) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM libros WHERE biblioteca_id = $1")
            .bind(biblioteca_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }
}
