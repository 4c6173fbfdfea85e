//! Libraries repository (`biblioteca` table)

use sqlx::{PgConnection, Pool, Postgres};

use super::LockMode;
use crate::{
    error::AppResult,
    models::{library::LibraryRow, page::PageRequest},
};

#[derive(Clone)]
pub struct LibrariesRepository {
    pool: Pool<Postgres>,
}

impl LibrariesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// One page of libraries plus the total count
    pub async fn list(&self, page: &PageRequest) -> AppResult<(Vec<LibraryRow>, i64)> {
        let query = format!(
            "SELECT id, nombre FROM biblioteca {} LIMIT $1 OFFSET $2",
            page.order_by()
        );
        let rows = sqlx::query_as::<_, LibraryRow>(&query)
            .bind(page.size)
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM biblioteca")
            .fetch_one(&self.pool)
            .await?;

        Ok((rows, total))
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Option<LibraryRow>> {
        let row = sqlx::query_as::<_, LibraryRow>("SELECT id, nombre FROM biblioteca WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Fetch a library inside a transaction, holding a row lock until commit
    pub async fn lock(
        &self,
        conn: &mut PgConnection,
        id: i64,
        mode: LockMode,
    ) -> AppResult<Option<LibraryRow>> {
        let query = format!("SELECT id, nombre FROM biblioteca WHERE id = $1 {}", mode.as_sql());
        let row = sqlx::query_as::<_, LibraryRow>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, conn: &mut PgConnection, nombre: &str) -> AppResult<LibraryRow> {
        let row = sqlx::query_as::<_, LibraryRow>(
            "INSERT INTO biblioteca (nombre) VALUES ($1) RETURNING id, nombre",
        )
        .bind(nombre)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, conn: &mut PgConnection, id: i64, nombre: &str) -> AppResult<()> {
        sqlx::query("UPDATE biblioteca SET nombre = $1 WHERE id = $2")
            .bind(nombre)
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Delete the library row only; its books must already be gone
    pub async fn delete(&self, conn: &mut PgConnection, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM biblioteca WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
