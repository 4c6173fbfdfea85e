//! Repository layer for database operations
//!
//! Reads go straight to the pool. Writes take a `&mut PgConnection` so the
//! service can run the existence check and the write on one transaction.

pub mod books;
pub mod libraries;

use sqlx::{Pool, Postgres, Transaction};

use crate::error::AppResult;

/// Row lock taken while checking that an entity exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// The row is about to be modified or deleted
    Update,
    /// The row is referenced by a write elsewhere and must not disappear
    Share,
}

impl LockMode {
    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            LockMode::Update => "FOR UPDATE",
            LockMode::Share => "FOR SHARE",
        }
    }
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub libraries: libraries::LibrariesRepository,
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            libraries: libraries::LibrariesRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            pool,
        }
    }

    /// Start a transaction; dropping it without commit rolls back
    pub async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        Ok(self.pool.begin().await?)
    }

    /// Round-trip to the database (readiness check)
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
