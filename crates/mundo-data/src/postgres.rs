//! Postgres-backed store keeping each document as a JSONB row.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row, types::Json};

use crate::document::Collection;
use crate::error::{DataError, Result, map_query_err};
use crate::store::{ContentStore, unique_field};

const INSERT_DOCUMENT: &str = r"
    INSERT INTO content_documents (collection, id, document)
    VALUES ($1, $2, $3)
";

const SELECT_DOCUMENT: &str = r"
    SELECT document FROM content_documents WHERE collection = $1 AND id = $2
";

const SELECT_COLLECTION: &str = r"
    SELECT document FROM content_documents WHERE collection = $1
";

const UPDATE_DOCUMENT: &str = r"
    UPDATE content_documents
    SET document = $3, updated_at = now()
    WHERE collection = $1 AND id = $2
";

const DELETE_DOCUMENT: &str = r"
    DELETE FROM content_documents WHERE collection = $1 AND id = $2
";

const COUNT_COLLECTION: &str = r"
    SELECT COUNT(*) AS total FROM content_documents WHERE collection = $1
";

/// Name of the partial unique index on admin usernames.
const USERNAME_INDEX: &str = "content_documents_admin_username";

/// Apply the embedded schema migrations.
///
/// # Errors
///
/// Returns an error when migration execution fails.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|source| DataError::MigrationFailed { source })
}

/// Document store on a Postgres pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing pool, applying pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if migrations fail.
    pub async fn new(pool: PgPool) -> Result<Self> {
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Connect to `database_url` and apply pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable or migrations fail.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(map_query_err("connect"))?;
        Self::new(pool).await
    }

    /// Access the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ContentStore for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn insert(&self, collection: Collection, id: &str, document: Value) -> Result<()> {
        sqlx::query(INSERT_DOCUMENT)
            .bind(collection.as_str())
            .bind(id)
            .bind(Json(document))
            .execute(&self.pool)
            .await
            .map_err(|source| insert_error(collection, source))?;
        Ok(())
    }

    async fn fetch(&self, collection: Collection, id: &str) -> Result<Option<Value>> {
        let row = sqlx::query(SELECT_DOCUMENT)
            .bind(collection.as_str())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_query_err("fetch document"))?;
        row.map(|row| {
            row.try_get::<Json<Value>, _>("document")
                .map(|Json(value)| value)
                .map_err(map_query_err("decode document"))
        })
        .transpose()
    }

    async fn fetch_all(&self, collection: Collection) -> Result<Vec<Value>> {
        let rows = sqlx::query(SELECT_COLLECTION)
            .bind(collection.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(map_query_err("list documents"))?;
        rows.into_iter()
            .map(|row| {
                row.try_get::<Json<Value>, _>("document")
                    .map(|Json(value)| value)
                    .map_err(map_query_err("decode document"))
            })
            .collect()
    }

    async fn replace(&self, collection: Collection, id: &str, document: Value) -> Result<bool> {
        let result = sqlx::query(UPDATE_DOCUMENT)
            .bind(collection.as_str())
            .bind(id)
            .bind(Json(document))
            .execute(&self.pool)
            .await
            .map_err(map_query_err("replace document"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, collection: Collection, id: &str) -> Result<bool> {
        let result = sqlx::query(DELETE_DOCUMENT)
            .bind(collection.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_query_err("delete document"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, collection: Collection) -> Result<u64> {
        let row = sqlx::query(COUNT_COLLECTION)
            .bind(collection.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_query_err("count documents"))?;
        let total: i64 = row
            .try_get("total")
            .map_err(map_query_err("decode document count"))?;
        Ok(u64::try_from(total).unwrap_or_default())
    }
}

fn insert_error(collection: Collection, source: sqlx::Error) -> DataError {
    if let sqlx::Error::Database(db) = &source
        && db.is_unique_violation()
    {
        let field = if db.constraint() == Some(USERNAME_INDEX) {
            unique_field(collection).unwrap_or("id")
        } else {
            "id"
        };
        return DataError::Conflict {
            collection: collection.as_str(),
            field,
        };
    }
    DataError::QueryFailed {
        operation: "insert document",
        source,
    }
}
