//! PostgreSQL-backed document store
//!
//! All collections share one `documents` table with a JSONB body. The
//! primary key `(collection, owner_email, id)` enforces uniqueness, so
//! duplicate inserts are detected by the database rather than by a
//! read-then-write check.

use super::{Collection, Document, DocumentStore, StoreError};
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::debug;

/// Document store over a shared connection pool
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(&self, owner: &str, doc: Document) -> Result<(), StoreError> {
        let collection = doc.collection();
        let result = sqlx::query(
            r#"
            INSERT INTO documents (collection, owner_email, id, body)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (collection, owner_email, id) DO NOTHING
            "#,
        )
        .bind(collection.as_str())
        .bind(owner)
        .bind(doc.id())
        .bind(Json(&doc))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            debug!(collection = %collection, id = doc.id(), "Insert hit existing key");
            return Err(StoreError::duplicate(collection, doc.id()));
        }
        Ok(())
    }

    async fn find(
        &self,
        collection: Collection,
        owner: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query_scalar::<_, Json<Document>>(
            r#"
            SELECT body
            FROM documents
            WHERE collection = $1 AND owner_email = $2
            ORDER BY seq
            "#,
        )
        .bind(collection.as_str())
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|Json(doc)| doc).collect())
    }

    async fn find_one(
        &self,
        collection: Collection,
        owner: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query_scalar::<_, Json<Document>>(
            r#"
            SELECT body
            FROM documents
            WHERE collection = $1 AND owner_email = $2 AND id = $3
            "#,
        )
        .bind(collection.as_str())
        .bind(owner)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|Json(doc)| doc))
    }

    async fn replace(&self, owner: &str, doc: Document) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET body = $4, updated_at = NOW()
            WHERE collection = $1 AND owner_email = $2 AND id = $3
            "#,
        )
        .bind(doc.collection().as_str())
        .bind(owner)
        .bind(doc.id())
        .bind(Json(&doc))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(
        &self,
        collection: Collection,
        owner: &str,
        id: &str,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "DELETE FROM documents WHERE collection = $1 AND owner_email = $2 AND id = $3",
        )
        .bind(collection.as_str())
        .bind(owner)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
