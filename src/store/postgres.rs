use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use std::time::Duration;
use uuid::Uuid;

use super::{PageStore, StoreError, StoreResult};
use crate::content::{Page, PageInput, PageSummary};
use crate::db::{
    self,
    models::{PageRow, PageSummaryRow, PAGE_COLUMNS},
};

/// Postgres-backed page store
#[derive(Debug, Clone)]
pub struct PgPageStore {
    pool: PgPool,
}

impl PgPageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps a unique-constraint violation on `slug` to `SlugTaken`
fn map_write_error(e: sqlx::Error, slug: &str) -> StoreError {
    let unique_violation = e
        .as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "23505");
    if unique_violation {
        StoreError::SlugTaken(slug.to_string())
    } else {
        tracing::error!(slug = %slug, error = %e, "database error writing page");
        StoreError::Database(e)
    }
}

#[async_trait]
impl PageStore for PgPageStore {
    async fn get_page_by_id(&self, id: Uuid) -> StoreResult<Option<Page>> {
        let row = sqlx::query_as::<_, PageRow>(&format!(
            "SELECT {} FROM pages WHERE id = $1",
            PAGE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Page::from))
    }

    async fn list_pages(&self, published: Option<bool>) -> StoreResult<Vec<PageSummary>> {
        let rows = sqlx::query_as::<_, PageSummaryRow>(
            r#"
            SELECT id, slug, title, published, updated_at
            FROM pages
            WHERE ($1::BOOLEAN IS NULL OR published = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(published)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PageSummary::from).collect())
    }

    async fn create_page(&self, data: PageInput) -> StoreResult<Page> {
        let row = sqlx::query_as::<_, PageRow>(&format!(
            r#"
            INSERT INTO pages (slug, title, meta_description, published, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, now(), now())
            RETURNING {}
            "#,
            PAGE_COLUMNS
        ))
        .bind(&data.slug)
        .bind(&data.title)
        .bind(&data.meta_description)
        .bind(data.published)
        .bind(Json(&data.content))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &data.slug))?;

        Ok(row.into())
    }

    async fn update_page(&self, id: Uuid, data: PageInput) -> StoreResult<Page> {
        let row = sqlx::query_as::<_, PageRow>(&format!(
            r#"
            UPDATE pages
            SET slug = $1, title = $2, meta_description = $3, published = $4, content = $5, updated_at = now()
            WHERE id = $6
            RETURNING {}
            "#,
            PAGE_COLUMNS
        ))
        .bind(&data.slug)
        .bind(&data.title)
        .bind(&data.meta_description)
        .bind(data.published)
        .bind(Json(&data.content))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &data.slug))?;

        row.map(Page::from).ok_or(StoreError::NotFound(id))
    }

    async fn health(&self) -> StoreResult<Duration> {
        Ok(db::health_check(&self.pool).await?)
    }
}
