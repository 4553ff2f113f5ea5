//! Database Models - row structs for the `pages` table (used by sqlx).

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::content::{Page, PageContent, PageSummary};

/// Columns selected for a full page
pub const PAGE_COLUMNS: &str =
    "id, slug, title, meta_description, published, content, created_at, updated_at";

/// Page row; `content` is stored as JSONB
#[derive(Debug, Clone, FromRow)]
pub struct PageRow {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub meta_description: Option<String>,
    pub published: bool,
    pub content: Json<PageContent>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PageRow> for Page {
    fn from(row: PageRow) -> Self {
        Page {
            id: row.id,
            slug: row.slug,
            title: row.title,
            meta_description: row.meta_description,
            published: row.published,
            content: row.content.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Page list row
#[derive(Debug, Clone, FromRow)]
pub struct PageSummaryRow {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub published: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<PageSummaryRow> for PageSummary {
    fn from(row: PageSummaryRow) -> Self {
        PageSummary {
            id: row.id,
            slug: row.slug,
            title: row.title,
            published: row.published,
            updated_at: row.updated_at,
        }
    }
}
