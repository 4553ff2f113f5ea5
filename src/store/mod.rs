/*!
 * Page Store
 * Persistence collaborator for pages: in-memory, Postgres and remote HTTP backends
 */
pub mod http;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::content::{Page, PageInput, PageSummary};

pub use http::HttpPageStore;
pub use memory::MemoryPageStore;
pub use postgres::PgPageStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("page not found: {0}")]
    NotFound(Uuid),

    #[error("slug already exists: {0}")]
    SlugTaken(String),

    #[error("not authenticated")]
    NotAuthenticated,

    #[error("page service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Pages are created and updated, never deleted. Writes are last-write-wins.
#[async_trait]
pub trait PageStore: Send + Sync {
    async fn get_page_by_id(&self, id: Uuid) -> StoreResult<Option<Page>>;

    /// Newest first; `published` filters when set
    async fn list_pages(&self, published: Option<bool>) -> StoreResult<Vec<PageSummary>>;

    async fn create_page(&self, data: PageInput) -> StoreResult<Page>;

    async fn update_page(&self, id: Uuid, data: PageInput) -> StoreResult<Page>;

    /// Round-trip probe for health checks
    async fn health(&self) -> StoreResult<std::time::Duration>;
}
