use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{PageStore, StoreError, StoreResult};
use crate::content::{Page, PageInput, PageSummary};

/// Process-local page store, used when no database is configured
#[derive(Debug, Default)]
pub struct MemoryPageStore {
    pages: RwLock<HashMap<Uuid, Page>>,
}

impl MemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slug_taken(pages: &HashMap<Uuid, Page>, slug: &str, except: Option<Uuid>) -> bool {
        pages
            .values()
            .any(|p| p.slug == slug && Some(p.id) != except)
    }
}

#[async_trait]
impl PageStore for MemoryPageStore {
    async fn get_page_by_id(&self, id: Uuid) -> StoreResult<Option<Page>> {
        Ok(self.pages.read().await.get(&id).cloned())
    }

    async fn list_pages(&self, published: Option<bool>) -> StoreResult<Vec<PageSummary>> {
        let pages = self.pages.read().await;
        let mut items: Vec<&Page> = pages
            .values()
            .filter(|p| published.map_or(true, |want| p.published == want))
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items.into_iter().map(PageSummary::from).collect())
    }

    async fn create_page(&self, data: PageInput) -> StoreResult<Page> {
        let mut pages = self.pages.write().await;
        if Self::slug_taken(&pages, &data.slug, None) {
            return Err(StoreError::SlugTaken(data.slug));
        }

        let now = Utc::now();
        let page = Page {
            id: Uuid::new_v4(),
            slug: data.slug,
            title: data.title,
            meta_description: data.meta_description,
            published: data.published,
            content: data.content,
            created_at: now,
            updated_at: now,
        };
        pages.insert(page.id, page.clone());
        tracing::debug!(page_id = %page.id, slug = %page.slug, "page created in memory store");
        Ok(page)
    }

    async fn update_page(&self, id: Uuid, data: PageInput) -> StoreResult<Page> {
        let mut pages = self.pages.write().await;
        if !pages.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        if Self::slug_taken(&pages, &data.slug, Some(id)) {
            return Err(StoreError::SlugTaken(data.slug));
        }

        let page = pages.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        page.slug = data.slug;
        page.title = data.title;
        page.meta_description = data.meta_description;
        page.published = data.published;
        page.content = data.content;
        page.updated_at = Utc::now();
        Ok(page.clone())
    }

    async fn health(&self) -> StoreResult<Duration> {
        let start = Instant::now();
        let _ = self.pages.read().await.len();
        Ok(start.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PageContent;

    fn input(slug: &str, published: bool) -> PageInput {
        PageInput {
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            content: PageContent::default(),
            meta_description: None,
            published,
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let store = MemoryPageStore::new();
        let page = store.create_page(input("about", false)).await.unwrap();
        let fetched = store.get_page_by_id(page.id).await.unwrap();
        assert_eq!(fetched, Some(page));
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = MemoryPageStore::new();
        assert_eq!(store.get_page_by_id(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected() {
        let store = MemoryPageStore::new();
        store.create_page(input("about", false)).await.unwrap();
        let err = store.create_page(input("about", true)).await.unwrap_err();
        assert!(matches!(err, StoreError::SlugTaken(slug) if slug == "about"));
    }

    #[tokio::test]
    async fn test_update_keeps_own_slug_and_created_at() {
        let store = MemoryPageStore::new();
        let page = store.create_page(input("about", false)).await.unwrap();
        let updated = store.update_page(page.id, input("about", true)).await.unwrap();
        assert!(updated.published);
        assert_eq!(updated.created_at, page.created_at);
        assert!(updated.updated_at >= page.updated_at);
    }

    #[tokio::test]
    async fn test_update_to_other_pages_slug_rejected() {
        let store = MemoryPageStore::new();
        store.create_page(input("about", false)).await.unwrap();
        let other = store.create_page(input("team", false)).await.unwrap();
        let err = store.update_page(other.id, input("about", false)).await.unwrap_err();
        assert!(matches!(err, StoreError::SlugTaken(_)));
    }

    #[tokio::test]
    async fn test_update_missing_page() {
        let store = MemoryPageStore::new();
        let id = Uuid::new_v4();
        let err = store.update_page(id, input("about", false)).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn test_update_missing_page_with_taken_slug_is_not_found() {
        let store = MemoryPageStore::new();
        store.create_page(input("about", false)).await.unwrap();
        let id = Uuid::new_v4();
        let err = store.update_page(id, input("about", false)).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn test_list_filters_published() {
        let store = MemoryPageStore::new();
        store.create_page(input("draft", false)).await.unwrap();
        store.create_page(input("live", true)).await.unwrap();
        assert_eq!(store.list_pages(None).await.unwrap().len(), 2);
        let live = store.list_pages(Some(true)).await.unwrap();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].slug, "live");
    }
}
