use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

use super::{PageStore, StoreError, StoreResult};
use crate::content::{Page, PageInput, PageSummary};
use crate::validator::SessionProvider;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListBody {
    items: Vec<PageSummary>,
}

/// Client of the `/api/pages` routes of a remote page service
pub struct HttpPageStore {
    http: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionProvider>,
}

impl HttpPageStore {
    pub fn new(base_url: impl Into<String>, session: Arc<dyn SessionProvider>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> StoreResult<RequestBuilder> {
        let token = self
            .session
            .access_token()
            .ok_or(StoreError::NotAuthenticated)?;
        Ok(request.bearer_auth(token))
    }

    async fn error_from(response: Response, slug: Option<&str>) -> StoreError {
        let status = response.status();
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

        match (status, slug) {
            (StatusCode::CONFLICT, Some(slug)) => StoreError::SlugTaken(slug.to_string()),
            (StatusCode::UNAUTHORIZED, _) => StoreError::NotAuthenticated,
            _ => {
                tracing::warn!(status = %status, error = %message, "page service returned error");
                StoreError::Api {
                    status: status.as_u16(),
                    message,
                }
            }
        }
    }

    async fn json<T: DeserializeOwned>(response: Response, slug: Option<&str>) -> StoreResult<T> {
        if !response.status().is_success() {
            return Err(Self::error_from(response, slug).await);
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl PageStore for HttpPageStore {
    async fn get_page_by_id(&self, id: Uuid) -> StoreResult<Option<Page>> {
        let response = self
            .http
            .get(self.url(&format!("/api/pages/{}", id)))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::json(response, None).await.map(Some)
    }

    async fn list_pages(&self, published: Option<bool>) -> StoreResult<Vec<PageSummary>> {
        let mut request = self.http.get(self.url("/api/pages"));
        if let Some(published) = published {
            request = request.query(&[("published", published)]);
        }
        let body: ListBody = Self::json(request.send().await?, None).await?;
        Ok(body.items)
    }

    async fn create_page(&self, data: PageInput) -> StoreResult<Page> {
        let request = self.authorized(self.http.post(self.url("/api/pages")))?;
        let response = request.json(&data).send().await?;
        Self::json(response, Some(&data.slug)).await
    }

    async fn update_page(&self, id: Uuid, data: PageInput) -> StoreResult<Page> {
        let request = self.authorized(self.http.put(self.url(&format!("/api/pages/{}", id))))?;
        let response = request.json(&data).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(id));
        }
        Self::json(response, Some(&data.slug)).await
    }

    async fn health(&self) -> StoreResult<Duration> {
        let start = Instant::now();
        let response = self.http.get(self.url("/health")).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response, None).await);
        }
        Ok(start.elapsed())
    }
}
