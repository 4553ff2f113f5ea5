/**
 * Page Routes
 * Storage API for editable pages plus an HTML preview
 */
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::verify_auth;
use crate::content::{preview, PageInput, PageSummary};
use crate::routes::ErrorResponse;
use crate::state::AppState;
use crate::store::StoreError;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for GET /api/pages
#[derive(Debug, Deserialize)]
pub struct PageListQuery {
    pub published: Option<bool>,
}

/// Response for GET /api/pages
#[derive(Debug, Serialize, Deserialize)]
pub struct PageListResponse {
    pub items: Vec<PageSummary>,
    pub total: usize,
}

// ============================================================================
// Helpers
// ============================================================================

fn store_error(e: StoreError) -> (StatusCode, Json<ErrorResponse>) {
    match e {
        StoreError::NotFound(_) => ErrorResponse::new(StatusCode::NOT_FOUND, "Not found"),
        StoreError::SlugTaken(_) => ErrorResponse::new(StatusCode::CONFLICT, "Slug already exists"),
        StoreError::NotAuthenticated => {
            ErrorResponse::new(StatusCode::UNAUTHORIZED, "Authorization required")
        }
        other => {
            tracing::error!(error = %other, "page store error");
            ErrorResponse::new(StatusCode::INTERNAL_SERVER_ERROR, "Storage error")
        }
    }
}

/// Runs the form schema on the request and sanitizes section bodies
fn prepare_input(payload: PageInput) -> Result<PageInput, (StatusCode, Json<ErrorResponse>)> {
    payload.form_values().validate().map_err(|errors| {
        ErrorResponse::with_message(StatusCode::BAD_REQUEST, "Invalid page", errors.to_string())
    })?;
    Ok(payload.sanitized())
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/pages - List pages, newest first
pub async fn list_pages(
    State(state): State<AppState>,
    Query(query): Query<PageListQuery>,
) -> impl IntoResponse {
    match state.store.list_pages(query.published).await {
        Ok(items) => {
            let total = items.len();
            (StatusCode::OK, Json(PageListResponse { items, total })).into_response()
        }
        Err(e) => store_error(e).into_response(),
    }
}

/// GET /api/pages/{id} - Get a single page
pub async fn get_page(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    match state.store.get_page_by_id(id).await {
        Ok(Some(page)) => (StatusCode::OK, Json(page)).into_response(),
        Ok(None) => ErrorResponse::new(StatusCode::NOT_FOUND, "Not found").into_response(),
        Err(e) => store_error(e).into_response(),
    }
}

/// POST /api/pages - Create a page (auth required)
pub async fn create_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<PageInput>,
) -> impl IntoResponse {
    let claims = match verify_auth(&headers) {
        Ok(c) => c,
        Err(err_response) => return err_response.into_response(),
    };

    let input = match prepare_input(payload) {
        Ok(input) => input,
        Err(err_response) => return err_response.into_response(),
    };

    match state.store.create_page(input).await {
        Ok(page) => {
            tracing::info!(page_id = %page.id, slug = %page.slug, editor = %claims.email, "page created");
            (StatusCode::CREATED, Json(page)).into_response()
        }
        Err(e) => store_error(e).into_response(),
    }
}

/// PUT /api/pages/{id} - Replace a page's metadata and content (auth required)
pub async fn update_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<PageInput>,
) -> impl IntoResponse {
    let claims = match verify_auth(&headers) {
        Ok(c) => c,
        Err(err_response) => return err_response.into_response(),
    };

    let input = match prepare_input(payload) {
        Ok(input) => input,
        Err(err_response) => return err_response.into_response(),
    };

    match state.store.update_page(id, input).await {
        Ok(page) => {
            tracing::info!(
                page_id = %page.id,
                published = page.published,
                editor = %claims.email,
                "page updated"
            );
            (StatusCode::OK, Json(page)).into_response()
        }
        Err(e) => store_error(e).into_response(),
    }
}

/// GET /api/pages/{id}/preview - Approximate HTML rendering of a page
pub async fn preview_page(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let page = match state.store.get_page_by_id(id).await {
        Ok(Some(page)) => page,
        Ok(None) => return ErrorResponse::new(StatusCode::NOT_FOUND, "Not found").into_response(),
        Err(e) => return store_error(e).into_response(),
    };

    let html = preview::render(&page.title, &page.content.sections).to_html();

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        Body::from(html),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::create_access_token;
    use crate::content::{Page, PageContent, Section, SectionKind};
    use crate::store::MemoryPageStore;
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn pages_router() -> Router {
        let state = AppState::new(Arc::new(MemoryPageStore::new()), "https://example.org");
        Router::new()
            .route("/api/pages", get(list_pages).post(create_page))
            .route("/api/pages/{id}", get(get_page).put(update_page))
            .route("/api/pages/{id}/preview", get(preview_page))
            .with_state(state)
    }

    fn bearer() -> String {
        let token = create_access_token("editor-1", "editor@example.com", "editor", 5).unwrap();
        format!("Bearer {}", token)
    }

    fn about_us() -> serde_json::Value {
        json!({
            "slug": "about-us",
            "title": "About",
            "published": false,
            "content": { "sections": [{ "type": "hero", "title": "Welcome" }] }
        })
    }

    async fn send(
        app: Router,
        method: &str,
        uri: &str,
        auth: Option<String>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, axum::body::Bytes) {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(auth) = auth {
            req = req.header("authorization", auth);
        }
        let req = match body {
            Some(json) => req
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => req.body(Body::empty()).unwrap(),
        };
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes)
    }

    #[tokio::test]
    async fn test_create_requires_auth() {
        let (status, _) = send(pages_router(), "POST", "/api/pages", None, Some(about_us())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_slug() {
        let mut body = about_us();
        body["slug"] = json!("-abc");
        let (status, bytes) = send(pages_router(), "POST", "/api/pages", Some(bearer()), Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert!(err.message.unwrap().contains("hyphen"));
    }

    #[tokio::test]
    async fn test_create_get_update_flow() {
        let app = pages_router();

        let (status, bytes) =
            send(app.clone(), "POST", "/api/pages", Some(bearer()), Some(about_us())).await;
        assert_eq!(status, StatusCode::CREATED);
        let created: Page = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(created.slug, "about-us");
        assert_eq!(created.content.sections.len(), 1);

        let (status, bytes) =
            send(app.clone(), "GET", &format!("/api/pages/{}", created.id), None, None).await;
        assert_eq!(status, StatusCode::OK);
        let fetched: Page = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(fetched, created);

        let mut body = about_us();
        body["published"] = json!(true);
        let (status, bytes) = send(
            app.clone(),
            "PUT",
            &format!("/api/pages/{}", created.id),
            Some(bearer()),
            Some(body),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let updated: Page = serde_json::from_slice(&bytes).unwrap();
        assert!(updated.published);

        let (status, bytes) = send(app, "GET", "/api/pages?published=true", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let list: PageListResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(list.total, 1);
    }

    #[tokio::test]
    async fn test_duplicate_slug_conflicts() {
        let app = pages_router();
        send(app.clone(), "POST", "/api/pages", Some(bearer()), Some(about_us())).await;
        let (status, _) = send(app, "POST", "/api/pages", Some(bearer()), Some(about_us())).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_get_missing_page() {
        let uri = format!("/api/pages/{}", Uuid::new_v4());
        let (status, _) = send(pages_router(), "GET", &uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_missing_page() {
        let uri = format!("/api/pages/{}", Uuid::new_v4());
        let (status, _) = send(pages_router(), "PUT", &uri, Some(bearer()), Some(about_us())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_saved_body_previews_without_double_escaping() {
        let app = pages_router();
        let mut body = about_us();
        body["content"] = json!({
            "sections": [{ "type": "content", "content": "Tom & Jerry <b>bold</b><script>x()</script>" }]
        });

        let (status, bytes) = send(app.clone(), "POST", "/api/pages", Some(bearer()), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        let created: Page = serde_json::from_slice(&bytes).unwrap();

        let (status, bytes) = send(
            app,
            "GET",
            &format!("/api/pages/{}/preview", created.id),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Tom &amp; Jerry <b>bold</b>"));
        assert!(!html.contains("&amp;amp;"));
        assert!(!html.contains("<script>"));
    }

    #[tokio::test]
    async fn test_preview_renders_html() {
        let store = Arc::new(MemoryPageStore::new());
        let page = crate::store::PageStore::create_page(
            store.as_ref(),
            PageInput {
                slug: "join".into(),
                title: "Join us".into(),
                content: PageContent {
                    sections: vec![Section::empty(SectionKind::Cta)].into(),
                },
                meta_description: None,
                published: false,
            },
        )
        .await
        .unwrap();

        let app = Router::new()
            .route("/api/pages/{id}/preview", get(preview_page))
            .with_state(AppState::new(store, "https://example.org"));

        let (status, bytes) =
            send(app, "GET", &format!("/api/pages/{}/preview", page.id), None, None).await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("<title>Join us</title>"));
        assert!(html.contains("<button disabled>Learn More</button>"));
    }
}
