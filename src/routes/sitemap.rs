use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};

use crate::content::PageSummary;
use crate::state::AppState;

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn w3c_date(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

fn render_sitemap(base_url: &str, pages: &[PageSummary]) -> String {
    let mut urls = String::new();
    for page in pages {
        let loc = format!("{}/{}", base_url, page.slug);
        urls.push_str(&format!(
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n  </url>\n",
            escape_xml(&loc),
            w3c_date(&page.updated_at),
        ));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{}</urlset>\n",
        urls
    )
}

/// GET /sitemap.xml - Published pages only
pub async fn sitemap(State(state): State<AppState>) -> Response {
    let pages = match state.store.list_pages(Some(true)).await {
        Ok(pages) => pages,
        Err(e) => {
            tracing::error!(error = %e, "failed to list pages for sitemap");
            return (StatusCode::SERVICE_UNAVAILABLE, "Service unavailable").into_response();
        }
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/xml; charset=utf-8"),
            (
                header::CACHE_CONTROL,
                "public, max-age=3600, stale-while-revalidate=600",
            ),
        ],
        Body::from(render_sitemap(&state.site_url, &pages)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<loc>"), "&lt;loc&gt;");
    }

    #[test]
    fn test_render_sitemap_lists_pages() {
        let page = PageSummary {
            id: Uuid::new_v4(),
            slug: "about-us".into(),
            title: "About".into(),
            published: true,
            updated_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        };
        let xml = render_sitemap("https://example.org", &[page]);
        assert!(xml.contains("<loc>https://example.org/about-us</loc>"));
        assert!(xml.contains("<lastmod>2026-03-01</lastmod>"));
    }

    #[test]
    fn test_render_empty_sitemap() {
        let xml = render_sitemap("https://example.org", &[]);
        assert!(xml.contains("<urlset"));
        assert!(!xml.contains("<url>"));
    }
}
