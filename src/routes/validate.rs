/**
 * Content Validation Route
 * Runs the content rules over a page draft and reports categorized issues
 */
use axum::{http::HeaderMap, response::IntoResponse, Json};
use serde::Deserialize;

use crate::auth::verify_auth;
use crate::content::{rules, PageContent, ValidationReport};

/// Request body for POST /api/content/validate
#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub content: PageContent,
    #[serde(default)]
    pub slug: String,
}

/// POST /api/content/validate - Check a draft (auth required)
#[tracing::instrument(skip_all, fields(slug = %payload.slug, sections = payload.content.sections.len()))]
pub async fn validate_content(
    headers: HeaderMap,
    Json(payload): Json<ValidateRequest>,
) -> impl IntoResponse {
    if let Err(err_response) = verify_auth(&headers) {
        return err_response.into_response();
    }

    let report = ValidationReport::from(rules::check(&payload.content, &payload.slug));

    tracing::info!(
        errors = report.issues.errors.len(),
        warnings = report.issues.warnings.len(),
        suggestions = report.issues.seo_suggestions.len(),
        "content validated"
    );

    Json(report).into_response()
}
