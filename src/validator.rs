/*!
 * Validation Client
 * Sends page content to the validation endpoint with the caller's session token
 */
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::content::{PageContent, ValidationIssues, ValidationReport};

/// Message used when the endpoint fails without an `error` body
pub const FALLBACK_ERROR: &str = "Failed to validate content";

#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("not authenticated")]
    NotAuthenticated,

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("validation request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub type ValidatorResult<T> = Result<T, ValidatorError>;

/// Supplies the bearer credential of the current session
pub trait SessionProvider: Send + Sync {
    fn access_token(&self) -> Option<String>;
}

/// Fixed token, for service accounts and tests
#[derive(Debug, Clone)]
pub struct StaticSession(pub Option<String>);

impl SessionProvider for StaticSession {
    fn access_token(&self) -> Option<String> {
        self.0.clone()
    }
}

#[async_trait]
pub trait ContentValidator: Send + Sync {
    async fn validate(&self, content: &PageContent, slug: &str) -> ValidatorResult<ValidationReport>;
}

#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    pub endpoint: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            endpoint: std::env::var("VALIDATOR_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:3001/api/content/validate".to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ValidateRequest<'a> {
    content: &'a PageContent,
    slug: &'a str,
}

/// Success body; absent lists are empty and `isValid` is only false when
/// the endpoint says so
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidateResponse {
    #[serde(flatten)]
    issues: ValidationIssues,
    #[serde(default)]
    is_valid: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

pub struct ValidationClient {
    http: reqwest::Client,
    config: ValidatorConfig,
    session: Arc<dyn SessionProvider>,
}

impl ValidationClient {
    pub fn new(config: ValidatorConfig, session: Arc<dyn SessionProvider>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            session,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

#[async_trait]
impl ContentValidator for ValidationClient {
    async fn validate(&self, content: &PageContent, slug: &str) -> ValidatorResult<ValidationReport> {
        let token = self
            .session
            .access_token()
            .ok_or(ValidatorError::NotAuthenticated)?;

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(token)
            .json(&ValidateRequest { content, slug })
            .send()
            .await
            .map_err(|e| {
                tracing::error!(slug = %slug, error = %e, "validation request failed");
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| FALLBACK_ERROR.to_string());
            tracing::warn!(slug = %slug, status = %status, error = %message, "validation endpoint returned error");
            return Err(ValidatorError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.json::<ValidateResponse>().await?;
        tracing::debug!(
            slug = %slug,
            errors = body.issues.errors.len(),
            warnings = body.issues.warnings.len(),
            "content validated"
        );

        Ok(ValidationReport {
            is_valid: body.is_valid != Some(false),
            issues: body.issues,
        })
    }
}
