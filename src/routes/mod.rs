/**
 * Routes Module
 * API route handlers
 */

pub mod health;
pub mod pages;
pub mod sitemap;
pub mod validate;

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, error: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
        (
            status,
            Json(ErrorResponse {
                error: error.into(),
                message: None,
            }),
        )
    }

    pub fn with_message(
        status: StatusCode,
        error: impl Into<String>,
        message: impl Into<String>,
    ) -> (StatusCode, Json<ErrorResponse>) {
        (
            status,
            Json(ErrorResponse {
                error: error.into(),
                message: Some(message.into()),
            }),
        )
    }
}
