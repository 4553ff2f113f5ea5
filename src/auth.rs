/*!
 * Bearer Token Auth
 * JWT verification for the editing endpoints
 */
use axum::{
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::routes::ErrorResponse;

/// Placeholder secret; `run` refuses to start with it in production
pub const DEFAULT_JWT_SECRET: &str = "default-jwt-secret-change-in-production";

lazy_static::lazy_static! {
    /// JWT secret key from environment
    pub static ref JWT_SECRET: String = std::env::var("JWT_SECRET")
        .unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string());
}

/// Access token expiry in minutes
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,   // Editor ID
    pub email: String, // Editor email
    pub role: String,  // Editor role
    pub exp: i64,      // Expiry timestamp
    pub iat: i64,      // Issued at timestamp
}

/// Create access token valid for `minutes`
pub fn create_access_token(
    user_id: &str,
    email: &str,
    role: &str,
    minutes: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let exp = now + Duration::minutes(minutes);

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
}

/// Verify and decode access token
pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(JWT_SECRET.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// Extract bearer token from Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Rejects requests without a valid bearer token
pub fn verify_auth(headers: &HeaderMap) -> Result<Claims, (StatusCode, Json<ErrorResponse>)> {
    let token = extract_bearer_token(headers).ok_or_else(|| {
        ErrorResponse::new(StatusCode::UNAUTHORIZED, "Authorization required")
    })?;

    verify_access_token(token).map_err(|e| {
        tracing::debug!(error = %e, "rejected bearer token");
        ErrorResponse::new(StatusCode::UNAUTHORIZED, "Invalid or expired token")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_verify_access_token_invalid_returns_err() {
        let result = verify_access_token("invalid.jwt.token");
        assert!(result.is_err());
    }

    #[test]
    fn test_token_roundtrip_keeps_claims() {
        let token = create_access_token("editor-1", "editor@example.com", "editor", 5).unwrap();
        let claims = verify_access_token(&token).unwrap();
        assert_eq!(claims.sub, "editor-1");
        assert_eq!(claims.role, "editor");
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = create_access_token("editor-1", "editor@example.com", "editor", -10).unwrap();
        assert!(verify_access_token(&token).is_err());
    }

    #[test]
    fn test_verify_auth_requires_header() {
        let (status, body) = verify_auth(&HeaderMap::new()).unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.error, "Authorization required");
    }

    #[test]
    fn test_verify_auth_accepts_valid_token() {
        let token = create_access_token("editor-1", "editor@example.com", "editor", 5).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        assert!(verify_auth(&headers).is_ok());
    }
}
