//! CMS Backend - page storage, content validation and the page editor model

pub mod auth;
pub mod config;
pub mod content;
pub mod db;
pub mod editor;
pub mod logging;
pub mod routes;
pub mod state;
pub mod store;
pub mod validator;

use axum::{
    http::Method,
    middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::state::AppState;
use crate::store::{MemoryPageStore, PageStore, PgPageStore};

/// Largest accepted request body; page documents stay well below this
pub const BODY_LIMIT_BYTES: usize = 2 * 1024 * 1024;

/// CORS for the admin frontend origins in `config`
pub fn configure_cors(config: &ServerConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(config.origin_headers())
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ])
        .allow_credentials(true)
}

/// Create and configure the application router.
pub fn create_app(state: AppState, config: &ServerConfig) -> Router {
    let cors = configure_cors(config);
    tracing::info!(origins = ?config.allowed_origins, "CORS configured");

    Router::new()
        .route(
            "/api/pages",
            get(routes::pages::list_pages).post(routes::pages::create_page),
        )
        .route(
            "/api/pages/{id}",
            get(routes::pages::get_page).put(routes::pages::update_page),
        )
        .route("/api/pages/{id}/preview", get(routes::pages::preview_page))
        .route("/api/content/validate", post(routes::validate::validate_content))
        .route("/sitemap.xml", get(routes::sitemap::sitemap))
        .route("/health", get(routes::health::health_ping))
        .route("/health/store", get(routes::health::health_store))
        .with_state(state)
        .layer(logging::middleware::propagate_request_id_layer())
        .layer(middleware::from_fn(logging::middleware::log_request))
        .layer(logging::middleware::request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(cors)
}

/// Postgres when DATABASE_URL is set, otherwise an in-memory store
async fn build_store(config: &ServerConfig) -> Arc<dyn PageStore> {
    if std::env::var("DATABASE_URL").is_err() {
        tracing::info!("DATABASE_URL not set. Pages are kept in memory.");
        return Arc::new(MemoryPageStore::new());
    }

    let pool = match db::init_pool(None).await {
        Ok(pool) => pool,
        Err(e) if config.is_production() => {
            panic!("FATAL: failed to initialize database pool: {}", e);
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to initialize database pool; pages are kept in memory");
            return Arc::new(MemoryPageStore::new());
        }
    };

    if let Err(e) = db::run_migrations(&pool).await {
        tracing::error!(error = %e, "failed to run database migrations");
    }

    Arc::new(PgPageStore::new(pool))
}

/// Run the server (used by main).
pub async fn run() {
    dotenvy::dotenv().ok();

    let config = ServerConfig::default();

    // Dropping the guards stops the background log writers
    let _log_guards = logging::init(config.is_production());

    routes::health::init_start_time();

    if config.is_production() && auth::JWT_SECRET.as_str() == auth::DEFAULT_JWT_SECRET {
        panic!(
            "FATAL: JWT_SECRET must be set to a secure, unique value in production. \
             Refusing to start with the default secret."
        );
    }

    let store = build_store(&config).await;
    let app = create_app(AppState::new(store, config.site_url.clone()), &config);

    let addr: SocketAddr = config
        .bind_addr()
        .parse()
        .expect("Invalid HOST/PORT configuration");
    tracing::info!(%addr, environment = %config.environment, "starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            environment: "test".into(),
            allowed_origins: vec!["http://localhost:3000".into()],
            site_url: "https://example.org".into(),
        };
        let state = AppState::new(Arc::new(MemoryPageStore::new()), config.site_url.clone());
        create_app(state, &config)
    }

    #[tokio::test]
    async fn test_app_sets_request_id() {
        let res = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_app_serves_empty_sitemap() {
        let res = test_app()
            .oneshot(Request::get("/sitemap.xml").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()["content-type"],
            "application/xml; charset=utf-8"
        );
    }
}
