use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::shared::config::Config;

/// Конфигурация всех роутов приложения
pub fn configure_routes(config: &Config) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // PRODUCT CATALOG
        // ========================================
        .route(
            "/upload",
            post(handlers::a001_product::upload)
                .layer(DefaultBodyLimit::max(config.upload.max_body_bytes())),
        )
        .route("/products", get(handlers::a001_product::list))
        .route("/products/search", get(handlers::a001_product::search))
}
