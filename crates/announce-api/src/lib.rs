/// Announce API - HTTP surface of the announcement service
///
/// This module contains the router, page handlers and the optional admin
/// JSON API.
pub mod api;
pub mod context;
pub mod error;
pub mod middleware;
pub mod templates;

pub use context::ApiContext;
pub use error::ApiError;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{Method, header},
    middleware as axum_middleware,
    routing::{delete, get},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Build the application router
pub fn router(ctx: Arc<ApiContext>) -> Router {
    let mut app = Router::new()
        .route("/", get(api::submission::form).post(api::submission::submit))
        .route("/faq", get(api::faq::handler))
        .route("/faq/", get(api::faq::handler))
        .route("/health", get(api::health::handler));

    if ctx.config.admin_api {
        let v1_router = Router::new()
            .route(
                "/contacts",
                get(api::contacts::list).post(api::contacts::create),
            )
            .route("/contacts/{id}", delete(api::contacts::delete))
            .route("/submissions", get(api::submissions::list))
            .route("/submissions/{id}", delete(api::submissions::delete))
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE]),
            );

        app = app.nest("/v1", v1_router);
        tracing::info!("Admin API mounted at /v1");
    }

    app.route_layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(DefaultBodyLimit::max(ctx.config.max_upload_bytes))
        .with_state(ctx)
}
