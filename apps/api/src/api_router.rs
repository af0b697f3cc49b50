use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use storefront_core::AppError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let catalog_routes = Router::new()
        .route(
            "/api/catalog/{entity_logical_name}",
            get(handlers::catalog::list_catalog_records_handler)
                .post(handlers::catalog::create_catalog_record_handler),
        )
        .route(
            "/api/catalog/{entity_logical_name}/{record_id}",
            get(handlers::catalog::get_catalog_record_handler)
                .put(handlers::catalog::update_catalog_record_handler)
                .delete(handlers::catalog::delete_catalog_record_handler),
        );

    let cors_layer = CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]);

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(catalog_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
