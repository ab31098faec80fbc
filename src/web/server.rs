use axum::{routing::get, Router};
use std::future::IntoFuture;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::tracking::LocationStore;

use super::api::info as info_handlers;
use super::api::locations as location_handlers;
use super::api::status as status_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::AppState;

const ENDPOINTS: [(&str, &str, &str); 6] = [
    ("GET", "/health", "Health check"),
    ("GET", "/api/status", "Get tracking status"),
    ("POST", "/api/status", "Set tracking status"),
    ("GET", "/api/locations", "Get all locations"),
    ("POST", "/api/locations", "Save locations"),
    ("DELETE", "/api/locations", "Clear all data"),
];

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(info_handlers::service_info))
        .route("/health", get(info_handlers::health))
        .route(
            "/api/status",
            get(status_handlers::get_status).post(status_handlers::set_status),
        )
        .route(
            "/api/locations",
            get(location_handlers::list_locations)
                .post(location_handlers::append_locations)
                .delete(location_handlers::clear_locations),
        )
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves until the listener fails or an interrupt arrives. In-flight
/// requests are not drained on interrupt.
pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.bind_address();
    let state = AppState::new(LocationStore::new(config.tracking.validation));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    log_banner(&config);

    tokio::select! {
        result = axum::serve(listener, app).into_future() => result,
        _ = interrupt() => {
            log::info!("Shutting down server...");
            Ok(())
        }
    }
}

async fn interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for interrupt signal: {}", e);
        std::future::pending::<()>().await;
    }
}

fn log_banner(config: &Config) {
    log::info!("========================================");
    log::info!("   LOCATION TRACKER SERVER STARTED");
    log::info!("========================================");
    log::info!("Listening on {}", config.bind_address());
    log::info!("Validation: {:?}", config.tracking.validation);
    log::info!("Endpoints:");
    for (method, path, description) in ENDPOINTS {
        log::info!("  {:<6} {:<15} - {}", method, path, description);
    }
    log::info!("========================================");
}
