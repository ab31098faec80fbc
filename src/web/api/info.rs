use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub status: &'static str,
    pub endpoints: Endpoints,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Endpoints {
    pub health: &'static str,
    pub status: &'static str,
    pub locations: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: i64,
    pub total_locations: usize,
    pub is_tracking: bool,
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service metadata", body = ServiceInfo)
    ),
    tag = "service"
)]
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Location Tracker API",
        status: "running",
        endpoints: Endpoints {
            health: "/health",
            status: "/api/status",
            locations: "/api/locations",
        },
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health", body = HealthResponse)
    ),
    tag = "service"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.store.lock().await;
    Json(HealthResponse {
        status: "Server is running",
        timestamp: store.now(),
        total_locations: store.len(),
        is_tracking: store.status().is_tracking,
    })
}
