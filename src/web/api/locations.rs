use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::tracking::{LocationRecord, StoredLocation, ValidationMode};
use crate::web::api::error::{ApiError, ApiResult, FailureResponse};
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct AppendResponse {
    pub success: bool,
    /// Number of records submitted, including any that were dropped.
    pub saved: usize,
    pub total: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClearResponse {
    pub success: bool,
    pub message: &'static str,
}

#[utoipa::path(
    get,
    path = "/api/locations",
    responses(
        (status = 200, description = "All stored locations in insertion order", body = Vec<LocationRecord>)
    ),
    tag = "locations"
)]
pub async fn list_locations(State(state): State<AppState>) -> Json<Vec<StoredLocation>> {
    let locations = state.store.lock().await.locations().to_vec();
    log::info!("GET /api/locations - returning {} locations", locations.len());
    Json(locations)
}

#[utoipa::path(
    post,
    path = "/api/locations",
    request_body(
        content = Vec<LocationRecord>,
        description = "A single location object or an array of them"
    ),
    responses(
        (status = 200, description = "Locations saved", body = AppendResponse),
        (status = 400, description = "Body is not valid JSON", body = FailureResponse),
        (status = 500, description = "Body could not be processed", body = FailureResponse)
    ),
    tag = "locations"
)]
pub async fn append_locations(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<AppendResponse>> {
    log::info!("POST /api/locations - received data");

    // An empty body reads as null, which strict mode cannot take records from.
    let payload: Value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).map_err(|e| ApiError::MalformedBody(e.to_string()))?
    };

    let outcome = state.store.lock().await.append(payload).map_err(|e| {
        log::error!("Error saving locations: {}", e);
        ApiError::from(e)
    })?;
    log::info!(
        "Saved {} location(s). Total: {}",
        outcome.submitted,
        outcome.total
    );

    Ok(Json(AppendResponse {
        success: true,
        saved: outcome.submitted,
        total: outcome.total,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/locations",
    responses(
        (status = 200, description = "All locations cleared and tracking stopped", body = ClearResponse)
    ),
    tag = "locations"
)]
pub async fn clear_locations(State(state): State<AppState>) -> Json<ClearResponse> {
    log::info!("DELETE /api/locations - clearing all data");
    let mut store = state.store.lock().await;
    store.clear();

    let message = match store.mode() {
        ValidationMode::Strict => "All locations cleared and tracking stopped",
        ValidationMode::Loose => "All cleared",
    };
    Json(ClearResponse {
        success: true,
        message,
    })
}
