use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::tracking::{is_truthy, TrackingStatus};
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetStatusResponse {
    pub success: bool,
    pub is_tracking: bool,
    pub message: &'static str,
}

/// Documents the expected body; the handler itself never rejects input.
#[derive(ToSchema)]
pub struct SetStatusRequest {
    #[schema(rename = "isTracking")]
    pub is_tracking: bool,
}

#[utoipa::path(
    get,
    path = "/api/status",
    responses(
        (status = 200, description = "Current tracking status", body = TrackingStatus)
    ),
    tag = "status"
)]
pub async fn get_status(State(state): State<AppState>) -> Json<TrackingStatus> {
    let status = state.store.lock().await.status();
    log::info!("GET /api/status - tracking: {}", status.is_tracking);
    Json(status)
}

#[utoipa::path(
    post,
    path = "/api/status",
    request_body = SetStatusRequest,
    responses(
        (status = 200, description = "Tracking status updated", body = SetStatusResponse)
    ),
    tag = "status"
)]
pub async fn set_status(State(state): State<AppState>, body: Bytes) -> Json<SetStatusResponse> {
    let requested = requested_tracking(&body);
    let status = state.store.lock().await.set_tracking(requested);
    log::info!("POST /api/status - tracking changed to: {}", status.is_tracking);

    Json(SetStatusResponse {
        success: true,
        is_tracking: status.is_tracking,
        message: if status.is_tracking {
            "Tracking started"
        } else {
            "Tracking stopped"
        },
    })
}

/// Reads `isTracking` from a JSON body. A missing or unparsable body, or a
/// missing field, means "not tracking"; non-boolean values are coerced.
fn requested_tracking(body: &[u8]) -> bool {
    let payload: Option<Value> = serde_json::from_slice(body).ok();
    is_truthy(payload.as_ref().and_then(|p| p.get("isTracking")))
}
