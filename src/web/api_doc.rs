use utoipa::OpenApi;

use super::api::error::FailureResponse;
use super::api::info::{Endpoints, HealthResponse, ServiceInfo};
use super::api::locations::{AppendResponse, ClearResponse};
use super::api::status::{SetStatusRequest, SetStatusResponse};
use crate::tracking::{LocationRecord, TrackingStatus};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::info::service_info,
        super::api::info::health,
        super::api::status::get_status,
        super::api::status::set_status,
        super::api::locations::list_locations,
        super::api::locations::append_locations,
        super::api::locations::clear_locations,
    ),
    components(
        schemas(
            ServiceInfo,
            Endpoints,
            HealthResponse,
            TrackingStatus,
            SetStatusRequest,
            SetStatusResponse,
            LocationRecord,
            AppendResponse,
            ClearResponse,
            FailureResponse,
        )
    ),
    info(
        title = "Location Tracker API",
        description = "Collects location samples from a tracker client and shares a tracking switch with a controller client",
        version = "0.1.0"
    ),
    tags(
        (name = "service", description = "Service metadata and health"),
        (name = "status", description = "Shared tracking switch"),
        (name = "locations", description = "Location samples")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/", "/health", "/api/status", "/api/locations"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn status_request_uses_wire_field_name() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let properties = &doc["components"]["schemas"]["SetStatusRequest"]["properties"];
        assert!(properties["isTracking"].is_object());
        assert!(properties.get("is_tracking").is_none());
    }
}
