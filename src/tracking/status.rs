use serde::Serialize;
use utoipa::ToSchema;

/// Whether the tracker client should currently be capturing locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackingStatus {
    pub is_tracking: bool,
    /// Epoch milliseconds of the last explicit status change.
    pub last_updated: i64,
}

impl TrackingStatus {
    pub fn idle(now: i64) -> Self {
        TrackingStatus {
            is_tracking: false,
            last_updated: now,
        }
    }

    /// Records a status change. `last_updated` never moves backwards, even if
    /// the wall clock does.
    pub fn set(&mut self, is_tracking: bool, now: i64) {
        self.is_tracking = is_tracking;
        self.last_updated = self.last_updated.max(now);
    }
}
