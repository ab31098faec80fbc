use chrono::Utc;
use serde_json::Value;

use super::error::IngestError;
use super::record::{candidates, screen, StoredLocation, ValidationMode};
use super::status::TrackingStatus;

/// Source of epoch-millisecond timestamps.
pub type Clock = fn() -> i64;

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendOutcome {
    /// Number of candidates submitted, accepted or not.
    pub submitted: usize,
    /// Store size after the append.
    pub total: usize,
}

/// Process-wide tracking state: the ordered location log plus the shared
/// tracking flag.
pub struct LocationStore {
    mode: ValidationMode,
    locations: Vec<StoredLocation>,
    status: TrackingStatus,
    clock: Clock,
}

impl LocationStore {
    pub fn new(mode: ValidationMode) -> Self {
        Self::with_clock(mode, now_millis)
    }

    pub fn with_clock(mode: ValidationMode, clock: Clock) -> Self {
        LocationStore {
            mode,
            locations: Vec::new(),
            status: TrackingStatus::idle(clock()),
            clock,
        }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn now(&self) -> i64 {
        (self.clock)()
    }

    /// Appends the accepted candidates of `body` in input order.
    ///
    /// On error the store is left untouched.
    pub fn append(&mut self, body: Value) -> Result<AppendOutcome, IngestError> {
        let batch = candidates(body, self.mode)?;
        let submitted = batch.len();
        let accepted = screen(batch, self.mode)?;
        self.locations.extend(accepted);
        Ok(AppendOutcome {
            submitted,
            total: self.locations.len(),
        })
    }

    pub fn locations(&self) -> &[StoredLocation] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn status(&self) -> TrackingStatus {
        self.status
    }

    pub fn set_tracking(&mut self, is_tracking: bool) -> TrackingStatus {
        let now = self.now();
        self.status.set(is_tracking, now);
        self.status
    }

    /// Drops every location and stops tracking. `last_updated` is left as is.
    pub fn clear(&mut self) {
        self.locations.clear();
        self.status.is_tracking = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::LocationRecord;
    use serde_json::json;
    use std::sync::atomic::{AtomicI64, Ordering};

    fn fixed_clock() -> i64 {
        1_000
    }

    fn sample(latitude: f64) -> Value {
        json!({"latitude": latitude, "longitude": 45.1, "timestamp": 1690000000000_i64})
    }

    fn latitudes(store: &LocationStore) -> Vec<f64> {
        store
            .locations()
            .iter()
            .map(|location| match location {
                StoredLocation::Normalized(LocationRecord { latitude, .. }) => *latitude,
                StoredLocation::Raw(value) => panic!("unexpected raw entry {value}"),
            })
            .collect()
    }

    #[test]
    fn starts_empty_and_idle() {
        let store = LocationStore::with_clock(ValidationMode::Strict, fixed_clock);
        assert!(store.locations().is_empty());
        assert_eq!(store.status(), TrackingStatus::idle(1_000));
    }

    #[test]
    fn appends_preserve_order_across_calls() {
        let mut store = LocationStore::with_clock(ValidationMode::Strict, fixed_clock);
        store.append(json!([sample(1.0), sample(2.0)])).unwrap();
        store.append(sample(3.0)).unwrap();
        store.append(json!([sample(4.0)])).unwrap();
        assert_eq!(latitudes(&store), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn submitted_counts_rejected_candidates_too() {
        let mut store = LocationStore::with_clock(ValidationMode::Strict, fixed_clock);
        let outcome = store.append(json!([sample(0.0), sample(7.5)])).unwrap();
        assert_eq!(
            outcome,
            AppendOutcome {
                submitted: 2,
                total: 1
            }
        );
    }

    #[test]
    fn failed_batch_leaves_store_untouched() {
        let mut store = LocationStore::with_clock(ValidationMode::Strict, fixed_clock);
        store.append(sample(1.0)).unwrap();
        let result = store.append(json!([sample(2.0), null]));
        assert!(result.is_err());
        assert_eq!(latitudes(&store), vec![1.0]);
    }

    #[test]
    fn scalar_body_is_rejected_in_strict_mode() {
        let mut store = LocationStore::with_clock(ValidationMode::Strict, fixed_clock);
        store.append(sample(1.0)).unwrap();
        let err = store.append(json!(42)).unwrap_err();
        assert!(matches!(err, IngestError::UnreadableBody { kind: "number" }));
        assert_eq!(latitudes(&store), vec![1.0]);
    }

    #[test]
    fn clear_empties_and_stops_tracking() {
        let mut store = LocationStore::with_clock(ValidationMode::Strict, fixed_clock);
        store.set_tracking(true);
        store.append(json!([sample(1.0), sample(2.0)])).unwrap();

        store.clear();

        assert!(store.locations().is_empty());
        assert!(!store.status().is_tracking);
    }

    static TICKS: AtomicI64 = AtomicI64::new(5_000);

    fn backwards_clock() -> i64 {
        TICKS.fetch_sub(1_000, Ordering::SeqCst)
    }

    #[test]
    fn last_updated_never_decreases() {
        let mut store = LocationStore::with_clock(ValidationMode::Strict, backwards_clock);
        let first = store.set_tracking(true);
        let second = store.set_tracking(false);
        assert!(!second.is_tracking);
        assert!(second.last_updated >= first.last_updated);
    }

    #[test]
    fn set_tracking_stamps_current_time() {
        let mut store = LocationStore::with_clock(ValidationMode::Strict, fixed_clock);
        let status = store.set_tracking(true);
        assert_eq!(
            status,
            TrackingStatus {
                is_tracking: true,
                last_updated: 1_000
            }
        );
    }

    #[test]
    fn loose_mode_keeps_everything() {
        let mut store = LocationStore::with_clock(ValidationMode::Loose, fixed_clock);
        let outcome = store.append(json!([{"latitude": 0}, null])).unwrap();
        assert_eq!(outcome.total, 2);
        assert_eq!(store.locations()[1], StoredLocation::Raw(Value::Null));
    }
}
