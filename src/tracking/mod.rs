mod error;
mod parsing;
mod record;
mod status;
mod store;

pub use error::IngestError;
pub use parsing::is_truthy;
pub use record::{LocationRecord, StoredLocation, ValidationMode};
pub use status::TrackingStatus;
pub use store::{AppendOutcome, LocationStore};
