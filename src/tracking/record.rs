use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::error::IngestError;
use super::parsing::{is_truthy, parse_float, parse_int};

const REQUIRED_FIELDS: [&str; 3] = ["latitude", "longitude", "timestamp"];

/// How incoming location candidates are screened before storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Require latitude, longitude and timestamp to be set, then normalize them.
    #[default]
    Strict,
    /// Store every candidate exactly as received.
    Loose,
}

/// A normalized geolocation sample.
///
/// Fields that failed to parse are kept as NaN (coordinates) or `None`
/// (timestamp); both serialize as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct LocationRecord {
    pub latitude: f64,
    pub longitude: f64,
    /// Capture time in epoch milliseconds.
    pub timestamp: Option<i64>,
}

impl LocationRecord {
    fn from_fields(fields: &Map<String, Value>) -> Self {
        LocationRecord {
            latitude: fields.get("latitude").map_or(f64::NAN, parse_float),
            longitude: fields.get("longitude").map_or(f64::NAN, parse_float),
            timestamp: fields.get("timestamp").and_then(parse_int),
        }
    }
}

/// An entry of the location store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StoredLocation {
    Normalized(LocationRecord),
    Raw(Value),
}

/// Splits a request body into candidates: an array is a batch of its
/// elements, an object is a batch of one.
///
/// Strict mode cannot read records out of a scalar or empty body. Loose mode
/// takes any other body as a batch of one.
pub(super) fn candidates(body: Value, mode: ValidationMode) -> Result<Vec<Value>, IngestError> {
    match (body, mode) {
        (Value::Array(items), _) => Ok(items),
        (body @ Value::Object(_), _) | (body, ValidationMode::Loose) => Ok(vec![body]),
        (body, ValidationMode::Strict) => Err(IngestError::UnreadableBody {
            kind: json_kind(&body),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Screens a batch of candidates. Either the whole batch is screened or an
/// error is returned; nothing is partially accepted.
pub(super) fn screen(
    candidates: Vec<Value>,
    mode: ValidationMode,
) -> Result<Vec<StoredLocation>, IngestError> {
    match mode {
        ValidationMode::Loose => Ok(candidates.into_iter().map(StoredLocation::Raw).collect()),
        ValidationMode::Strict => {
            let mut accepted = Vec::with_capacity(candidates.len());
            for (index, candidate) in candidates.iter().enumerate() {
                match candidate {
                    Value::Null => return Err(IngestError::UnreadableRecord { index }),
                    Value::Object(fields) => {
                        let complete = REQUIRED_FIELDS
                            .iter()
                            .all(|name| is_truthy(fields.get(*name)));
                        if complete {
                            accepted.push(StoredLocation::Normalized(
                                LocationRecord::from_fields(fields),
                            ));
                        }
                    }
                    // Scalar and array elements carry no fields.
                    _ => {}
                }
            }
            Ok(accepted)
        }
    }
}
