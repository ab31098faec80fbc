use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("cannot read locations from a {kind} body: expected an object or an array")]
    UnreadableBody { kind: &'static str },
    #[error("cannot read location record {index}: record is null or missing")]
    UnreadableRecord { index: usize },
}
