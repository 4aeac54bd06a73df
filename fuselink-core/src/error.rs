use thiserror::Error;

/// Raised when an inbound frame cannot be read as a signaling envelope.
#[derive(Error, Debug)]
pub enum EnvelopeError {
    #[error("envelope is not valid UTF-8")]
    NotUtf8,

    #[error("envelope is not a JSON object")]
    NotAnObject,

    #[error("invalid envelope JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RoomIdError {
    #[error("room id must not be empty")]
    Empty,
}
