use thiserror::Error;

#[derive(Error, Debug)]
pub enum HubError {
    /// The control loop task has stopped; no further admissions are possible.
    #[error("hub control loop is not running")]
    ControlLoopClosed,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("outbound queue capacity must be at least 1")]
    ZeroCapacity,

    #[error("invalid CORS origin: {0}")]
    InvalidOrigin(String),

    #[error("TURN username or credential given without a TURN url")]
    TurnWithoutUrl,
}
