use thiserror::Error;

/// Failure modes the behaviours degrade on.
///
/// None of these reach the user. The web layer logs them and takes the
/// silent fallback path for the behaviour involved.
#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Unexpected HTTP status {0}")]
    HttpStatus(u16),
    #[error("Malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Server rejected the request{}", .0.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Rejected(Option<String>),
    #[error("Successful response carried no basket count")]
    MissingCount,
    #[error("Request timed out after {0} ms")]
    TimedOut(u32),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Quantity bounds are invalid: min {min}, max {max}")]
    QuantityBounds { min: u32, max: u32 },
    #[error("Timing `{0}` must be greater than zero")]
    ZeroTiming(&'static str),
    #[error("Unknown log level `{0}`")]
    LogLevel(String),
    #[error("Setting `{0}` must not be empty")]
    Empty(&'static str),
}
