use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScrollPagerError {
    /// The target cannot receive scroll events, attaching to it is skipped.
    #[error("Target is not an event target.")]
    NotEventTarget,
    #[error("Failed to register scroll listener: {0}")]
    Listener(String),
    #[error("Failed to schedule trigger check: {0}")]
    Schedule(String),
    #[error("Invalid trigger configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ScrollPagerError {
    fn from(error: serde_json::Error) -> Self {
        ScrollPagerError::Config(error.to_string())
    }
}
