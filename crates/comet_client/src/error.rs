//! PollError - Failure modes of a poll cycle

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PollError {
    /// `start` was called while a previous runner is still live
    #[error("poll loop is already running")]
    AlreadyRunning,

    /// Connection failure, timeout, or abort
    #[error("poll request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("poll request returned status {0}")]
    Status(StatusCode),

    /// Response body was not a JSON array of messages
    #[error("failed to decode poll response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PollError>;
