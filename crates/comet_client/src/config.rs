//! PollConfig - Timing knobs of the poll loop

use std::time::Duration;

/// Configuration for a poll loop.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Per-request timeout; `None` lets the request stay open indefinitely,
    /// which is the usual choice for long polling
    pub timeout: Option<Duration>,
    /// Delay before the next poll after a successful cycle
    pub poll_delay: Duration,
    /// Delay before the next poll after a failed cycle
    pub retry_delay: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            poll_delay: Duration::from_millis(100),
            retry_delay: Duration::from_millis(5000),
        }
    }
}
