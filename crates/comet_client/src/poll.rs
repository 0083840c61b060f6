//! Poll loop - long-poll a URL and dispatch the returned messages
//!
//! One `PollLoop` owns one runner task. The runner issues a GET, hands the
//! decoded batch to the configured `Dispatch`, then sleeps for a delay that
//! is a pure function of the cycle outcome before polling again.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use event_core::{Dispatch, Message};
use reqwest::header::ACCEPT;
use reqwest::Client;
use tokio_util::sync::CancellationToken;

use crate::config::PollConfig;
use crate::error::{PollError, Result};

/// Per-start runner state: the token that cancels it and its liveness flag.
///
/// Both are replaced together on every `start`, so a stale runner from a
/// previous start/stop cycle only ever touches its own flag and token and
/// can neither cancel nor report for its successor.
struct RunState {
    cancel: CancellationToken,
    running: Arc<AtomicBool>,
}

/// A long-polling event loop bound to one URL and one dispatch strategy.
///
/// Construct one per event stream; independent loops do not share state.
/// `start` spawns the runner and returns immediately; `stop` aborts the
/// in-flight request (or pending reschedule delay) and halts the chain.
pub struct PollLoop {
    client: Client,
    config: PollConfig,
    state: Mutex<RunState>,
}

impl PollLoop {
    /// Create an idle loop with the given configuration
    pub fn new(config: PollConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            state: Mutex::new(RunState {
                cancel: CancellationToken::new(),
                running: Arc::new(AtomicBool::new(false)),
            }),
        }
    }

    /// Start polling `url`, routing each batch through `dispatch`.
    ///
    /// Non-blocking: the runner is spawned onto the tokio runtime and this
    /// returns once it is scheduled. The URL and dispatch are captured once
    /// and reused by every internally rescheduled cycle. Fails with
    /// `PollError::AlreadyRunning` if the previous runner has not stopped.
    pub fn start(&self, url: impl Into<String>, dispatch: impl Into<Dispatch>) -> Result<()> {
        let cancel = CancellationToken::new();
        let running = Arc::new(AtomicBool::new(true));
        {
            let mut state = self.state.lock().unwrap();
            if state.running.load(Ordering::SeqCst) {
                return Err(PollError::AlreadyRunning);
            }
            state.cancel = cancel.clone();
            state.running = Arc::clone(&running);
        }

        let client = self.client.clone();
        let config = self.config.clone();
        let url = url.into();
        let dispatch = dispatch.into();

        tokio::spawn(async move {
            run_poll_loop(&client, &config, &url, &dispatch, &cancel).await;
            // This runner's own flag, never the one of a later start
            running.store(false, Ordering::SeqCst);
        });

        Ok(())
    }

    /// Stop the loop.
    ///
    /// Aborts the in-flight request or the pending reschedule delay,
    /// whichever the runner is waiting on. Idempotent: stopping an already
    /// stopped loop is a no-op. `start` may be called again afterwards.
    pub fn stop(&self) {
        let state = self.state.lock().unwrap();
        state.cancel.cancel();
        state.running.store(false, Ordering::SeqCst);
    }

    /// Whether the runner task is live
    pub fn is_running(&self) -> bool {
        self.state.lock().unwrap().running.load(Ordering::SeqCst)
    }
}

impl Default for PollLoop {
    fn default() -> Self {
        Self::new(PollConfig::default())
    }
}

/// The self-rescheduling poll chain. Runs until cancelled.
async fn run_poll_loop(
    client: &Client,
    config: &PollConfig,
    url: &str,
    dispatch: &Dispatch,
    cancel: &CancellationToken,
) {
    log::debug!("poll loop started for {url}");
    loop {
        let outcome = tokio::select! {
            () = cancel.cancelled() => break,
            outcome = poll_once(client, url, config.timeout) => outcome,
        };

        match &outcome {
            Ok(batch) => {
                log::debug!("polled {} entries from {url}", batch.len());
                dispatch.run(batch);
            }
            Err(err) => {
                log::warn!("poll cycle against {url} failed: {err}");
            }
        }

        tokio::select! {
            () = cancel.cancelled() => break,
            () = tokio::time::sleep(retry_delay(config, &outcome)) => {}
        }
    }
    log::debug!("poll loop stopped for {url}");
}

/// Issue one long-poll GET and decode the batch.
///
/// The body must be a JSON array of message objects; null entries are
/// tolerated here and skipped later by dispatch.
async fn poll_once(
    client: &Client,
    url: &str,
    timeout: Option<Duration>,
) -> Result<Vec<Option<Message>>> {
    let mut request = client.get(url).header(ACCEPT, "application/json");
    if let Some(timeout) = timeout {
        request = request.timeout(timeout);
    }

    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(PollError::Status(status));
    }

    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Delay before the next cycle, as a pure function of this cycle's outcome.
fn retry_delay(config: &PollConfig, outcome: &Result<Vec<Option<Message>>>) -> Duration {
    if outcome.is_ok() {
        config.poll_delay
    } else {
        config.retry_delay
    }
}
