//! comet_client - Client-side long-polling event loop
//!
//! `PollLoop` long-polls on a URL and expects a JSON array of tagged message
//! objects back. Each message tells the client to do something: it is routed
//! to a registered handler by its `type` field (see `event_core`). After each
//! cycle the loop reschedules itself, quickly after a successful poll and
//! with a long backoff after any failure, until `stop()` is called.

pub mod config;
pub mod error;
pub mod poll;

pub use config::PollConfig;
pub use error::{PollError, Result};
pub use event_core::{Dispatch, Handler, HandlerRegistry, Message, WILDCARD};
pub use poll::PollLoop;
