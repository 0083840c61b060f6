//! event_core - Core types for the comet long-polling client
//!
//! This crate provides the foundational types shared by the polling crates:
//! - `message` - the tagged `Message` record pushed by the server
//! - `dispatch` - handler registration and per-type message dispatch

pub mod dispatch;
pub mod message;

// Re-export commonly used types
pub use dispatch::{Dispatch, Handler, HandlerRegistry, WILDCARD};
pub use message::Message;
