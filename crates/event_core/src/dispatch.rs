//! Dispatch - Handler registration and message routing
//!
//! Routes each message in a polled batch to the handler registered under its
//! type tag, with `"*"` as the fallback when no exact tag matches.

use std::collections::HashMap;
use std::fmt;

use crate::message::Message;

/// Tag of the fallback handler, consulted when no exact type matches.
pub const WILDCARD: &str = "*";

/// A handler invoked with one message.
pub type Handler = Box<dyn Fn(&Message) + Send + Sync>;

/// A full dispatch override invoked with the raw decoded batch.
pub type DispatchFn = Box<dyn Fn(&[Option<Message>]) + Send + Sync>;

/// Mapping from message type tag to handler.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Handler>,
}

impl HandlerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a type tag (builder style)
    pub fn on(mut self, kind: impl Into<String>, handler: impl Fn(&Message) + Send + Sync + 'static) -> Self {
        self.insert(kind, handler);
        self
    }

    /// Register the wildcard fallback handler (builder style)
    pub fn wildcard(self, handler: impl Fn(&Message) + Send + Sync + 'static) -> Self {
        self.on(WILDCARD, handler)
    }

    /// Register a handler for a type tag, replacing any existing one
    pub fn insert(&mut self, kind: impl Into<String>, handler: impl Fn(&Message) + Send + Sync + 'static) {
        self.handlers.insert(kind.into(), Box::new(handler));
    }

    /// Number of registered handlers, wildcard included
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check whether no handlers are registered
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Exact tag match first, then the wildcard
    fn resolve(&self, kind: &str) -> Option<&Handler> {
        self.handlers.get(kind).or_else(|| self.handlers.get(WILDCARD))
    }

    /// Dispatch a batch of messages in array order.
    ///
    /// Null entries are skipped, as is any message whose tag has neither an
    /// exact handler nor a wildcard. A miss is not an error.
    pub fn dispatch(&self, batch: &[Option<Message>]) {
        for message in batch.iter().flatten() {
            match self.resolve(&message.kind) {
                Some(handler) => handler(message),
                None => log::trace!("no handler for message type '{}'", message.kind),
            }
        }
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("tags", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// How a poll loop turns a decoded batch into handler calls.
///
/// `Registry` routes per type tag; `Function` replaces the whole batch
/// dispatch strategy and receives the raw batch, null entries included.
pub enum Dispatch {
    Registry(HandlerRegistry),
    Function(DispatchFn),
}

impl Dispatch {
    /// Wrap a dispatch override function
    pub fn function(f: impl Fn(&[Option<Message>]) + Send + Sync + 'static) -> Self {
        Self::Function(Box::new(f))
    }

    /// Run the configured dispatch strategy over one batch
    pub fn run(&self, batch: &[Option<Message>]) {
        match self {
            Self::Registry(registry) => registry.dispatch(batch),
            Self::Function(f) => f(batch),
        }
    }
}

impl From<HandlerRegistry> for Dispatch {
    fn from(registry: HandlerRegistry) -> Self {
        Self::Registry(registry)
    }
}

impl fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registry(registry) => f.debug_tuple("Registry").field(registry).finish(),
            Self::Function(_) => f.debug_tuple("Function").field(&"..").finish(),
        }
    }
}
