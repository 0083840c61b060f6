//! Message - Server-pushed event record
//!
//! A message is a JSON object discriminated by its `type` field. Everything
//! besides the tag is server-defined and carried through untyped.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One server-pushed event, discriminated by its `type` tag.
///
/// The tag decides which handler receives the message; all remaining
/// fields are kept as raw JSON for the handler to interpret.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Message {
    /// The type tag, e.g. `"chat"` or `"ping"`
    #[serde(rename = "type")]
    pub kind: String,

    /// All additional fields of the message object
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Message {
    /// Create a message with the given type tag and no extra fields
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: Map::new(),
        }
    }

    /// Add an extra field (builder style)
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Look up an extra field by name
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}
