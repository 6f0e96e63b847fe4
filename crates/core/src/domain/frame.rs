// Frame Domain Model

use crate::port::IdProvider;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Message identifier (unique per storage instance)
pub type MessageId = String;

/// Header carrying the storage-assigned message identifier
pub const MESSAGE_ID_HEADER: &str = "message-id";

/// Header naming the destination a frame was published to
pub const DESTINATION_HEADER: &str = "destination";

/// Command of frames delivered to consumers
pub const MESSAGE_COMMAND: &str = "MESSAGE";

/// One message in transit: a command, a set of named headers and a body.
///
/// The storage layer treats the body as opaque. Its only write is the
/// `message-id` header (plus `destination` when the broker left it unset),
/// and it never replaces a `message-id` that is already present, so a
/// requeued frame keeps its identity across redelivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    command: String,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl Frame {
    pub fn new(command: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            command: command.into(),
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Create a `MESSAGE` frame
    pub fn message(body: impl Into<Vec<u8>>) -> Self {
        Self::new(MESSAGE_COMMAND, body)
    }

    /// Builder-style header setter
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Iterate over all headers (unordered)
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Set a header, returning the previous value
    pub fn set_header(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.headers.insert(name.into(), value.into())
    }

    pub fn remove_header(&mut self, name: &str) -> Option<String> {
        self.headers.remove(name)
    }

    /// Body length in bytes
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// The assigned message id, if any. An empty header counts as absent.
    pub fn message_id(&self) -> Option<&str> {
        self.header(MESSAGE_ID_HEADER).filter(|id| !id.is_empty())
    }

    /// Assign a message id from `ids` unless one is already present.
    ///
    /// Returns the id in effect after the call. Every backend routes both
    /// enqueue and requeue through here.
    pub fn ensure_message_id(&mut self, ids: &dyn IdProvider) -> MessageId {
        if let Some(existing) = self.message_id() {
            return existing.to_string();
        }
        let id = ids.generate_id();
        self.headers.insert(MESSAGE_ID_HEADER.to_string(), id.clone());
        id
    }

    /// Stamp the destination header unless the broker already set one
    pub fn ensure_destination(&mut self, destination: &str) {
        self.headers
            .entry(DESTINATION_HEADER.to_string())
            .or_insert_with(|| destination.to_string());
    }
}
