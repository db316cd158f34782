//! Text boundary between the engine and the panel that calls it.
//!
//! Every call crosses as plain text: arguments are strings, replies are either
//! JSON documents, human-readable messages, or a script failure carrying
//! [`SCRIPT_ERROR_PREFIX`]. This module holds the reply shapes and the helpers
//! that encode and classify them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CommonPropertyTree, PropertyStatus};

/// Prefix marking a reply produced by a failure inside the host script.
pub const SCRIPT_ERROR_PREFIX: &str = "EXTENDSCRIPT_ERROR: ";

/// Prefix of human-readable failure messages returned by mutating calls.
pub const MESSAGE_ERROR_PREFIX: &str = "Error: ";

const SNIPPET_LIMIT: usize = 20;

/// `{ "error": "..." }`, the user-facing failure reply of JSON calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReply {
    pub error: String,
}

impl ErrorReply {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Reply of `getCommonProperties`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommonPropertiesReply {
    Error(ErrorReply),
    Tree(CommonPropertyTree),
}

/// Reply of `getPropertyStatus`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyStatusReply {
    Error(ErrorReply),
    Status(PropertyStatus),
}

/// Failures while decoding a raw reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplyError {
    #[error("empty response from host")]
    Empty,
    #[error("host script error: {0}")]
    Script(String),
    #[error("could not parse reply '{snippet}': {reason}")]
    Parse { snippet: String, reason: String },
}

/// Boolean flags cross the boundary as text; only `"true"` is true.
pub fn parse_flag(text: &str) -> bool {
    text == "true"
}

pub fn encode_flag(flag: bool) -> &'static str {
    if flag {
        "true"
    } else {
        "false"
    }
}

/// Encode a failure of the script itself.
pub fn encode_script_error(message: impl std::fmt::Display) -> String {
    format!("{SCRIPT_ERROR_PREFIX}{message}")
}

/// Encode a user-facing error as a JSON `{ "error": ... }` document.
pub fn encode_error(message: impl Into<String>) -> String {
    serde_json::to_string(&ErrorReply::new(message))
        .unwrap_or_else(|e| encode_script_error(e))
}

/// Serialize a reply, falling back to a script error if serialization fails.
pub fn encode_reply<T: Serialize>(reply: &T) -> String {
    serde_json::to_string(reply).unwrap_or_else(|e| encode_script_error(e))
}

/// Short excerpt of a raw reply for diagnostics (at most 20 characters).
pub fn reply_snippet(raw: &str) -> String {
    if raw.chars().count() > SNIPPET_LIMIT {
        let head: String = raw.chars().take(SNIPPET_LIMIT - 3).collect();
        format!("{head}...")
    } else {
        raw.to_string()
    }
}

/// Classify and decode a raw JSON reply.
pub fn decode_reply<T: DeserializeOwned>(raw: &str) -> Result<T, ReplyError> {
    if raw.is_empty() {
        return Err(ReplyError::Empty);
    }
    if let Some(rest) = raw.strip_prefix(SCRIPT_ERROR_PREFIX) {
        return Err(ReplyError::Script(rest.to_string()));
    }
    serde_json::from_str(raw).map_err(|e| ReplyError::Parse {
        snippet: reply_snippet(raw),
        reason: e.to_string(),
    })
}
