//! Decoded completion results.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The decoded outcome of a generation call.
///
/// Either a structured mapping of named result fields (summary, citations,
/// hypotheses, and so on, as produced by the deployed prompt template), or a
/// raw-content fallback when the payload was not parseable as structured
/// data. Immutable once produced.
///
/// The untagged serde representation matches the shape consumers persist:
/// a structured result serializes as the mapping itself, a fallback as
/// `{"raw_content": "..."}`.
///
/// # Examples
///
/// ```
/// use giotto_core::CompletionResult;
/// use serde_json::json;
///
/// let result = CompletionResult::raw("freeform prose");
/// assert_eq!(
///     serde_json::to_value(&result).unwrap(),
///     json!({"raw_content": "freeform prose"}),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompletionResult {
    /// Raw text fallback for unparsable payloads.
    ///
    /// Listed first so deserialization prefers it when a mapping carries
    /// exactly the fallback shape.
    Raw {
        /// The verbatim generated text
        raw_content: String,
    },
    /// Structured mapping of named result fields.
    Structured(Map<String, Value>),
}

impl CompletionResult {
    /// Creates a raw-content fallback result.
    pub fn raw(content: impl Into<String>) -> Self {
        CompletionResult::Raw {
            raw_content: content.into(),
        }
    }

    /// True when the payload parsed as a structured mapping.
    pub fn is_structured(&self) -> bool {
        matches!(self, CompletionResult::Structured(_))
    }

    /// The structured fields, if any.
    pub fn fields(&self) -> Option<&Map<String, Value>> {
        match self {
            CompletionResult::Structured(map) => Some(map),
            CompletionResult::Raw { .. } => None,
        }
    }

    /// The raw fallback text, if any.
    pub fn raw_content(&self) -> Option<&str> {
        match self {
            CompletionResult::Raw { raw_content } => Some(raw_content),
            CompletionResult::Structured(_) => None,
        }
    }
}
