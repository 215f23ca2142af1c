//! Request fingerprints for memoization.

use crate::ChatMessage;
use sha2::{Digest, Sha256};

/// Content hash over a canonicalized message list.
///
/// Logically identical requests always produce the same fingerprint: each
/// message's role and content feed the hash in order with length framing, so
/// the derivation is deterministic and independent of any serializer quirks.
///
/// # Examples
///
/// ```
/// use giotto_core::{ChatMessage, Fingerprint};
///
/// let messages = vec![ChatMessage::user("Hello")];
/// let a = Fingerprint::of_messages(&messages);
/// let b = Fingerprint::of_messages(&messages);
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Derives the fingerprint of a message list.
    pub fn of_messages(messages: &[ChatMessage]) -> Self {
        let mut hasher = Sha256::new();
        for message in messages {
            let role = message.role.as_str();
            hasher.update((role.len() as u64).to_le_bytes());
            hasher.update(role.as_bytes());
            hasher.update((message.content.len() as u64).to_le_bytes());
            hasher.update(message.content.as_bytes());
        }
        Self(format!("{:x}", hasher.finalize()))
    }

    /// Hex digest as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
