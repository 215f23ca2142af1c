//! Core type definitions for the Giotto interface.

use futures_util::stream::Stream;
use giotto_error::GiottoResult;
use std::pin::Pin;

/// A lazy, finite sequence of decoded text fragments from a streaming call.
///
/// Fragments arrive in transport order; the sequence terminates when the
/// transport closes.
pub type FragmentStream = Pin<Box<dyn Stream<Item = GiottoResult<String>> + Send>>;
