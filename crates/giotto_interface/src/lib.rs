//! Trait definitions for the Giotto watsonx client library.
//!
//! This crate defines the seams between the resilient client core and its
//! collaborators: the driver traits an embedding application programs
//! against, and the observer interface that keeps wait-time presentation out
//! of the core.

mod observer;
mod traits;
mod types;

pub use observer::{NoopObserver, WaitKind, WaitObserver};
pub use traits::{DeploymentDriver, Streaming};
pub use types::FragmentStream;
