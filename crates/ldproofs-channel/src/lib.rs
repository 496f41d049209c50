//! # ldproofs Channel
//!
//! Append-only anchoring channels. A signer anchors signature payloads on a
//! channel; a verifier reads them back, either by explicit coordinates or by
//! walking the channel in order.
//!
//! ## Implementations
//!
//! - [`MemoryTransport`] / [`MemoryChannel`] - In-memory channels on a shared
//!   [`MemoryLedger`], for testing and embedding

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{ChannelError, Result};
pub use memory::{MemoryChannel, MemoryLedger, MemoryTransport};
pub use traits::{AnchoringChannel, AnchoringResult, ChannelId, ChannelTransport, FetchResult};
