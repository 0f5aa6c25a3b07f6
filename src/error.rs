//! Errors raised at the boundary between the codecs and the SDK types.

use crate::{codec::error::ReadError, wire::WireTag};

/// Error produced when converting SDK payloads into typed values and back.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A codec rejected the wire value.
    #[error(transparent)]
    Read(#[from] ReadError),
    /// The SDK value has no wire representation (binary sets, unknown variants).
    #[error("unsupported attribute value: {0}")]
    UnsupportedAttribute(String),
    /// An item codec wrote something other than a map.
    #[error("expected the item to encode as M, found {0}")]
    NotAnItem(WireTag),
}

/// Result alias defaulting to [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
