//! Graphics error types.

use thiserror::Error;

/// Errors that can occur in the rendering layer.
///
/// Nothing in this crate retries. Context acquisition failures are fatal at
/// construction, buffer creation failures are fatal for the call that
/// triggered them, and everything else reports a programming error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphicsError {
    /// The graphics context could not be acquired.
    #[error("context creation failed: {0}")]
    ContextCreationFailed(String),
    /// The context failed to allocate a resource.
    #[error("resource creation failed: {0}")]
    ResourceCreationFailed(String),
    /// A vertex attribute type label has no attribute pointer type.
    #[error("invalid attribute type: {0:?}")]
    InvalidAttributeType(String),
    /// A label was not recognized while translating in strict mode.
    #[error("unknown {kind} label: {label:?}")]
    UnknownLabel {
        /// Which vocabulary was being translated.
        kind: &'static str,
        /// The rejected label.
        label: String,
    },
    /// An index payload whose elements are not 1, 2 or 4 byte integers.
    #[error("invalid index payload: {0}")]
    InvalidIndexPayload(String),
    /// The context cannot draw with the requested index element type.
    #[error("index type {0} is not supported by this context")]
    UnsupportedIndexType(&'static str),
    /// A checked draw would read past the end of the bound data.
    #[error("draw range overflow: {requested} elements requested, {available} available")]
    DrawRangeOverflow {
        /// Total elements the submesh counts add up to.
        requested: u64,
        /// Elements actually present.
        available: u64,
    },
}

/// Result alias used throughout the crate.
pub type GraphicsResult<T> = Result<T, GraphicsError>;
