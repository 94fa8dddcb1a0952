//! Error types for the inspection engine
//!
//! No engine operation raises outward: every failure degrades to a
//! display state or a logged diagnostic. The types here are the shapes
//! those diagnostics and outcomes take.

use thiserror::Error;

/// An owner-reported failure while retrieving a value.
///
/// The owner evaluates the underlying field/property/element; when that
/// raises, the failure is pushed into the record, which enters the
/// Exception display state. It is never re-raised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct EvalFailure {
    /// The failure text, rendered in an error style
    pub message: String,
}

impl EvalFailure {
    /// Create an evaluation failure
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A structured failure while reading or writing a container member.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The value has no members at all
    #[error("{type_name} is not a container")]
    NotAContainer {
        /// Shape name of the offending value
        type_name: String,
    },

    /// No field with this name exists
    #[error("no field `{field}` on {type_name}")]
    MissingField {
        /// The requested field
        field: String,
        /// The container's type name
        type_name: String,
    },

    /// List index past the end
    #[error("index {index} out of bounds (len {len})")]
    IndexOutOfBounds {
        /// The requested index
        index: usize,
        /// The list length
        len: usize,
    },

    /// No entry under this key
    #[error("key `{key}` not found")]
    KeyNotFound {
        /// Display form of the requested key
        key: String,
    },
}

/// Outcome of a user edit, surfaced to the host.
///
/// Hosts use this to show rejection feedback; the engine itself has
/// already logged the diagnostic and reverted the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyResult {
    /// Parsed and written through
    Applied,

    /// The text did not parse; value untouched, display reverted
    ParseRejected,

    /// Parsed, but the write target rejected it (read-only or failed)
    WriteRejected,

    /// The record handle no longer points at a live record
    StaleRecord,
}
