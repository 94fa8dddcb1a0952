//! Text ⇄ value conversion collaborator seam

use thiserror::Error;

use crate::reflect::TypeId;
use crate::value::Value;

/// Parse failure taxonomy for user-entered text.
///
/// Parse failures are never fatal to the engine: the record reports the
/// failure, leaves the authoritative value untouched, and re-renders.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The text does not convert to the target type
    #[error("cannot parse `{text}` as {type_name}: {reason}")]
    Invalid {
        /// The offending input
        text: String,
        /// The target type's name
        type_name: String,
        /// Parser-provided detail
        reason: String,
    },

    /// No enumeration constant matches the text
    #[error("no constant named `{text}` on {type_name}")]
    UnknownVariant {
        /// The offending input
        text: String,
        /// The enumeration's name
        type_name: String,
    },

    /// The type has no text form at all
    #[error("{type_name} does not support text input")]
    Unsupported {
        /// The target type's name
        type_name: String,
    },
}

/// Text parsing and formatting for inspectable types.
///
/// The round-trip law: for every value `v` that `format` renders for a
/// type `t` it can parse, `try_parse(format(v, t), t)` must reproduce an
/// equal value. Record edits rely on this to echo applied input back.
pub trait Codec {
    /// Whether the type supports the text round-trip
    fn can_parse(&self, ty: TypeId) -> bool;

    /// Parse user text into a value of the given type
    fn try_parse(&self, text: &str, ty: TypeId) -> Result<Value, ParseError>;

    /// Render a value as editable input text
    fn format(&self, value: &Value, ty: TypeId) -> String;

    /// Placeholder text showing the expected input shape
    fn example_text(&self, ty: TypeId) -> String;
}
