//! Display-slot binding seam and the closed render union

/// Text styling for rendered labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Default styling
    Plain,
    /// De-emphasized (placeholders, null values)
    Muted,
    /// Error styling (exception text)
    Error,
    /// Highlighted literal (string previews)
    Accent,
}

/// A piece of derived display text with its styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// The text to display
    pub text: String,
    /// How to style it
    pub tone: Tone,
}

impl Label {
    /// Plain-toned label
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Plain,
        }
    }

    /// Muted label for placeholders and nulls
    pub fn muted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Muted,
        }
    }

    /// Error-styled label
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Error,
        }
    }

    /// Accent-styled label
    pub fn accent(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Accent,
        }
    }
}

/// What a record asks its bound slot to show, one variant per category.
///
/// Each variant carries exactly the fields that category renders: the
/// slot activates the matching controls and deactivates the rest. The
/// engine owns no layout; this union is the whole rendering contract.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendering {
    /// Nothing evaluated yet; show the placeholder
    NotEvaluated {
        /// "Not yet evaluated (Type)" text
        placeholder: Label,
    },

    /// The evaluation raised; show the error text
    Exception {
        /// The failure text, error-toned
        message: Label,
    },

    /// Toggle control
    Boolean {
        /// Current toggle state
        value: bool,
        /// Whether the toggle accepts input
        writable: bool,
    },

    /// Input field plus type label; no separate value label
    Number {
        /// Editable input text
        input: String,
        /// The runtime type's name
        type_label: String,
        /// Whether the apply action is available
        writable: bool,
    },

    /// Quoted, truncated preview; expandable even when null so the
    /// nested text editor can author a fresh string
    String {
        /// The preview text
        preview: Label,
        /// Whether the nested-content affordance is shown
        expandable: bool,
    },

    /// Constant name; expandable into the variant picker when writable
    Enum {
        /// The constant and type text
        label: Label,
        /// Whether the nested-content affordance is shown
        expandable: bool,
    },

    /// Channel input field plus nested channel editor
    Color {
        /// Editable "r g b a" text
        input: String,
        /// The runtime type's name
        type_label: String,
        /// Whether the apply action is available
        writable: bool,
        /// Whether the nested-content affordance is shown
        expandable: bool,
    },

    /// Flat-parseable value struct: input field when the codec can
    /// round-trip it, plain label otherwise
    ValueStruct {
        /// Editable flat text, when parseable
        input: Option<String>,
        /// Fallback label, when not parseable as one token run
        label: Option<Label>,
        /// The runtime type's name
        type_label: String,
        /// Whether the apply action is available
        writable: bool,
        /// Whether the inspect action is available
        inspectable: bool,
        /// Whether the nested-content affordance is shown
        expandable: bool,
    },

    /// Count-prefixed label; inspect and expand only when non-null
    Collection {
        /// "[N] value (Type)" text
        label: Label,
        /// Whether the inspect action is available
        inspectable: bool,
        /// Whether the nested-content affordance is shown
        expandable: bool,
    },

    /// Count-prefixed label; inspect and expand only when non-null
    Dictionary {
        /// "[N] value (Type)" text
        label: Label,
        /// Whether the inspect action is available
        inspectable: bool,
        /// Whether the nested-content affordance is shown
        expandable: bool,
    },

    /// Inspect-only display
    Unsupported {
        /// "value (Type)" text
        label: Label,
        /// Whether the inspect action is available
        inspectable: bool,
    },
}

/// An externally-owned display binding.
///
/// The record only pushes state into the slot; the slot owns all layout
/// and widget construction. Binding is exclusive: a slot shows exactly
/// one record while bound.
pub trait DisplaySlot {
    /// Called when a record takes this slot
    fn on_bound(&mut self) {}

    /// Called when the record lets go of this slot
    fn on_unbound(&mut self) {}

    /// Push the record's current state into the slot
    fn render(&mut self, name: &Label, state: &Rendering, expanded: bool);
}

/// Truncate display text to a bounded length, appending an ellipsis.
///
/// Counts characters, not bytes, so multi-byte text never splits.
pub fn prune(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max).collect();
    format!("{kept}...")
}
