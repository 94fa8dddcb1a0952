//! Pooled interactive editors, one concrete kind per applicable category

use indexmap::IndexMap;

use crate::category::Category;
use crate::reflect::Runtime;
use crate::value::Value;

/// Entries shown per page in the list and map editors.
const PAGE_SIZE: usize = 25;

/// The concrete editor kinds.
///
/// Categories with no interactive representation (Boolean, Number,
/// NotEvaluated, Unsupported) map to none: their display slot already
/// carries the only control they need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorKind {
    /// Free text; also used for viewing full exception text
    Text,
    /// Enumeration constant picker
    VariantPicker,
    /// Four channel input fields
    ColorChannels,
    /// Per-field input grid for value structs
    FieldGrid,
    /// Paged read-out of collection elements
    ListPager,
    /// Paged read-out of dictionary entries
    MapPager,
}

impl EditorKind {
    /// The fixed category → editor kind table.
    ///
    /// Exception maps to the text editor so the full error text is
    /// viewable the same way long strings are.
    pub fn for_category(category: Category) -> Option<EditorKind> {
        match category {
            Category::String | Category::Exception => Some(EditorKind::Text),
            Category::Enum => Some(EditorKind::VariantPicker),
            Category::Color => Some(EditorKind::ColorChannels),
            Category::ValueStruct => Some(EditorKind::FieldGrid),
            Category::Collection => Some(EditorKind::ListPager),
            Category::Dictionary => Some(EditorKind::MapPager),
            Category::NotEvaluated
            | Category::Boolean
            | Category::Number
            | Category::Unsupported => None,
        }
    }
}

/// Per-kind transient editor state.
///
/// Everything in here is input state that must be wiped before the
/// editor instance is handed to an unrelated record.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorState {
    /// Free text buffer
    Text {
        /// The editable text
        buffer: String,
    },

    /// Constant list plus current selection
    VariantPicker {
        /// All constants of the enumeration
        variants: Vec<String>,
        /// Index of the selected constant
        selected: usize,
    },

    /// One input buffer per channel, `[r, g, b, a]`
    ColorChannels {
        /// Channel input buffers
        channels: [String; 4],
    },

    /// One input buffer per struct field, in declaration order
    FieldGrid {
        /// Field name → input buffer
        fields: IndexMap<String, String>,
    },

    /// Element snapshots plus paging state
    ListPager {
        /// Display text per element
        entries: Vec<String>,
        /// Authoritative element count
        count: usize,
        /// Current page
        page: usize,
    },

    /// Entry snapshots plus paging state
    MapPager {
        /// Display text per (key, value) entry
        entries: Vec<(String, String)>,
        /// Authoritative entry count
        count: usize,
        /// Current page
        page: usize,
    },
}

/// A pooled interactive editor.
///
/// Instances cycle through the pool; `refresh` loads a value in, `reset`
/// wipes all transient input state on the way back to the free list.
#[derive(Debug, Clone)]
pub struct Editor {
    kind: EditorKind,
    state: EditorState,
}

impl Editor {
    /// Construct a fresh editor of the given kind
    pub(crate) fn new(kind: EditorKind) -> Self {
        let state = match kind {
            EditorKind::Text => EditorState::Text {
                buffer: String::new(),
            },
            EditorKind::VariantPicker => EditorState::VariantPicker {
                variants: Vec::new(),
                selected: 0,
            },
            EditorKind::ColorChannels => EditorState::ColorChannels {
                channels: Default::default(),
            },
            EditorKind::FieldGrid => EditorState::FieldGrid {
                fields: IndexMap::new(),
            },
            EditorKind::ListPager => EditorState::ListPager {
                entries: Vec::new(),
                count: 0,
                page: 0,
            },
            EditorKind::MapPager => EditorState::MapPager {
                entries: Vec::new(),
                count: 0,
                page: 0,
            },
        };
        Self { kind, state }
    }

    /// This editor's kind
    pub fn kind(&self) -> EditorKind {
        self.kind
    }

    /// The current transient state
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// The text buffer, for the Text kind
    pub fn buffer(&self) -> Option<&str> {
        match &self.state {
            EditorState::Text { buffer } => Some(buffer.as_str()),
            _ => None,
        }
    }

    /// Replace the text buffer, for the Text kind
    pub fn set_buffer(&mut self, text: impl Into<String>) {
        if let EditorState::Text { buffer } = &mut self.state {
            *buffer = text.into();
        }
    }

    /// Number of pages in a pager editor; 1 otherwise
    pub fn page_count(&self) -> usize {
        let len = match &self.state {
            EditorState::ListPager { entries, .. } => entries.len(),
            EditorState::MapPager { entries, .. } => entries.len(),
            _ => return 1,
        };
        len.div_ceil(PAGE_SIZE).max(1)
    }

    /// Load the record's current value into the editor
    pub(crate) fn refresh(&mut self, value: Option<&Value>, rt: &dyn Runtime) {
        match &mut self.state {
            EditorState::Text { buffer } => {
                *buffer = match value {
                    Some(Value::String(s)) => s.as_ref().clone(),
                    Some(v) => v.to_string(),
                    None => String::new(),
                };
            }
            EditorState::VariantPicker { variants, selected } => {
                if let Some(Value::Enum(e)) = value {
                    *variants = rt
                        .lookup(&e.type_name)
                        .map(|ty| rt.variant_names(ty).to_vec())
                        .unwrap_or_default();
                    *selected = variants.iter().position(|v| *v == e.variant).unwrap_or(0);
                } else {
                    variants.clear();
                    *selected = 0;
                }
            }
            EditorState::ColorChannels { channels } => {
                if let Some(Value::Color(c)) = value {
                    for (buffer, channel) in channels.iter_mut().zip(c.channels()) {
                        *buffer = channel.to_string();
                    }
                } else {
                    for buffer in channels.iter_mut() {
                        buffer.clear();
                    }
                }
            }
            EditorState::FieldGrid { fields } => {
                fields.clear();
                if let Some(Value::Struct(s)) = value {
                    for (name, field) in &s.fields {
                        fields.insert(name.clone(), rt.format(field, rt.runtime_type(field)));
                    }
                }
            }
            EditorState::ListPager {
                entries,
                count,
                page,
            } => {
                entries.clear();
                *page = 0;
                *count = 0;
                if let Some(Value::List(items)) = value {
                    *count = items.len();
                    entries.extend(items.iter().map(|v| v.to_string()));
                }
            }
            EditorState::MapPager {
                entries,
                count,
                page,
            } => {
                entries.clear();
                *page = 0;
                *count = 0;
                if let Some(Value::Map(map)) = value {
                    *count = map.len();
                    entries.extend(map.iter().map(|(k, v)| (k.0.to_string(), v.to_string())));
                }
            }
        }
    }

    /// Wipe all transient input state.
    ///
    /// Pooled instances must never leak text or selection state between
    /// unrelated inspected values.
    pub(crate) fn reset(&mut self) {
        match &mut self.state {
            EditorState::Text { buffer } => buffer.clear(),
            EditorState::VariantPicker { variants, selected } => {
                variants.clear();
                *selected = 0;
            }
            EditorState::ColorChannels { channels } => {
                for buffer in channels.iter_mut() {
                    buffer.clear();
                }
            }
            EditorState::FieldGrid { fields } => fields.clear(),
            EditorState::ListPager {
                entries,
                count,
                page,
            } => {
                entries.clear();
                *count = 0;
                *page = 0;
            }
            EditorState::MapPager {
                entries,
                count,
                page,
            } => {
                entries.clear();
                *count = 0;
                *page = 0;
            }
        }
    }
}
