//! The inspected-value record: one slot's value, category, labels, and editor

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::args::ParamSpec;
use crate::category::{classify, Category};
use crate::editor::{Editor, EditorKind};
use crate::error::{AccessError, EvalFailure};
use crate::pool::EditorPool;
use crate::reflect::{Runtime, TypeId};
use crate::session::{RecordId, SessionOptions};
use crate::slot::{prune, DisplaySlot, Label, Rendering, Tone};
use crate::value::Value;

/// A position within a container value.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    /// A named struct field (or object field, for store writes)
    Field(String),
    /// A list element
    Index(usize),
    /// A map entry
    Key(crate::value::MapKey),
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Field(name) => write!(f, ".{name}"),
            Member::Index(i) => write!(f, "[{i}]"),
            Member::Key(k) => write!(f, "[{}]", k.0),
        }
    }
}

/// Where a record's write-back lands.
#[derive(Debug, Clone, PartialEq)]
pub enum Origin {
    /// A member of a live container owned by the store
    Store {
        /// The store-owned container (an object reference value)
        target: Value,
        /// The member within it
        member: Member,
    },

    /// A member of the parent record's disconnected container copy.
    ///
    /// Writes land in the parent's payload and then cascade upward,
    /// because editing a copy never reaches the original storage.
    Parent {
        /// The member within the parent's container
        member: Member,
    },

    /// No write target at all (watch expressions, method results)
    Detached,
}

/// Construction parameters for a record.
#[derive(Debug, Clone)]
pub struct RecordSpec {
    /// Display name of the inspected slot
    pub name: String,
    /// Fallback/static type used when the value is absent
    pub declared: TypeId,
    /// Where write-back lands
    pub origin: Origin,
    /// Whether the slot accepts writes at all
    pub writable: bool,
    /// Parameters required before evaluation; empty for plain slots
    pub params: Vec<ParamSpec>,
}

impl RecordSpec {
    /// A writable, detached record
    pub fn new(name: impl Into<String>, declared: TypeId) -> Self {
        Self {
            name: name.into(),
            declared,
            origin: Origin::Detached,
            writable: true,
            params: Vec::new(),
        }
    }

    /// Set the write-back origin (builder pattern)
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    /// Reject all writes to this slot
    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// Require arguments before evaluation
    pub fn with_params(mut self, params: Vec<ParamSpec>) -> Self {
        self.params = params;
        self
    }
}

/// The state machine tracking one inspected slot.
///
/// Holds the current value, its category, cached labels, and the
/// attached editor. All mutation goes through the session, which owns
/// the arena and the editor pool; the record itself enforces the
/// per-slot invariants:
///
/// - at most one editor, and its kind always matches the category
/// - `value` is assigned only by `evaluate`
/// - labels are recomputed on every evaluation, never left stale
pub struct Record {
    name: String,
    declared: TypeId,
    value: Option<Value>,
    category: Category,
    last_classified: Option<TypeId>,
    was_null: bool,
    had_exception: bool,
    last_error: Option<String>,
    editor: Option<Editor>,
    expanded: bool,
    pending_refresh: bool,
    parent: Option<RecordId>,
    slot: Option<Box<dyn DisplaySlot>>,
    value_label: Option<Label>,
    origin: Origin,
    writable: bool,
    params: Vec<ParamSpec>,
}

impl Record {
    pub(crate) fn new(
        spec: RecordSpec,
        parent: Option<RecordId>,
        rt: &dyn Runtime,
        options: &SessionOptions,
    ) -> Self {
        let mut record = Self {
            name: spec.name,
            declared: spec.declared,
            value: None,
            category: Category::NotEvaluated,
            last_classified: None,
            was_null: true,
            had_exception: false,
            last_error: None,
            editor: None,
            expanded: false,
            pending_refresh: false,
            parent,
            slot: None,
            value_label: None,
            origin: spec.origin,
            writable: spec.writable,
            params: spec.params,
        };
        record.value_label = record.derive_value_label(rt, options);
        record
    }

    // ═══════════════════════════════════════════════════════════════════
    // Read accessors
    // ═══════════════════════════════════════════════════════════════════

    /// Display name of the inspected slot
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fallback/static type
    pub fn declared(&self) -> TypeId {
        self.declared
    }

    /// The current evaluated payload, if any
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// The current category
    pub fn category(&self) -> Category {
        self.category
    }

    /// The memoized classification key
    pub fn last_classified(&self) -> Option<TypeId> {
        self.last_classified
    }

    /// Whether the last evaluation produced an absent or dead value
    pub fn was_null(&self) -> bool {
        self.was_null
    }

    /// Whether the last evaluation raised in the owner
    pub fn had_exception(&self) -> bool {
        self.had_exception
    }

    /// The last evaluation failure text, if any
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The attached editor, if any
    pub fn editor(&self) -> Option<&Editor> {
        self.editor.as_ref()
    }

    /// The attached editor's kind, if any
    pub fn editor_kind(&self) -> Option<EditorKind> {
        self.editor.as_ref().map(Editor::kind)
    }

    /// Whether the nested editor is currently shown
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Whether an evaluation arrived while the editor was collapsed
    pub fn pending_refresh(&self) -> bool {
        self.pending_refresh
    }

    /// The enclosing record, when this is a nested-copy member
    pub fn parent(&self) -> Option<RecordId> {
        self.parent
    }

    /// The cached value label; `None` for categories that render
    /// through dedicated controls (Boolean, Number, parseable structs)
    pub fn value_label(&self) -> Option<&Label> {
        self.value_label.as_ref()
    }

    /// Where write-back lands
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Whether the slot accepts writes
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Parameters required before evaluation
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Whether a display slot is currently bound
    pub fn is_bound(&self) -> bool {
        self.slot.is_some()
    }

    /// The type driving display and editor selection right now
    pub fn display_type(&self) -> TypeId {
        self.last_classified.unwrap_or(self.declared)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Evaluation
    // ═══════════════════════════════════════════════════════════════════

    /// The sole mutator of `value`. Never raises; always leaves the
    /// record consistent and renderable.
    pub(crate) fn evaluate(
        &mut self,
        outcome: Result<Option<Value>, EvalFailure>,
        rt: &dyn Runtime,
        pool: &mut EditorPool,
        options: &SessionOptions,
    ) {
        match outcome {
            Ok(value) => {
                self.had_exception = false;
                self.last_error = None;
                self.value = value;
            }
            Err(failure) => {
                self.had_exception = true;
                self.last_error = Some(failure.message);
                self.value = None;
            }
        }

        self.reprocess(rt, pool, options);

        // If an editor survived invalidation, it needs the new value:
        // immediately while visible, deferred while collapsed.
        if let Some(editor) = self.editor.as_mut() {
            if self.expanded {
                editor.refresh(self.value.as_ref(), rt);
            } else {
                self.pending_refresh = true;
            }
        }
    }

    /// Re-run classification, editor invalidation, and label derivation
    /// against the current value.
    pub(crate) fn reprocess(
        &mut self,
        rt: &dyn Runtime,
        pool: &mut EditorPool,
        options: &SessionOptions,
    ) {
        let prev = self.category;
        let live = self.value.as_ref().is_some_and(|v| rt.is_alive(v));

        if self.had_exception {
            self.was_null = true;
            self.last_classified = Some(self.declared);
            self.category = Category::Exception;
        } else if !live {
            self.was_null = true;
            self.category = self.state_for(self.declared, rt);
        } else {
            self.was_null = false;
            let ty = match self.value.as_ref() {
                Some(value) => rt.runtime_type(value),
                None => self.declared,
            };
            self.category = self.state_for(ty, rt);
        }

        // Release the editor on a category change (it was built for the
        // old category), and on null values for everything but strings
        // (a null string is still authorable through the text editor).
        if self.editor.is_some()
            && (self.category != prev || (!live && self.category != Category::String))
        {
            self.release_editor(pool);
            self.expanded = false;
        }

        self.value_label = self.derive_value_label(rt, options);
    }

    /// Memoized classification: skipped while the type is unchanged.
    ///
    /// Exception and NotEvaluated are assigned directly, never produced
    /// by the classifier, so they do not count as a cached result: the
    /// next clean evaluation reclassifies even for an unchanged type.
    fn state_for(&mut self, ty: TypeId, rt: &dyn Runtime) -> Category {
        if self.last_classified == Some(ty)
            && !matches!(
                self.category,
                Category::Exception | Category::NotEvaluated
            )
        {
            return self.category;
        }
        self.last_classified = Some(ty);
        classify(rt, ty)
    }

    pub(crate) fn set_declared(
        &mut self,
        ty: TypeId,
        rt: &dyn Runtime,
        options: &SessionOptions,
    ) {
        self.declared = ty;
        self.value_label = self.derive_value_label(rt, options);
    }

    /// In-place access to the container payload for the write-back
    /// cascade. This edits *inside* the current value; the value slot
    /// itself is still assigned only by `evaluate`.
    pub(crate) fn container_mut(&mut self) -> Option<&mut Value> {
        self.value.as_mut()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Editor lifecycle
    // ═══════════════════════════════════════════════════════════════════

    pub(crate) fn attach_editor(&mut self, editor: Editor) {
        debug_assert_eq!(
            EditorKind::for_category(self.category),
            Some(editor.kind()),
            "editor kind must match the record's category"
        );
        self.editor = Some(editor);
        self.expanded = true;
    }

    /// Idempotent: returns any attached editor to the pool.
    pub(crate) fn release_editor(&mut self, pool: &mut EditorPool) {
        if let Some(editor) = self.editor.take() {
            pool.reclaim(editor);
        }
    }

    pub(crate) fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    pub(crate) fn clear_pending_refresh(&mut self) {
        self.pending_refresh = false;
    }

    pub(crate) fn push_value_into_editor(&mut self, rt: &dyn Runtime) {
        if let Some(editor) = self.editor.as_mut() {
            editor.refresh(self.value.as_ref(), rt);
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Display binding
    // ═══════════════════════════════════════════════════════════════════

    /// Take the slot, returning any displaced previous binding.
    pub(crate) fn bind(&mut self, mut slot: Box<dyn DisplaySlot>) -> Option<Box<dyn DisplaySlot>> {
        slot.on_bound();
        let displaced = self.slot.replace(slot);
        if displaced.is_some() {
            debug!(record = %self.name, "displaced an existing display binding");
        }
        displaced.map(|mut old| {
            old.on_unbound();
            old
        })
    }

    /// Break the binding, handing the slot back. The editor stays
    /// attached (inert) so it remains poolable.
    pub(crate) fn unbind(&mut self) -> Option<Box<dyn DisplaySlot>> {
        self.slot.take().map(|mut slot| {
            slot.on_unbound();
            slot
        })
    }

    /// Push the current state into the bound slot, if any.
    pub(crate) fn render(&mut self, rt: &dyn Runtime, options: &SessionOptions) {
        let name = Label::plain(self.name.clone());
        let state = self.rendering(rt, options);
        let expanded = self.expanded;
        if let Some(slot) = self.slot.as_mut() {
            slot.render(&name, &state, expanded);
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Label and rendering derivation
    // ═══════════════════════════════════════════════════════════════════

    fn derive_value_label(&self, rt: &dyn Runtime, options: &SessionOptions) -> Option<Label> {
        let mut prefix = String::new();

        match self.category {
            Category::NotEvaluated => {
                return Some(Label::muted(format!(
                    "Not yet evaluated ({})",
                    rt.type_name(self.declared)
                )));
            }

            Category::Exception => {
                let text = self
                    .last_error
                    .clone()
                    .unwrap_or_else(|| "unknown evaluation error".to_string());
                return Some(Label::error(text));
            }

            // bool and number render through dedicated controls
            Category::Boolean | Category::Number => return None,

            // and a parseable value struct renders through its input
            Category::ValueStruct => {
                if rt.can_parse(self.display_type()) {
                    return None;
                }
            }

            Category::String => {
                if let Some(text) = self.value.as_ref().and_then(Value::as_str) {
                    if !self.was_null {
                        let mut pruned = prune(text, options.string_preview_len);
                        if options.quote_strings {
                            pruned = format!("\"{pruned}\"");
                        }
                        return Some(Label::accent(pruned));
                    }
                }
            }

            // prefix the element count when it is known
            Category::Collection => {
                if !self.was_null {
                    prefix = match self.value.as_ref() {
                        Some(Value::List(items)) => format!("[{}] ", items.len()),
                        _ => "[?] ".to_string(),
                    };
                }
            }

            Category::Dictionary => {
                if !self.was_null {
                    prefix = match self.value.as_ref() {
                        Some(Value::Map(map)) => format!("[{}] ", map.len()),
                        _ => "[?] ".to_string(),
                    };
                }
            }

            _ => {}
        }

        // Cases that fall through render as "value (Type)".
        let (body, tone) = match self.value.as_ref() {
            Some(value) if !self.was_null => (
                format!(
                    "{} ({})",
                    rt.describe(value),
                    rt.type_name(self.display_type())
                ),
                Tone::Plain,
            ),
            _ => (
                format!("null ({})", rt.type_name(self.declared)),
                Tone::Muted,
            ),
        };

        Some(Label {
            text: format!("{prefix}{body}"),
            tone,
        })
    }

    fn label_or_null(&self) -> Label {
        self.value_label
            .clone()
            .unwrap_or_else(|| Label::muted("null"))
    }

    fn input_text(&self, rt: &dyn Runtime) -> String {
        self.value
            .as_ref()
            .map(|value| rt.format(value, self.display_type()))
            .unwrap_or_default()
    }

    /// Build the closed render state for the current category.
    pub fn rendering(&self, rt: &dyn Runtime, _options: &SessionOptions) -> Rendering {
        let type_label = rt.type_name(self.display_type()).to_string();

        match self.category {
            Category::NotEvaluated => Rendering::NotEvaluated {
                placeholder: self.label_or_null(),
            },

            Category::Exception => Rendering::Exception {
                message: self.label_or_null(),
            },

            Category::Boolean => Rendering::Boolean {
                value: self
                    .value
                    .as_ref()
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
                writable: self.writable,
            },

            Category::Number => Rendering::Number {
                input: self.input_text(rt),
                type_label,
                writable: self.writable,
            },

            // Strings stay expandable even when null so a fresh value
            // can be authored through the text editor.
            Category::String => Rendering::String {
                preview: self.label_or_null(),
                expandable: true,
            },

            Category::Enum => Rendering::Enum {
                label: self.label_or_null(),
                expandable: self.writable,
            },

            Category::Color => Rendering::Color {
                input: self.input_text(rt),
                type_label,
                writable: self.writable,
                expandable: true,
            },

            Category::ValueStruct => {
                if rt.can_parse(self.display_type()) {
                    Rendering::ValueStruct {
                        input: Some(self.input_text(rt)),
                        label: None,
                        type_label,
                        writable: self.writable,
                        inspectable: !self.was_null,
                        expandable: true,
                    }
                } else {
                    Rendering::ValueStruct {
                        input: None,
                        label: Some(self.label_or_null()),
                        type_label,
                        writable: false,
                        inspectable: !self.was_null,
                        expandable: true,
                    }
                }
            }

            Category::Collection => Rendering::Collection {
                label: self.label_or_null(),
                inspectable: !self.was_null,
                expandable: !self.was_null,
            },

            Category::Dictionary => Rendering::Dictionary {
                label: self.label_or_null(),
                inspectable: !self.was_null,
                expandable: !self.was_null,
            },

            Category::Unsupported => Rendering::Unsupported {
                label: self.label_or_null(),
                inspectable: !self.was_null,
            },
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Container member access
// ═══════════════════════════════════════════════════════════════════

/// Read a member out of a container value.
pub fn read_member(container: &Value, member: &Member) -> Result<Value, AccessError> {
    match (container, member) {
        (Value::Struct(s), Member::Field(name)) => {
            s.fields
                .get(name)
                .cloned()
                .ok_or_else(|| AccessError::MissingField {
                    field: name.clone(),
                    type_name: s.type_name.clone(),
                })
        }

        (Value::Color(c), Member::Field(name)) => match name.as_str() {
            "r" => Ok(Value::F32(c.r)),
            "g" => Ok(Value::F32(c.g)),
            "b" => Ok(Value::F32(c.b)),
            "a" => Ok(Value::F32(c.a)),
            _ => Err(AccessError::MissingField {
                field: name.clone(),
                type_name: "Color".to_string(),
            }),
        },

        (Value::List(items), Member::Index(i)) => {
            items
                .get(*i)
                .cloned()
                .ok_or_else(|| AccessError::IndexOutOfBounds {
                    index: *i,
                    len: items.len(),
                })
        }

        (Value::Map(map), Member::Key(key)) => {
            map.get(key).cloned().ok_or_else(|| AccessError::KeyNotFound {
                key: key.0.to_string(),
            })
        }

        _ => Err(AccessError::NotAContainer {
            type_name: container.kind_name().to_string(),
        }),
    }
}

/// Write a member of a container value in place.
///
/// Payloads are Arc-shared; writes copy-on-write through `Arc::make_mut`,
/// so other holders of the same payload are unaffected. Only existing
/// members can be written; this never grows a container.
pub fn write_member(
    container: &mut Value,
    member: &Member,
    value: Value,
) -> Result<(), AccessError> {
    match (container, member) {
        (Value::Struct(s), Member::Field(name)) => {
            let s = Arc::make_mut(s);
            match s.fields.get_mut(name) {
                Some(field) => {
                    *field = value;
                    Ok(())
                }
                None => Err(AccessError::MissingField {
                    field: name.clone(),
                    type_name: s.type_name.clone(),
                }),
            }
        }

        (Value::Color(c), Member::Field(name)) => {
            let channel = value.as_f64().map(|f| f as f32).unwrap_or_default();
            match name.as_str() {
                "r" => c.r = channel,
                "g" => c.g = channel,
                "b" => c.b = channel,
                "a" => c.a = channel,
                _ => {
                    return Err(AccessError::MissingField {
                        field: name.clone(),
                        type_name: "Color".to_string(),
                    })
                }
            }
            Ok(())
        }

        (Value::List(items), Member::Index(i)) => {
            let len = items.len();
            if *i >= len {
                return Err(AccessError::IndexOutOfBounds { index: *i, len });
            }
            Arc::make_mut(items)[*i] = value;
            Ok(())
        }

        (Value::Map(map), Member::Key(key)) => {
            match Arc::make_mut(map).get_mut(key) {
                Some(entry) => {
                    *entry = value;
                    Ok(())
                }
                None => Err(AccessError::KeyNotFound {
                    key: key.0.to_string(),
                }),
            }
        }

        (container, _) => Err(AccessError::NotAContainer {
            type_name: container.kind_name().to_string(),
        }),
    }
}
