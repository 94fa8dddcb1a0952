//! The inspection session: record arena, editor pool, and all operations

use tracing::{debug, warn};

use crate::editor::EditorKind;
use crate::error::{ApplyResult, EvalFailure};
use crate::pool::EditorPool;
use crate::record::{read_member, write_member, Member, Origin, Record, RecordSpec};
use crate::reflect::{Runtime, TypeId};
use crate::slot::DisplaySlot;
use crate::store::Store;
use crate::value::Value;

/// A generational handle to a record in a session.
///
/// Handles stay cheap to copy and safe to hold across removals: a handle
/// whose slot was reused observes a generation mismatch, and every
/// operation on it becomes a logged no-op instead of touching an
/// unrelated record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId {
    index: u32,
    generation: u32,
}

/// Presentation knobs shared by every record in a session.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    /// Character cap for string previews before the ellipsis
    pub string_preview_len: usize,
    /// Whether string previews are wrapped in quotes
    pub quote_strings: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            string_preview_len: 200,
            quote_strings: true,
        }
    }
}

struct Entry {
    generation: u32,
    record: Option<Record>,
}

/// A set of inspected-value records sharing one editor pool.
///
/// All engine operations go through the session so the arena, the pool,
/// and the injected collaborators stay coherent. Operations never raise;
/// failures degrade to display states or logged diagnostics.
pub struct Session {
    entries: Vec<Entry>,
    free: Vec<u32>,
    pool: EditorPool,
    options: SessionOptions,
}

fn entry_record(entries: &[Entry], id: RecordId) -> Option<&Record> {
    entries
        .get(id.index as usize)
        .filter(|e| e.generation == id.generation)
        .and_then(|e| e.record.as_ref())
}

fn entry_record_mut(entries: &mut [Entry], id: RecordId) -> Option<&mut Record> {
    entries
        .get_mut(id.index as usize)
        .filter(|e| e.generation == id.generation)
        .and_then(|e| e.record.as_mut())
}

impl Session {
    /// Create a session with default presentation options
    pub fn new() -> Self {
        Self::with_options(SessionOptions::default())
    }

    /// Create a session with explicit presentation options
    pub fn with_options(options: SessionOptions) -> Self {
        Self {
            entries: Vec::new(),
            free: Vec::new(),
            pool: EditorPool::new(),
            options,
        }
    }

    /// The presentation options in effect
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// The session's editor pool
    pub fn pool(&self) -> &EditorPool {
        &self.pool
    }

    /// Number of live records
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.record.is_some()).count()
    }

    /// Whether the session holds no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the handle still points at a live record
    pub fn contains(&self, id: RecordId) -> bool {
        entry_record(&self.entries, id).is_some()
    }

    /// Read access to a record
    pub fn record(&self, id: RecordId) -> Option<&Record> {
        entry_record(&self.entries, id)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Record lifecycle
    // ═══════════════════════════════════════════════════════════════════

    /// Add a top-level record to the session
    pub fn create(&mut self, spec: RecordSpec, rt: &dyn Runtime) -> RecordId {
        self.insert(Record::new(spec, None, rt, &self.options))
    }

    /// Add a nested record tracking one member of the parent's container
    /// copy. The child's first value is read out of the parent
    /// immediately.
    pub fn add_child(
        &mut self,
        parent: RecordId,
        member: Member,
        spec: RecordSpec,
        rt: &dyn Runtime,
    ) -> Option<RecordId> {
        if !self.contains(parent) {
            warn!("cannot nest under a removed record");
            return None;
        }
        let spec = spec.with_origin(Origin::Parent { member });
        let id = self.insert(Record::new(spec, Some(parent), rt, &self.options));
        self.refresh_from_parent(id, rt);
        Some(id)
    }

    fn insert(&mut self, record: Record) -> RecordId {
        match self.free.pop() {
            Some(index) => {
                let entry = &mut self.entries[index as usize];
                entry.record = Some(record);
                RecordId {
                    index,
                    generation: entry.generation,
                }
            }
            None => {
                let index = self.entries.len() as u32;
                self.entries.push(Entry {
                    generation: 0,
                    record: Some(record),
                });
                RecordId {
                    index,
                    generation: 0,
                }
            }
        }
    }

    /// Release a record's pooled and bound resources while keeping the
    /// record itself (the scroll-out path). Returns the unbound display
    /// slot so the caller can rebind it elsewhere.
    pub fn release(&mut self, id: RecordId) -> Option<Box<dyn DisplaySlot>> {
        let Self { entries, pool, .. } = self;
        let record = entry_record_mut(entries, id)?;
        record.release_editor(pool);
        if record.is_expanded() {
            record.toggle_expanded();
        }
        record.unbind()
    }

    /// Remove a record, returning its editor to the pool and releasing
    /// its display binding. The handle and any copies of it go stale.
    pub fn remove(&mut self, id: RecordId) -> bool {
        let Self {
            entries,
            free,
            pool,
            ..
        } = self;
        let Some(record) = entry_record_mut(entries, id) else {
            return false;
        };
        record.release_editor(pool);
        drop(record.unbind());

        let entry = &mut entries[id.index as usize];
        entry.record = None;
        entry.generation = entry.generation.wrapping_add(1);
        free.push(id.index);
        true
    }

    // ═══════════════════════════════════════════════════════════════════
    // Evaluation
    // ═══════════════════════════════════════════════════════════════════

    /// Push an evaluation outcome into the record.
    ///
    /// This is the only path that assigns a record's value. Returns
    /// false when the handle is stale.
    pub fn evaluate(
        &mut self,
        id: RecordId,
        outcome: Result<Option<Value>, EvalFailure>,
        rt: &dyn Runtime,
    ) -> bool {
        let Self {
            entries,
            pool,
            options,
            ..
        } = self;
        let Some(record) = entry_record_mut(entries, id) else {
            warn!("evaluate on a stale record handle");
            return false;
        };
        record.evaluate(outcome, rt, pool, options);
        record.render(rt, options);
        true
    }

    /// Re-read a nested record's member out of its parent's container.
    pub fn refresh_from_parent(&mut self, id: RecordId, rt: &dyn Runtime) -> bool {
        let outcome = {
            let Some(record) = entry_record(&self.entries, id) else {
                return false;
            };
            let Origin::Parent { member } = record.origin().clone() else {
                warn!(record = record.name(), "record has no parent origin");
                return false;
            };
            match record
                .parent()
                .and_then(|pid| entry_record(&self.entries, pid))
                .and_then(Record::value)
            {
                Some(container) => match read_member(container, &member) {
                    Ok(value) => Ok(Some(value)),
                    Err(err) => Err(EvalFailure::new(err.to_string())),
                },
                None => Ok(None),
            }
        };
        self.evaluate(id, outcome, rt)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Edits
    // ═══════════════════════════════════════════════════════════════════

    /// Parse edit text against the record's display type and commit it.
    ///
    /// On a parse failure the value is untouched and the display is
    /// re-rendered from the real value, reverting whatever the user
    /// typed.
    pub fn request_edit(
        &mut self,
        id: RecordId,
        text: &str,
        rt: &dyn Runtime,
        store: &mut dyn Store,
    ) -> ApplyResult {
        let display_ty = {
            let Some(record) = entry_record(&self.entries, id) else {
                warn!("edit on a stale record handle");
                return ApplyResult::StaleRecord;
            };
            record.display_type()
        };

        match rt.try_parse(text, display_ty) {
            Ok(value) => self.set_user_value(id, value, rt, store),
            Err(err) => {
                warn!(%err, text, "edit text rejected");
                self.render(id, rt);
                ApplyResult::ParseRejected
            }
        }
    }

    /// Commit a value to the record and cascade it to the owning
    /// storage.
    ///
    /// The value is coerced to the record's display type and handed to
    /// the origin: store-backed records write through the store, nested
    /// records write into the parent's container copy and then commit
    /// the whole container one level up, repeating until a store-backed
    /// or detached ancestor is reached. A read-only record skips its
    /// local write but the parent chain still commits, so an edited
    /// ancestor container always reaches storage. A record whose
    /// container copy would otherwise go stale re-evaluates along the
    /// way.
    pub fn set_user_value(
        &mut self,
        id: RecordId,
        value: Value,
        rt: &dyn Runtime,
        store: &mut dyn Store,
    ) -> ApplyResult {
        let mut current = id;
        let mut incoming = value;
        let mut outcome = ApplyResult::Applied;
        let mut leaf = true;

        loop {
            let (display_ty, origin, parent, writable) = {
                let Some(record) = entry_record(&self.entries, current) else {
                    if leaf {
                        warn!("commit on a stale record handle");
                        return ApplyResult::StaleRecord;
                    }
                    return outcome;
                };
                (
                    record.display_type(),
                    record.origin().clone(),
                    record.parent(),
                    record.is_writable(),
                )
            };

            let coerced = rt.coerce(incoming, display_ty);
            let mut applied = writable;
            let mut next: Option<(RecordId, Value)> = None;

            if !writable {
                debug!("record is read-only, skipping the local write");
                if leaf {
                    outcome = ApplyResult::WriteRejected;
                }
            }

            match origin {
                Origin::Store { target, member } => {
                    if writable && !store.try_write(&target, &member, coerced.clone()) {
                        applied = false;
                        if leaf {
                            outcome = ApplyResult::WriteRejected;
                        }
                    }
                }

                Origin::Parent { member } => {
                    match parent
                        .and_then(|pid| entry_record_mut(&mut self.entries, pid))
                        .and_then(Record::container_mut)
                    {
                        Some(container) => {
                            if writable {
                                if let Err(err) = write_member(container, &member, coerced.clone())
                                {
                                    warn!(%err, "parent container rejected the write");
                                    applied = false;
                                    if leaf {
                                        outcome = ApplyResult::WriteRejected;
                                    }
                                }
                            }
                            // The parent commits its whole container copy
                            // either way; a value-type copy edited in place
                            // never reaches the original storage on its own.
                            next = parent.map(|pid| (pid, container.clone()));
                        }
                        None => {
                            warn!("nested record has no evaluated parent container");
                            applied = false;
                            if leaf {
                                outcome = ApplyResult::WriteRejected;
                            }
                        }
                    }
                }

                Origin::Detached => {}
            }

            {
                let Self {
                    entries,
                    pool,
                    options,
                    ..
                } = self;
                if let Some(record) = entry_record_mut(entries, current) {
                    if applied {
                        record.evaluate(Ok(Some(coerced)), rt, pool, options);
                    }
                    record.render(rt, options);
                }
            }

            match next {
                Some((pid, container)) => {
                    current = pid;
                    incoming = container;
                    leaf = false;
                }
                None => return outcome,
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Nested editors
    // ═══════════════════════════════════════════════════════════════════

    /// Show or hide the record's nested editor.
    ///
    /// First show borrows an editor from the pool for the record's
    /// category; categories with no editor kind make this a no-op.
    /// Re-showing a collapsed editor flushes any refresh that was
    /// deferred while it was hidden.
    pub fn toggle_nested(&mut self, id: RecordId, rt: &dyn Runtime) {
        let Self {
            entries,
            pool,
            options,
            ..
        } = self;
        let Some(record) = entry_record_mut(entries, id) else {
            warn!("toggle on a stale record handle");
            return;
        };

        if record.editor().is_none() {
            // The value may have gone stale since the last evaluation
            record.reprocess(rt, pool, options);
            let Some(kind) = EditorKind::for_category(record.category()) else {
                debug!(category = ?record.category(), "category has no nested editor");
                return;
            };
            let editor = pool.borrow(kind);
            record.attach_editor(editor);
            record.push_value_into_editor(rt);
            record.clear_pending_refresh();
        } else {
            record.toggle_expanded();
            if record.is_expanded() && record.pending_refresh() {
                record.reprocess(rt, pool, options);
                record.push_value_into_editor(rt);
                record.clear_pending_refresh();
            }
        }
        record.render(rt, options);
    }

    /// Detach the record's editor and return it to the pool.
    pub fn release_editor(&mut self, id: RecordId, rt: &dyn Runtime) {
        let Self {
            entries,
            pool,
            options,
            ..
        } = self;
        let Some(record) = entry_record_mut(entries, id) else {
            return;
        };
        record.release_editor(pool);
        if record.is_expanded() {
            record.toggle_expanded();
        }
        record.render(rt, options);
    }

    // ═══════════════════════════════════════════════════════════════════
    // Display binding
    // ═══════════════════════════════════════════════════════════════════

    /// Bind a display slot to the record and render into it.
    ///
    /// Returns the previously bound slot when one is displaced. A stale
    /// handle hands the slot straight back.
    pub fn bind(
        &mut self,
        id: RecordId,
        slot: Box<dyn DisplaySlot>,
        rt: &dyn Runtime,
    ) -> Result<Option<Box<dyn DisplaySlot>>, Box<dyn DisplaySlot>> {
        let Self {
            entries, options, ..
        } = self;
        let Some(record) = entry_record_mut(entries, id) else {
            warn!("bind on a stale record handle");
            return Err(slot);
        };
        let displaced = record.bind(slot);
        record.render(rt, options);
        Ok(displaced)
    }

    /// Break the record's display binding, returning the slot.
    ///
    /// The editor stays attached (inert) so it remains recoverable.
    pub fn unbind(&mut self, id: RecordId) -> Option<Box<dyn DisplaySlot>> {
        entry_record_mut(&mut self.entries, id).and_then(Record::unbind)
    }

    /// Push the record's current state into its bound slot, if any.
    pub fn render(&mut self, id: RecordId, rt: &dyn Runtime) {
        let Self {
            entries, options, ..
        } = self;
        if let Some(record) = entry_record_mut(entries, id) {
            record.render(rt, options);
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Type adjustments
    // ═══════════════════════════════════════════════════════════════════

    /// Replace the record's fallback static type.
    ///
    /// Classification memoization is keyed on observed runtime types, so
    /// the next evaluation picks this up without a forced reset.
    pub fn set_declared_type(&mut self, id: RecordId, ty: TypeId, rt: &dyn Runtime) {
        let Self {
            entries, options, ..
        } = self;
        if let Some(record) = entry_record_mut(entries, id) {
            record.set_declared(ty, rt, options);
            record.render(rt, options);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::reflect::Reflection;
    use crate::registry::TypeRegistry;

    fn i32_spec(reg: &TypeRegistry) -> RecordSpec {
        RecordSpec::new("count", reg.lookup("i32").unwrap())
    }

    #[test]
    fn test_create_starts_not_evaluated() {
        let reg = TypeRegistry::new();
        let mut session = Session::new();
        let id = session.create(i32_spec(&reg), &reg);

        let record = session.record(id).unwrap();
        assert_eq!(record.category(), Category::NotEvaluated);
        assert!(record.value().is_none());
    }

    #[test]
    fn test_evaluate_classifies() {
        let reg = TypeRegistry::new();
        let mut session = Session::new();
        let id = session.create(i32_spec(&reg), &reg);

        assert!(session.evaluate(id, Ok(Some(Value::I32(7))), &reg));
        assert_eq!(session.record(id).unwrap().category(), Category::Number);
    }

    #[test]
    fn test_stale_handle_is_a_no_op() {
        let reg = TypeRegistry::new();
        let mut session = Session::new();
        let id = session.create(i32_spec(&reg), &reg);
        assert!(session.remove(id));

        assert!(!session.contains(id));
        assert!(!session.evaluate(id, Ok(Some(Value::I32(1))), &reg));
        assert!(!session.remove(id));
    }

    #[test]
    fn test_slot_reuse_bumps_generation() {
        let reg = TypeRegistry::new();
        let mut session = Session::new();
        let first = session.create(i32_spec(&reg), &reg);
        session.remove(first);

        let second = session.create(i32_spec(&reg), &reg);
        assert_ne!(first, second);
        assert!(session.contains(second));
        assert!(!session.contains(first));
    }
}
