//! Authoritative write-back seam and an in-memory store

use indexmap::IndexMap;
use tracing::warn;

use crate::record::Member;
use crate::reflect::TypeId;
use crate::value::{ObjectRef, Value};

/// The owning collaborator that performs the mechanical write.
///
/// The engine never writes a field itself; it hands the parsed, coerced
/// value to the store and degrades gracefully when the store declines.
/// Read-only targets return `false` rather than raising.
pub trait Store {
    /// Write a member of the target, returning whether it applied
    fn try_write(&mut self, target: &Value, member: &Member, value: Value) -> bool;
}

struct StoredObject {
    handle: ObjectRef,
    fields: IndexMap<String, Value>,
    read_only: Vec<String>,
}

/// An in-memory store of id-keyed objects with per-field writability
/// and destroy semantics.
///
/// Destroying an object flips the shared liveness flag on every
/// outstanding reference; the object's storage stays behind as a
/// tombstone so stale reads fail soft.
#[derive(Default)]
pub struct MemoryStore {
    objects: IndexMap<u64, StoredObject>,
    next_id: u64,
    writes: usize,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an object of the given type, returning its reference value
    pub fn spawn(&mut self, ty: TypeId, name: impl Into<String>) -> Value {
        let id = self.next_id;
        self.next_id += 1;
        let handle = ObjectRef::new(ty, id, name);
        self.objects.insert(
            id,
            StoredObject {
                handle: handle.clone(),
                fields: IndexMap::new(),
                read_only: Vec::new(),
            },
        );
        Value::Object(handle)
    }

    /// Destroy the target object; all outstanding references observe it
    pub fn destroy(&mut self, target: &Value) -> bool {
        match self.entry_of(target) {
            Some(entry) => {
                entry.handle.destroy();
                true
            }
            None => false,
        }
    }

    /// Define or overwrite a field directly (host-side seeding)
    pub fn set_field(&mut self, target: &Value, name: impl Into<String>, value: Value) -> bool {
        match self.entry_of_mut(target) {
            Some(entry) => {
                entry.fields.insert(name.into(), value);
                true
            }
            None => false,
        }
    }

    /// Read a field of the target object
    pub fn field(&self, target: &Value, name: &str) -> Option<Value> {
        self.entry_of(target)
            .and_then(|entry| entry.fields.get(name))
            .cloned()
    }

    /// Reject future engine writes to this field
    pub fn mark_read_only(&mut self, target: &Value, field: impl Into<String>) -> bool {
        match self.entry_of_mut(target) {
            Some(entry) => {
                entry.read_only.push(field.into());
                true
            }
            None => false,
        }
    }

    /// Number of writes applied through `try_write`
    pub fn write_count(&self) -> usize {
        self.writes
    }

    fn entry_of(&self, target: &Value) -> Option<&StoredObject> {
        target.as_object().and_then(|o| self.objects.get(&o.id))
    }

    fn entry_of_mut(&mut self, target: &Value) -> Option<&mut StoredObject> {
        target
            .as_object()
            .and_then(|o| self.objects.get_mut(&o.id))
    }
}

impl Store for MemoryStore {
    fn try_write(&mut self, target: &Value, member: &Member, value: Value) -> bool {
        let Some(handle) = target.as_object() else {
            warn!(kind = target.kind_name(), "write target is not a store object");
            return false;
        };
        if !handle.is_alive() {
            warn!(object = %handle.name, "write target was destroyed");
            return false;
        }
        let Member::Field(name) = member else {
            warn!(%member, "store writes are field-granular");
            return false;
        };
        let Some(entry) = self.objects.get_mut(&handle.id) else {
            warn!(object = %handle.name, "write target unknown to this store");
            return false;
        };
        if entry.read_only.iter().any(|f| f == name) {
            warn!(object = %handle.name, field = %name, "field is read-only");
            return false;
        }
        if !entry.fields.contains_key(name) {
            warn!(object = %handle.name, field = %name, "no such field");
            return false;
        }
        entry.fields.insert(name.clone(), value);
        self.writes += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Shape, TypeRegistry};

    fn player_setup() -> (MemoryStore, Value) {
        let mut reg = TypeRegistry::new();
        let player_ty = reg.register_object("Player", Shape::default());
        let mut store = MemoryStore::new();
        let player = store.spawn(player_ty, "player_one");
        store.set_field(&player, "health", Value::I32(100));
        (store, player)
    }

    #[test]
    fn test_write_applies_to_known_field() {
        let (mut store, player) = player_setup();
        let ok = store.try_write(&player, &Member::Field("health".into()), Value::I32(50));
        assert!(ok);
        assert_eq!(store.field(&player, "health"), Some(Value::I32(50)));
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn test_write_rejected_for_unknown_field() {
        let (mut store, player) = player_setup();
        let ok = store.try_write(&player, &Member::Field("mana".into()), Value::I32(5));
        assert!(!ok);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_write_rejected_for_read_only_field() {
        let (mut store, player) = player_setup();
        store.mark_read_only(&player, "health");
        let ok = store.try_write(&player, &Member::Field("health".into()), Value::I32(1));
        assert!(!ok);
        assert_eq!(store.field(&player, "health"), Some(Value::I32(100)));
    }

    #[test]
    fn test_write_rejected_after_destroy() {
        let (mut store, player) = player_setup();
        assert!(store.destroy(&player));
        let ok = store.try_write(&player, &Member::Field("health".into()), Value::I32(1));
        assert!(!ok);
    }

    #[test]
    fn test_destroy_visible_through_reference() {
        let (mut store, player) = player_setup();
        let clone = player.clone();
        store.destroy(&player);
        assert!(!clone.as_object().unwrap().is_alive());
    }
}
