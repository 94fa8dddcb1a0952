//! References to foreign, store-owned objects

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::reflect::TypeId;

/// A non-owning reference to an object that lives in the store.
///
/// The liveness flag is shared with the store: destroying the object flips
/// the flag for every outstanding reference, so a reference can be present
/// yet dead. This models engine-style "fake null" semantics, where a
/// destroyed object still compares non-null.
#[derive(Clone)]
pub struct ObjectRef {
    /// The object's registered type
    pub type_id: TypeId,

    /// Store-assigned numeric identity
    pub id: u64,

    /// Display name
    pub name: Arc<String>,

    /// Shared tombstone flag, true while the object is alive
    alive: Arc<AtomicBool>,
}

impl ObjectRef {
    /// Create a live object reference
    pub fn new(type_id: TypeId, id: u64, name: impl Into<String>) -> Self {
        Self {
            type_id,
            id,
            name: Arc::new(name.into()),
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Whether the underlying object still exists
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Relaxed)
    }

    /// Mark the underlying object as destroyed.
    ///
    /// Every clone of this reference observes the change.
    pub fn destroy(&self) {
        self.alive.store(false, Ordering::Relaxed);
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        // Identity comparison; a dead object is still the same object.
        self.type_id == other.type_id && self.id == other.id
    }
}

impl Eq for ObjectRef {}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_alive() {
            write!(f, "<{} #{}>", self.name, self.id)
        } else {
            write!(f, "<destroyed {} #{}>", self.name, self.id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destroy_is_visible_through_clones() {
        let original = ObjectRef::new(TypeId::new(0), 1, "Player");
        let clone = original.clone();
        assert!(clone.is_alive());

        original.destroy();
        assert!(!clone.is_alive());
    }

    #[test]
    fn test_equality_survives_destruction() {
        let a = ObjectRef::new(TypeId::new(0), 7, "Enemy");
        let b = a.clone();
        a.destroy();
        assert_eq!(a, b);
    }
}
