//! Hashable wrapper for Value to enable use as map keys

use std::hash::{Hash, Hasher};

use super::Value;

/// A wrapper for Value that implements Hash and Eq.
///
/// Only primitive types and strings can be used as keys.
/// Attempting to hash a non-hashable type will panic.
#[derive(Debug, Clone)]
pub struct MapKey(pub Value);

impl MapKey {
    /// Check if a value can be used as a map key
    pub fn is_hashable(value: &Value) -> bool {
        matches!(
            value,
            Value::Bool(_)
                | Value::Char(_)
                | Value::I8(_)
                | Value::I16(_)
                | Value::I32(_)
                | Value::I64(_)
                | Value::I128(_)
                | Value::Isize(_)
                | Value::U8(_)
                | Value::U16(_)
                | Value::U32(_)
                | Value::U64(_)
                | Value::U128(_)
                | Value::Usize(_)
                | Value::String(_)
        )
    }
}

impl Hash for MapKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Hash the discriminant first
        std::mem::discriminant(&self.0).hash(state);

        match &self.0 {
            Value::Bool(b) => b.hash(state),
            Value::Char(c) => c.hash(state),
            Value::I8(n) => n.hash(state),
            Value::I16(n) => n.hash(state),
            Value::I32(n) => n.hash(state),
            Value::I64(n) => n.hash(state),
            Value::I128(n) => n.hash(state),
            Value::Isize(n) => n.hash(state),
            Value::U8(n) => n.hash(state),
            Value::U16(n) => n.hash(state),
            Value::U32(n) => n.hash(state),
            Value::U64(n) => n.hash(state),
            Value::U128(n) => n.hash(state),
            Value::Usize(n) => n.hash(state),
            Value::String(s) => s.hash(state),
            // Floats and compound types panic - check is_hashable first
            _ => panic!("Attempted to hash non-hashable Value: {:?}", self.0),
        }
    }
}

impl PartialEq for MapKey {
    fn eq(&self, other: &Self) -> bool {
        // Delegate to Value's PartialEq
        self.0 == other.0
    }
}

impl Eq for MapKey {}

impl From<&str> for MapKey {
    fn from(s: &str) -> Self {
        MapKey(Value::string(s))
    }
}

impl From<i64> for MapKey {
    fn from(n: i64) -> Self {
        MapKey(Value::I64(n))
    }
}
