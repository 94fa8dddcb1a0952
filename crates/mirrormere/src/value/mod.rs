//! Value representation for inspected runtime values

mod compound;
mod display;
mod hashable;
mod impls;
mod refs;

pub use compound::{Color, EnumValue, StructValue};
pub use hashable::MapKey;
pub use refs::ObjectRef;

use std::sync::Arc;

use indexmap::IndexMap;
use rust_decimal::Decimal;

/// Dynamic value representation for the Mirrormere inspection engine.
///
/// Values are organized into two tiers:
/// - Tier 1: Inline primitives (no allocation)
/// - Tier 2: Heap-allocated compound types (Arc-wrapped, cheap to clone)
///
/// A cloned compound value shares its payload until mutated, which is what
/// makes the upward write-back cascade affordable: every level of the chain
/// hands a container copy to its parent without deep-copying.
#[derive(Clone)]
pub enum Value {
    // ═══════════════════════════════════════════════════════════════════
    // Tier 1: Inline Primitives
    // ═══════════════════════════════════════════════════════════════════
    /// Boolean: `true` or `false`
    Bool(bool),

    /// Unicode scalar value
    Char(char),

    // Signed integers
    /// 8-bit signed integer
    I8(i8),
    /// 16-bit signed integer
    I16(i16),
    /// 32-bit signed integer
    I32(i32),
    /// 64-bit signed integer (default integer type)
    I64(i64),
    /// 128-bit signed integer
    I128(i128),
    /// Pointer-sized signed integer
    Isize(isize),

    // Unsigned integers
    /// 8-bit unsigned integer
    U8(u8),
    /// 16-bit unsigned integer
    U16(u16),
    /// 32-bit unsigned integer
    U32(u32),
    /// 64-bit unsigned integer
    U64(u64),
    /// 128-bit unsigned integer
    U128(u128),
    /// Pointer-sized unsigned integer
    Usize(usize),

    // Floating point
    /// 32-bit floating point
    F32(f32),
    /// 64-bit floating point (default float type)
    F64(f64),

    /// Arbitrary-precision decimal
    Decimal(Decimal),

    /// Color-like value type, four `f32` channels
    Color(Color),

    // ═══════════════════════════════════════════════════════════════════
    // Tier 2: Heap-Allocated Compound Types
    // ═══════════════════════════════════════════════════════════════════
    /// Heap-allocated string
    String(Arc<String>),

    /// Named constant of a registered enumeration
    Enum(Arc<EnumValue>),

    /// Struct instance with named fields in declaration order
    Struct(Arc<StructValue>),

    /// Data collection with a known element count
    List(Arc<Vec<Value>>),

    /// Keyed associative container
    Map(Arc<IndexMap<MapKey, Value>>),

    /// Reference to a foreign object owned by the store.
    ///
    /// Carries a shared liveness flag, so "destroyed" is observable
    /// independent of reference-nullity.
    Object(ObjectRef),
}
