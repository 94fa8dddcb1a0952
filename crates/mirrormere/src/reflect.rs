//! Type handles and the reflection collaborator seam

use crate::codec::Codec;
use crate::value::Value;

/// A typed handle to a registered type.
///
/// Handles are only meaningful against the registry that produced them;
/// they are plain indices, never borrowed data, so records can cache them
/// freely across evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(u32);

impl TypeId {
    /// Create a handle from a raw index
    pub(crate) fn new(raw: u32) -> Self {
        TypeId(raw)
    }

    /// The raw index
    pub(crate) fn raw(self) -> u32 {
        self.0
    }
}

/// The reflection capabilities the engine consumes.
///
/// These are shape questions about types and values: the classifier asks
/// them in a fixed order, and the record machinery uses `runtime_type`,
/// `coerce`, and `is_alive` around evaluation and write-back. The engine
/// never inspects types directly; everything goes through this trait.
pub trait Reflection {
    /// The display name of a type
    fn type_name(&self, ty: TypeId) -> &str;

    /// Find a registered type by name
    fn lookup(&self, name: &str) -> Option<TypeId>;

    /// The runtime type of a value
    fn runtime_type(&self, value: &Value) -> TypeId;

    /// Whether the type is `bool`
    fn is_bool(&self, ty: TypeId) -> bool;

    /// Whether the type is a single-token input primitive: a numeric
    /// type, `char`, or the arbitrary-precision decimal
    fn is_numeric(&self, ty: TypeId) -> bool;

    /// Whether the type is `string`
    fn is_string(&self, ty: TypeId) -> bool;

    /// Whether the type is a registered enumeration
    fn is_enum(&self, ty: TypeId) -> bool;

    /// Whether the type is color-like
    fn is_color(&self, ty: TypeId) -> bool;

    /// Whether the type is a value struct whose flat text form
    /// round-trips through the codec
    fn is_parseable_struct(&self, ty: TypeId) -> bool;

    /// Whether the type is a keyed associative container
    fn is_dictionary_shaped(&self, ty: TypeId) -> bool;

    /// Whether the type is enumerable
    fn is_enumerable_shaped(&self, ty: TypeId) -> bool;

    /// Whether the type is a hierarchical scene-graph node.
    ///
    /// Scene nodes are enumerable (over their children) but must not be
    /// classified as data collections.
    fn is_scene_node(&self, ty: TypeId) -> bool;

    /// The constant names of an enumeration type; empty for other types
    fn variant_names(&self, ty: TypeId) -> &[String];

    /// Convert a value to the given type where a lossless-enough
    /// conversion exists; returns the value unchanged otherwise
    fn coerce(&self, value: Value, ty: TypeId) -> Value;

    /// Short display text for a value, used when building value labels
    fn describe(&self, value: &Value) -> String;

    /// Whether a value is still usable.
    ///
    /// Liveness goes beyond reference-nullity: a present object reference
    /// whose store-side object was destroyed is dead.
    fn is_alive(&self, value: &Value) -> bool {
        match value {
            Value::Object(o) => o.is_alive(),
            _ => true,
        }
    }
}

/// The full collaborator surface the engine operates against.
///
/// One registry object usually implements both halves.
pub trait Runtime: Reflection + Codec {}

impl<T: Reflection + Codec + ?Sized> Runtime for T {}
