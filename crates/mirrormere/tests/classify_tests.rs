//! Tests for value classification and its memoization

use std::cell::Cell;

use mirrormere::registry::{Shape, TypeRegistry};
use mirrormere::*;

#[test]
fn test_classification_order() {
    let mut reg = TypeRegistry::new();
    let ty = |reg: &TypeRegistry, name: &str| reg.lookup(name).unwrap();

    assert_eq!(classify(&reg, ty(&reg, "bool")), Category::Boolean);
    assert_eq!(classify(&reg, ty(&reg, "i32")), Category::Number);
    assert_eq!(classify(&reg, ty(&reg, "char")), Category::Number);
    assert_eq!(classify(&reg, ty(&reg, "decimal")), Category::Number);
    assert_eq!(classify(&reg, ty(&reg, "string")), Category::String);
    assert_eq!(classify(&reg, ty(&reg, "Color")), Category::Color);

    let mode = reg.register_enum("BlendMode", vec!["Opaque".to_string()]);
    assert_eq!(classify(&reg, mode), Category::Enum);

    let f32_ty = ty(&reg, "f32");
    let vec2 = reg.register_struct(
        "Vec2",
        vec![("x".to_string(), f32_ty), ("y".to_string(), f32_ty)],
    );
    assert_eq!(classify(&reg, vec2), Category::ValueStruct);
}

#[test]
fn test_dictionary_takes_priority_over_collection() {
    let mut reg = TypeRegistry::new();

    // Both flags set; the dictionary rule runs first
    let lookup_table = reg.register_object(
        "LookupTable",
        Shape {
            dictionary: true,
            enumerable: true,
            ..Shape::default()
        },
    );
    assert_eq!(classify(&reg, lookup_table), Category::Dictionary);
}

#[test]
fn test_scene_node_is_not_a_collection() {
    let mut reg = TypeRegistry::new();
    let node = reg.register_object(
        "SceneNode",
        Shape {
            enumerable: true,
            scene_node: true,
            ..Shape::default()
        },
    );
    assert_eq!(classify(&reg, node), Category::Unsupported);

    // But a scene node that is also dictionary-shaped still classifies
    // as a dictionary, since that rule runs before the exclusion.
    let keyed_node = reg.register_object(
        "KeyedNode",
        Shape {
            dictionary: true,
            enumerable: true,
            scene_node: true,
        },
    );
    assert_eq!(classify(&reg, keyed_node), Category::Dictionary);
}

#[test]
fn test_plain_object_is_unsupported() {
    let mut reg = TypeRegistry::new();
    let audio = reg.register_object("AudioSource", Shape::default());
    assert_eq!(classify(&reg, audio), Category::Unsupported);
}

/// Wraps a registry and counts classifier runs (every classification
/// starts with the bool question).
struct CountingRuntime<'a> {
    inner: &'a TypeRegistry,
    probes: Cell<usize>,
}

impl<'a> CountingRuntime<'a> {
    fn new(inner: &'a TypeRegistry) -> Self {
        Self {
            inner,
            probes: Cell::new(0),
        }
    }
}

impl Reflection for CountingRuntime<'_> {
    fn type_name(&self, ty: TypeId) -> &str {
        self.inner.type_name(ty)
    }
    fn lookup(&self, name: &str) -> Option<TypeId> {
        self.inner.lookup(name)
    }
    fn runtime_type(&self, value: &Value) -> TypeId {
        self.inner.runtime_type(value)
    }
    fn is_bool(&self, ty: TypeId) -> bool {
        self.probes.set(self.probes.get() + 1);
        self.inner.is_bool(ty)
    }
    fn is_numeric(&self, ty: TypeId) -> bool {
        self.inner.is_numeric(ty)
    }
    fn is_string(&self, ty: TypeId) -> bool {
        self.inner.is_string(ty)
    }
    fn is_enum(&self, ty: TypeId) -> bool {
        self.inner.is_enum(ty)
    }
    fn is_color(&self, ty: TypeId) -> bool {
        self.inner.is_color(ty)
    }
    fn is_parseable_struct(&self, ty: TypeId) -> bool {
        self.inner.is_parseable_struct(ty)
    }
    fn is_dictionary_shaped(&self, ty: TypeId) -> bool {
        self.inner.is_dictionary_shaped(ty)
    }
    fn is_enumerable_shaped(&self, ty: TypeId) -> bool {
        self.inner.is_enumerable_shaped(ty)
    }
    fn is_scene_node(&self, ty: TypeId) -> bool {
        self.inner.is_scene_node(ty)
    }
    fn variant_names(&self, ty: TypeId) -> &[String] {
        self.inner.variant_names(ty)
    }
    fn coerce(&self, value: Value, ty: TypeId) -> Value {
        self.inner.coerce(value, ty)
    }
    fn describe(&self, value: &Value) -> String {
        self.inner.describe(value)
    }
}

impl Codec for CountingRuntime<'_> {
    fn can_parse(&self, ty: TypeId) -> bool {
        self.inner.can_parse(ty)
    }
    fn try_parse(&self, text: &str, ty: TypeId) -> Result<Value, ParseError> {
        self.inner.try_parse(text, ty)
    }
    fn format(&self, value: &Value, ty: TypeId) -> String {
        self.inner.format(value, ty)
    }
    fn example_text(&self, ty: TypeId) -> String {
        self.inner.example_text(ty)
    }
}

#[test]
fn test_classification_memoized_while_type_is_stable() {
    let reg = TypeRegistry::new();
    let counting = CountingRuntime::new(&reg);

    let mut session = Session::new();
    let id = session.create(
        RecordSpec::new("n", reg.lookup("i32").unwrap()),
        &counting,
    );
    assert_eq!(counting.probes.get(), 0);

    session.evaluate(id, Ok(Some(Value::I32(1))), &counting);
    assert_eq!(counting.probes.get(), 1);

    // Same runtime type: the cached category is reused
    session.evaluate(id, Ok(Some(Value::I32(2))), &counting);
    session.evaluate(id, Ok(Some(Value::I32(3))), &counting);
    assert_eq!(counting.probes.get(), 1);

    // The runtime type changed, so classification runs again
    session.evaluate(id, Ok(Some(Value::F64(1.0))), &counting);
    assert_eq!(counting.probes.get(), 2);
    assert_eq!(session.record(id).unwrap().category(), Category::Number);

    // And back
    session.evaluate(id, Ok(Some(Value::string("now a string"))), &counting);
    assert_eq!(counting.probes.get(), 3);
    assert_eq!(session.record(id).unwrap().category(), Category::String);
}

#[test]
fn test_category_follows_runtime_type_not_declared() {
    let mut reg = TypeRegistry::new();
    let base = reg.register_object("Component", Shape::default());

    let mut session = Session::new();
    let id = session.create(RecordSpec::new("component", base), &reg);

    // A string arrives behind an object-typed slot
    session.evaluate(id, Ok(Some(Value::string("actually text"))), &reg);
    assert_eq!(session.record(id).unwrap().category(), Category::String);

    // An absent value falls back to the declared type
    session.evaluate(id, Ok(None), &reg);
    assert_eq!(session.record(id).unwrap().category(), Category::Unsupported);
    assert!(session.record(id).unwrap().was_null());
}
