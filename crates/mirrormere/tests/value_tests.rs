//! Tests for the dynamic value model

use pretty_assertions::{assert_eq, assert_ne};

use mirrormere::*;

#[test]
fn test_primitive_values() {
    // Bool
    assert_eq!(Value::Bool(true), Value::Bool(true));
    assert_ne!(Value::Bool(true), Value::Bool(false));

    // Integers
    assert_eq!(Value::I64(42), Value::I64(42));
    assert_ne!(Value::I64(42), Value::I64(43));

    // Different integer types are not equal
    assert_ne!(Value::I32(42), Value::I64(42));

    // Floats
    assert_eq!(Value::F64(3.5), Value::F64(3.5));
    assert_ne!(Value::F32(3.5), Value::F64(3.5));
}

#[test]
fn test_string_values() {
    let s1 = Value::string("hello");
    let s2 = Value::string("hello");
    let s3 = Value::string("world");

    assert_eq!(s1, s2);
    assert_ne!(s1, s3);
    assert_eq!(s1.as_str(), Some("hello"));
    assert!(s1.is_string());
}

#[test]
fn test_list_values() {
    let list = Value::list(vec![Value::I64(1), Value::I64(2)]);
    assert_eq!(list.as_list().map(<[Value]>::len), Some(2));

    // Clones share the payload until one side writes
    let clone = list.clone();
    assert_eq!(list, clone);
}

#[test]
fn test_struct_values() {
    let v = StructValue::new("Vec2")
        .with_field("x", Value::F32(1.0))
        .with_field("y", Value::F32(2.0));
    assert_eq!(v.get("x"), Some(&Value::F32(1.0)));
    assert_eq!(v.get("z"), None);
    assert_eq!(v.len(), 2);

    let value = Value::structure(v);
    assert_eq!(value.as_struct().map(|s| s.type_name.as_str()), Some("Vec2"));
}

#[test]
fn test_enum_values() {
    let a = Value::enumeration(EnumValue::new("BlendMode", "Additive"));
    let b = Value::enumeration(EnumValue::new("BlendMode", "Additive"));
    let c = Value::enumeration(EnumValue::new("BlendMode", "Opaque"));

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.to_string(), "Additive");
}

#[test]
fn test_map_values() {
    let mut entries = indexmap::IndexMap::new();
    entries.insert(MapKey::from("hp"), Value::I64(10));
    entries.insert(MapKey::from("mp"), Value::I64(4));
    let map = Value::map(entries);

    // Insertion order is preserved through Debug
    assert_eq!(format!("{map:?}"), "{\"hp\": 10, \"mp\": 4}");
}

#[test]
fn test_map_keys_require_hashable_values() {
    assert!(MapKey::is_hashable(&Value::I64(1)));
    assert!(MapKey::is_hashable(&Value::string("k")));
    assert!(!MapKey::is_hashable(&Value::F64(1.0)));
    assert!(!MapKey::is_hashable(&Value::list(vec![])));
}

#[test]
fn test_object_identity_and_liveness() {
    let mut reg = TypeRegistry::new();
    let ty = reg.register_object("Player", registry::Shape::default());

    let a = ObjectRef::new(ty, 1, "player_one");
    let same = a.clone();
    let other = ObjectRef::new(ty, 2, "player_two");

    assert_eq!(a, same);
    assert_ne!(a, other);

    // Destroy is visible through every clone of the reference
    assert!(same.is_alive());
    a.destroy();
    assert!(!same.is_alive());
    assert!(other.is_alive());
}

#[test]
fn test_display_formatting() {
    assert_eq!(Value::string("hi").to_string(), "hi");
    assert_eq!(Value::Char('x').to_string(), "x");
    assert_eq!(Value::I64(7).to_string(), "7");
    assert_eq!(Value::I32(7).to_string(), "7i32");
    assert_eq!(format!("{:?}", Value::string("hi")), "\"hi\"");
    assert_eq!(
        format!("{:?}", Value::list(vec![Value::I64(1), Value::I64(2)])),
        "[1, 2]"
    );
}

#[test]
fn test_from_conversions() {
    assert_eq!(Value::from(true), Value::Bool(true));
    assert_eq!(Value::from(42i32), Value::I32(42));
    assert_eq!(Value::from("text"), Value::string("text"));
    assert_eq!(
        Value::from(vec![1i64, 2i64]),
        Value::list(vec![Value::I64(1), Value::I64(2)])
    );
}

#[test]
fn test_kind_names() {
    assert_eq!(Value::Bool(true).kind_name(), "bool");
    assert_eq!(Value::string("s").kind_name(), "string");
    assert_eq!(Value::list(vec![]).kind_name(), "list");
}
