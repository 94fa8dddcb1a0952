//! Tests for record evaluation, labels, and editor lifecycle

use mirrormere::registry::TypeRegistry;
use mirrormere::*;

fn string_record(session: &mut Session, reg: &TypeRegistry) -> RecordId {
    session.create(
        RecordSpec::new("label", reg.lookup("string").unwrap()),
        reg,
    )
}

#[test]
fn test_starts_not_evaluated_with_placeholder() {
    let reg = TypeRegistry::new();
    let mut session = Session::new();
    let id = string_record(&mut session, &reg);

    let record = session.record(id).unwrap();
    assert_eq!(record.category(), Category::NotEvaluated);
    let label = record.value_label().unwrap();
    assert_eq!(label.text, "Not yet evaluated (string)");
    assert_eq!(label.tone, Tone::Muted);
}

#[test]
fn test_number_renders_as_input_no_label() {
    let reg = TypeRegistry::new();
    let mut session = Session::new();
    let id = session.create(RecordSpec::new("count", reg.lookup("i32").unwrap()), &reg);
    session.evaluate(id, Ok(Some(Value::I32(42))), &reg);

    let record = session.record(id).unwrap();
    assert_eq!(record.category(), Category::Number);
    assert!(record.value_label().is_none());
    match record.rendering(&reg, session.options()) {
        Rendering::Number {
            input,
            type_label,
            writable,
        } => {
            assert_eq!(input, "42");
            assert_eq!(type_label, "i32");
            assert!(writable);
        }
        other => panic!("unexpected rendering: {other:?}"),
    }
}

#[test]
fn test_string_preview_quoted_and_pruned() {
    let reg = TypeRegistry::new();
    let mut session = Session::with_options(SessionOptions {
        string_preview_len: 8,
        quote_strings: true,
    });
    let id = string_record(&mut session, &reg);
    session.evaluate(id, Ok(Some(Value::string("a much longer text"))), &reg);

    let label = session.record(id).unwrap().value_label().unwrap();
    assert_eq!(label.text, "\"a much l...\"");
    assert_eq!(label.tone, Tone::Accent);
}

#[test]
fn test_null_string_keeps_editable_display() {
    let reg = TypeRegistry::new();
    let mut session = Session::new();
    let id = string_record(&mut session, &reg);
    session.evaluate(id, Ok(None), &reg);

    let record = session.record(id).unwrap();
    assert_eq!(record.category(), Category::String);
    assert!(record.was_null());
    assert_eq!(record.value_label().unwrap().text, "null (string)");

    // Still expandable so a fresh string can be authored
    match record.rendering(&reg, session.options()) {
        Rendering::String { expandable, .. } => assert!(expandable),
        other => panic!("unexpected rendering: {other:?}"),
    }
}

#[test]
fn test_null_string_keeps_its_editor() {
    let reg = TypeRegistry::new();
    let mut session = Session::new();
    let id = string_record(&mut session, &reg);
    session.evaluate(id, Ok(Some(Value::string("text"))), &reg);

    session.toggle_nested(id, &reg);
    assert_eq!(
        session.record(id).unwrap().editor_kind(),
        Some(EditorKind::Text)
    );

    // The value going null must not tear the text editor down
    session.evaluate(id, Ok(None), &reg);
    let record = session.record(id).unwrap();
    assert_eq!(record.editor_kind(), Some(EditorKind::Text));
    assert_eq!(record.editor().unwrap().buffer(), Some(""));
}

#[test]
fn test_category_change_releases_editor_to_pool() {
    let reg = TypeRegistry::new();
    let mut session = Session::new();
    let id = session.create(RecordSpec::new("items", reg.lookup("List").unwrap()), &reg);
    session.evaluate(id, Ok(Some(Value::list(vec![Value::I64(1)]))), &reg);

    session.toggle_nested(id, &reg);
    assert_eq!(
        session.record(id).unwrap().editor_kind(),
        Some(EditorKind::ListPager)
    );
    assert_eq!(session.pool().created(), 1);

    // The value shape changed underneath the record
    session.evaluate(id, Ok(Some(Value::I32(9))), &reg);

    let record = session.record(id).unwrap();
    assert_eq!(record.category(), Category::Number);
    assert!(record.editor().is_none());
    assert!(!record.is_expanded());
    assert_eq!(session.pool().idle_count(EditorKind::ListPager), 1);
}

#[test]
fn test_null_non_string_releases_editor() {
    let mut reg = TypeRegistry::new();
    let mode = reg.register_enum(
        "BlendMode",
        vec!["Opaque".to_string(), "Additive".to_string()],
    );

    let mut session = Session::new();
    let id = session.create(RecordSpec::new("mode", mode), &reg);
    session.evaluate(
        id,
        Ok(Some(Value::enumeration(EnumValue::new(
            "BlendMode", "Opaque",
        )))),
        &reg,
    );
    session.toggle_nested(id, &reg);
    assert!(session.record(id).unwrap().editor().is_some());

    session.evaluate(id, Ok(None), &reg);
    let record = session.record(id).unwrap();
    assert!(record.editor().is_none());
    assert_eq!(session.pool().idle_count(EditorKind::VariantPicker), 1);
}

#[test]
fn test_toggle_is_noop_for_number() {
    let reg = TypeRegistry::new();
    let mut session = Session::new();
    let id = session.create(RecordSpec::new("count", reg.lookup("i32").unwrap()), &reg);
    session.evaluate(id, Ok(Some(Value::I32(1))), &reg);

    session.toggle_nested(id, &reg);
    assert!(session.record(id).unwrap().editor().is_none());
    assert_eq!(session.pool().created(), 0);
}

#[test]
fn test_collapsed_editor_defers_refresh() {
    let reg = TypeRegistry::new();
    let mut session = Session::new();
    let id = string_record(&mut session, &reg);
    session.evaluate(id, Ok(Some(Value::string("first"))), &reg);

    session.toggle_nested(id, &reg);
    assert_eq!(
        session.record(id).unwrap().editor().unwrap().buffer(),
        Some("first")
    );

    // Collapse, then let a new value arrive
    session.toggle_nested(id, &reg);
    session.evaluate(id, Ok(Some(Value::string("second"))), &reg);
    let record = session.record(id).unwrap();
    assert!(record.pending_refresh());
    assert_eq!(record.editor().unwrap().buffer(), Some("first"));

    // Re-showing flushes the deferred refresh
    session.toggle_nested(id, &reg);
    let record = session.record(id).unwrap();
    assert!(!record.pending_refresh());
    assert_eq!(record.editor().unwrap().buffer(), Some("second"));
}

#[test]
fn test_expanded_editor_refreshes_immediately() {
    let reg = TypeRegistry::new();
    let mut session = Session::new();
    let id = string_record(&mut session, &reg);
    session.evaluate(id, Ok(Some(Value::string("first"))), &reg);
    session.toggle_nested(id, &reg);

    session.evaluate(id, Ok(Some(Value::string("second"))), &reg);
    let record = session.record(id).unwrap();
    assert!(!record.pending_refresh());
    assert_eq!(record.editor().unwrap().buffer(), Some("second"));
}

#[test]
fn test_exception_state_and_recovery() {
    let reg = TypeRegistry::new();
    let mut session = Session::new();
    let id = session.create(RecordSpec::new("prop", reg.lookup("i32").unwrap()), &reg);

    session.evaluate(id, Err(EvalFailure::new("getter threw: boom")), &reg);
    let record = session.record(id).unwrap();
    assert_eq!(record.category(), Category::Exception);
    assert!(record.had_exception());
    let label = record.value_label().unwrap();
    assert_eq!(label.text, "getter threw: boom");
    assert_eq!(label.tone, Tone::Error);

    // A later clean evaluation fully recovers
    session.evaluate(id, Ok(Some(Value::I32(5))), &reg);
    let record = session.record(id).unwrap();
    assert_eq!(record.category(), Category::Number);
    assert!(!record.had_exception());
    assert!(record.last_error().is_none());
}

#[test]
fn test_collection_label_carries_count() {
    let reg = TypeRegistry::new();
    let mut session = Session::new();
    let id = session.create(RecordSpec::new("items", reg.lookup("List").unwrap()), &reg);
    session.evaluate(
        id,
        Ok(Some(Value::list(vec![Value::I64(1), Value::I64(2)]))),
        &reg,
    );

    let label = session.record(id).unwrap().value_label().unwrap();
    assert!(label.text.starts_with("[2] "), "got: {}", label.text);
}

#[test]
fn test_unparsable_edit_leaves_value_untouched() {
    let reg = TypeRegistry::new();
    let mut store = MemoryStore::new();
    let mut session = Session::new();
    let id = session.create(RecordSpec::new("count", reg.lookup("i32").unwrap()), &reg);
    session.evaluate(id, Ok(Some(Value::I32(10))), &reg);

    let result = session.request_edit(id, "not a number", &reg, &mut store);
    assert_eq!(result, ApplyResult::ParseRejected);
    assert_eq!(session.record(id).unwrap().value(), Some(&Value::I32(10)));
}

#[test]
fn test_edit_coerces_to_display_type() {
    let reg = TypeRegistry::new();
    let mut store = MemoryStore::new();
    let mut session = Session::new();
    let id = session.create(RecordSpec::new("count", reg.lookup("i32").unwrap()), &reg);
    session.evaluate(id, Ok(Some(Value::I32(0))), &reg);

    let result = session.request_edit(id, "42", &reg, &mut store);
    assert_eq!(result, ApplyResult::Applied);
    assert_eq!(session.record(id).unwrap().value(), Some(&Value::I32(42)));
}

#[test]
fn test_value_struct_renders_parseable_input() {
    let mut reg = TypeRegistry::new();
    let f32_ty = reg.lookup("f32").unwrap();
    let vec2 = reg.register_struct(
        "Vec2",
        vec![("x".to_string(), f32_ty), ("y".to_string(), f32_ty)],
    );

    let mut session = Session::new();
    let id = session.create(RecordSpec::new("position", vec2), &reg);
    let value = Value::structure(
        StructValue::new("Vec2")
            .with_field("x", Value::F32(1.5))
            .with_field("y", Value::F32(-2.0)),
    );
    session.evaluate(id, Ok(Some(value)), &reg);

    let record = session.record(id).unwrap();
    assert_eq!(record.category(), Category::ValueStruct);
    assert!(record.value_label().is_none());
    match record.rendering(&reg, session.options()) {
        Rendering::ValueStruct {
            input,
            label,
            writable,
            ..
        } => {
            assert_eq!(input.as_deref(), Some("1.5 -2"));
            assert!(label.is_none());
            assert!(writable);
        }
        other => panic!("unexpected rendering: {other:?}"),
    }
}
