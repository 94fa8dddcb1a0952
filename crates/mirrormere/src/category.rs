//! Closed classification of inspected values

use crate::reflect::{Reflection, TypeId};

/// The display/edit treatment assigned to an inspected value.
///
/// Exactly one category holds for a record at any time. `NotEvaluated`
/// is the initial state; `Unsupported` is terminal in the sense that it
/// offers inspect-only access with no further specialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// No evaluation has happened yet
    NotEvaluated,
    /// The last evaluation raised in the owner
    Exception,
    /// `bool`, rendered as a toggle
    Boolean,
    /// Numeric primitive or decimal, rendered as an input field
    Number,
    /// `string`, quoted and truncated for display
    String,
    /// Enumeration constant
    Enum,
    /// Enumerable data collection
    Collection,
    /// Keyed associative container
    Dictionary,
    /// Value struct with a flat parseable text form
    ValueStruct,
    /// Color-like value type
    Color,
    /// Everything else; inspect-only
    Unsupported,
}

/// Classify a type into its category.
///
/// The decision order is deliberate and must not be reordered:
/// - Dictionary is checked before Collection because associative
///   containers also satisfy "enumerable".
/// - Scene-graph node types are excluded from Collection so structural
///   containers are not misclassified as data collections.
pub fn classify(reflect: &dyn Reflection, ty: TypeId) -> Category {
    if reflect.is_bool(ty) {
        Category::Boolean
    } else if reflect.is_numeric(ty) {
        Category::Number
    } else if reflect.is_string(ty) {
        Category::String
    } else if reflect.is_enum(ty) {
        Category::Enum
    } else if reflect.is_color(ty) {
        Category::Color
    } else if reflect.is_parseable_struct(ty) {
        Category::ValueStruct
    } else if reflect.is_dictionary_shaped(ty) {
        Category::Dictionary
    } else if !reflect.is_scene_node(ty) && reflect.is_enumerable_shaped(ty) {
        Category::Collection
    } else {
        Category::Unsupported
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Shape, TypeRegistry};

    #[test]
    fn test_builtin_classification() {
        let reg = TypeRegistry::new();
        let ty = |name: &str| reg.lookup(name).unwrap();

        assert_eq!(classify(&reg, ty("bool")), Category::Boolean);
        assert_eq!(classify(&reg, ty("i32")), Category::Number);
        assert_eq!(classify(&reg, ty("f64")), Category::Number);
        assert_eq!(classify(&reg, ty("decimal")), Category::Number);
        assert_eq!(classify(&reg, ty("string")), Category::String);
        assert_eq!(classify(&reg, ty("Color")), Category::Color);
        assert_eq!(classify(&reg, ty("List")), Category::Collection);
        assert_eq!(classify(&reg, ty("Map")), Category::Dictionary);
    }

    #[test]
    fn test_dictionary_wins_over_collection() {
        // Map is both dictionary-shaped and enumerable; the order of the
        // rules decides its category.
        let reg = TypeRegistry::new();
        let map = reg.lookup("Map").unwrap();
        assert!(reg.is_enumerable_shaped(map));
        assert_eq!(classify(&reg, map), Category::Dictionary);
    }

    #[test]
    fn test_scene_node_excluded_from_collection() {
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
    }

    #[test]
    fn test_unrelated_object_is_unsupported() {
        let mut reg = TypeRegistry::new();
        let obj = reg.register_object("AudioSource", Shape::default());
        assert_eq!(classify(&reg, obj), Category::Unsupported);
    }
}
