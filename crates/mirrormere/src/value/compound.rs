//! Compound value types: structs, enum constants, and colors

use indexmap::IndexMap;

use super::Value;

/// A struct instance with named fields.
///
/// Uses IndexMap to preserve field order (declaration order matters both
/// for display and for the flat text form of parseable value structs).
#[derive(Debug, Clone)]
pub struct StructValue {
    /// The struct's type name (e.g., "Vec3", "Rect")
    pub type_name: String,

    /// The struct's fields in declaration order
    pub fields: IndexMap<String, Value>,
}

impl StructValue {
    /// Create a new struct with no fields
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Add a field (builder pattern)
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Get a field by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the struct has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A named constant of a registered enumeration.
///
/// The source model is flat named constants; variants carry no payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    /// The enumeration's type name (e.g., "BlendMode")
    pub type_name: String,

    /// The constant's name (e.g., "Additive")
    pub variant: String,
}

impl EnumValue {
    /// Create an enum constant
    pub fn new(type_name: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            variant: variant.into(),
        }
    }

    /// Check if this is a specific constant
    pub fn is_variant(&self, variant: &str) -> bool {
        self.variant == variant
    }
}

/// A color-like value type: four `f32` channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl Color {
    /// Create a color from four channels
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color
    pub fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// The channels in `[r, g, b, a]` order
    pub fn channels(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}
