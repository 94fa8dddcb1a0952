//! In-memory type registry implementing the reflection and codec seams

use indexmap::IndexMap;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::codec::{Codec, ParseError};
use crate::reflect::{Reflection, TypeId};
use crate::value::{Color, EnumValue, StructValue, Value};

/// The single-token numeric input types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `i128`
    I128,
    /// `isize`
    Isize,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `u128`
    U128,
    /// `usize`
    Usize,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// Arbitrary-precision decimal
    Decimal,
}

impl NumericKind {
    /// All numeric kinds, in registration order
    pub const ALL: [NumericKind; 15] = [
        NumericKind::I8,
        NumericKind::I16,
        NumericKind::I32,
        NumericKind::I64,
        NumericKind::I128,
        NumericKind::Isize,
        NumericKind::U8,
        NumericKind::U16,
        NumericKind::U32,
        NumericKind::U64,
        NumericKind::U128,
        NumericKind::Usize,
        NumericKind::F32,
        NumericKind::F64,
        NumericKind::Decimal,
    ];

    /// The type's display name
    pub fn name(self) -> &'static str {
        match self {
            NumericKind::I8 => "i8",
            NumericKind::I16 => "i16",
            NumericKind::I32 => "i32",
            NumericKind::I64 => "i64",
            NumericKind::I128 => "i128",
            NumericKind::Isize => "isize",
            NumericKind::U8 => "u8",
            NumericKind::U16 => "u16",
            NumericKind::U32 => "u32",
            NumericKind::U64 => "u64",
            NumericKind::U128 => "u128",
            NumericKind::Usize => "usize",
            NumericKind::F32 => "f32",
            NumericKind::F64 => "f64",
            NumericKind::Decimal => "decimal",
        }
    }

    fn is_float(self) -> bool {
        matches!(self, NumericKind::F32 | NumericKind::F64 | NumericKind::Decimal)
    }
}

/// What a registered type fundamentally is.
#[derive(Debug, Clone)]
pub enum TypeKind {
    /// `bool`
    Bool,
    /// `char`
    Char,
    /// `string`
    String,
    /// A numeric primitive or the decimal
    Numeric(NumericKind),
    /// An enumeration of flat named constants
    Enum {
        /// The constant names, in declaration order
        variants: Vec<String>,
    },
    /// A struct with typed named fields
    Struct {
        /// Field name and type, in declaration order
        fields: Vec<(String, TypeId)>,
    },
    /// The color value type
    Color,
    /// The dynamic list container
    List,
    /// The dynamic map container
    Map,
    /// A foreign, store-owned object type
    Object,
    /// A type the registry knows nothing about
    Opaque,
}

/// Container-shape flags a type may carry on top of its kind.
///
/// The flags deliberately overlap: a map is both dictionary-shaped and
/// enumerable, and a scene node may be enumerable over its children.
/// The classifier's rule order resolves the overlap.
#[derive(Debug, Clone, Copy, Default)]
pub struct Shape {
    /// Keyed associative container
    pub dictionary: bool,
    /// Enumerable container
    pub enumerable: bool,
    /// Hierarchical scene-graph node
    pub scene_node: bool,
}

/// A registered type record.
#[derive(Debug, Clone)]
pub struct TypeInfo {
    /// The type's display name
    pub name: String,
    /// What the type is
    pub kind: TypeKind,
    /// Container-shape flags
    pub shape: Shape,
}

/// In-memory implementation of the reflection and codec collaborators.
///
/// Builtins (primitives, string, color, the dynamic containers) register
/// at construction; hosts add enumerations, value structs, and foreign
/// object types on top.
pub struct TypeRegistry {
    types: Vec<TypeInfo>,
    by_name: IndexMap<String, TypeId>,
    bool_id: TypeId,
    char_id: TypeId,
    string_id: TypeId,
    color_id: TypeId,
    list_id: TypeId,
    map_id: TypeId,
    unknown_id: TypeId,
    numeric_ids: [TypeId; 15],
    empty_variants: Vec<String>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create a registry with the builtin types installed
    pub fn new() -> Self {
        let zero = TypeId::new(0);
        let mut reg = Self {
            types: Vec::new(),
            by_name: IndexMap::new(),
            bool_id: zero,
            char_id: zero,
            string_id: zero,
            color_id: zero,
            list_id: zero,
            map_id: zero,
            unknown_id: zero,
            numeric_ids: [zero; 15],
            empty_variants: Vec::new(),
        };

        reg.bool_id = reg.register("bool", TypeKind::Bool, Shape::default());
        reg.char_id = reg.register("char", TypeKind::Char, Shape::default());
        reg.string_id = reg.register("string", TypeKind::String, Shape::default());
        for kind in NumericKind::ALL {
            reg.numeric_ids[kind as usize] =
                reg.register(kind.name(), TypeKind::Numeric(kind), Shape::default());
        }
        reg.color_id = reg.register("Color", TypeKind::Color, Shape::default());
        reg.list_id = reg.register(
            "List",
            TypeKind::List,
            Shape {
                enumerable: true,
                ..Shape::default()
            },
        );
        reg.map_id = reg.register(
            "Map",
            TypeKind::Map,
            Shape {
                dictionary: true,
                enumerable: true,
                ..Shape::default()
            },
        );
        reg.unknown_id = reg.register("object", TypeKind::Opaque, Shape::default());

        reg
    }

    fn register(&mut self, name: &str, kind: TypeKind, shape: Shape) -> TypeId {
        let id = TypeId::new(self.types.len() as u32);
        self.types.push(TypeInfo {
            name: name.to_string(),
            kind,
            shape,
        });
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Register an enumeration of flat named constants
    pub fn register_enum(&mut self, name: &str, variants: Vec<String>) -> TypeId {
        self.register(name, TypeKind::Enum { variants }, Shape::default())
    }

    /// Register a struct with typed named fields
    pub fn register_struct(&mut self, name: &str, fields: Vec<(String, TypeId)>) -> TypeId {
        self.register(name, TypeKind::Struct { fields }, Shape::default())
    }

    /// Register a foreign object type with its container-shape flags
    pub fn register_object(&mut self, name: &str, shape: Shape) -> TypeId {
        self.register(name, TypeKind::Object, shape)
    }

    /// The registered record for a type
    pub fn info(&self, ty: TypeId) -> Option<&TypeInfo> {
        self.types.get(ty.raw() as usize)
    }

    fn kind(&self, ty: TypeId) -> Option<&TypeKind> {
        self.info(ty).map(|info| &info.kind)
    }

    fn shape(&self, ty: TypeId) -> Shape {
        self.info(ty).map(|info| info.shape).unwrap_or_default()
    }

    /// The handle of a numeric builtin
    pub fn numeric(&self, kind: NumericKind) -> TypeId {
        self.numeric_ids[kind as usize]
    }

    // ═══════════════════════════════════════════════════════════════════
    // Numeric parsing and coercion
    // ═══════════════════════════════════════════════════════════════════

    fn parse_numeric(&self, text: &str, kind: NumericKind) -> Result<Value, ParseError> {
        let trimmed = text.trim();
        let invalid = |reason: String| ParseError::Invalid {
            text: text.to_string(),
            type_name: kind.name().to_string(),
            reason,
        };
        let parsed = match kind {
            NumericKind::I8 => trimmed.parse::<i8>().map(Value::I8).map_err(|e| e.to_string()),
            NumericKind::I16 => trimmed.parse::<i16>().map(Value::I16).map_err(|e| e.to_string()),
            NumericKind::I32 => trimmed.parse::<i32>().map(Value::I32).map_err(|e| e.to_string()),
            NumericKind::I64 => trimmed.parse::<i64>().map(Value::I64).map_err(|e| e.to_string()),
            NumericKind::I128 => trimmed.parse::<i128>().map(Value::I128).map_err(|e| e.to_string()),
            NumericKind::Isize => trimmed.parse::<isize>().map(Value::Isize).map_err(|e| e.to_string()),
            NumericKind::U8 => trimmed.parse::<u8>().map(Value::U8).map_err(|e| e.to_string()),
            NumericKind::U16 => trimmed.parse::<u16>().map(Value::U16).map_err(|e| e.to_string()),
            NumericKind::U32 => trimmed.parse::<u32>().map(Value::U32).map_err(|e| e.to_string()),
            NumericKind::U64 => trimmed.parse::<u64>().map(Value::U64).map_err(|e| e.to_string()),
            NumericKind::U128 => trimmed.parse::<u128>().map(Value::U128).map_err(|e| e.to_string()),
            NumericKind::Usize => trimmed.parse::<usize>().map(Value::Usize).map_err(|e| e.to_string()),
            NumericKind::F32 => trimmed.parse::<f32>().map(Value::F32).map_err(|e| e.to_string()),
            NumericKind::F64 => trimmed.parse::<f64>().map(Value::F64).map_err(|e| e.to_string()),
            NumericKind::Decimal => trimmed
                .parse::<Decimal>()
                .map(Value::Decimal)
                .map_err(|e| e.to_string()),
        };
        parsed.map_err(invalid)
    }

    fn numeric_from_i128(kind: NumericKind, n: i128) -> Option<Value> {
        match kind {
            NumericKind::I8 => n.try_into().ok().map(Value::I8),
            NumericKind::I16 => n.try_into().ok().map(Value::I16),
            NumericKind::I32 => n.try_into().ok().map(Value::I32),
            NumericKind::I64 => n.try_into().ok().map(Value::I64),
            NumericKind::I128 => Some(Value::I128(n)),
            NumericKind::Isize => n.try_into().ok().map(Value::Isize),
            NumericKind::U8 => n.try_into().ok().map(Value::U8),
            NumericKind::U16 => n.try_into().ok().map(Value::U16),
            NumericKind::U32 => n.try_into().ok().map(Value::U32),
            NumericKind::U64 => n.try_into().ok().map(Value::U64),
            NumericKind::U128 => n.try_into().ok().map(Value::U128),
            NumericKind::Usize => n.try_into().ok().map(Value::Usize),
            NumericKind::F32 => Some(Value::F32(n as f32)),
            NumericKind::F64 => Some(Value::F64(n as f64)),
            NumericKind::Decimal => Decimal::from_i128(n).map(Value::Decimal),
        }
    }

    fn numeric_from_f64(kind: NumericKind, f: f64) -> Option<Value> {
        match kind {
            NumericKind::F32 => Some(Value::F32(f as f32)),
            NumericKind::F64 => Some(Value::F64(f)),
            NumericKind::Decimal => Decimal::from_f64(f).map(Value::Decimal),
            // Float → integer saturates, matching `as` casts
            _ => Self::numeric_from_i128(kind, f as i128),
        }
    }

    fn coerce_numeric(&self, value: &Value, kind: NumericKind) -> Option<Value> {
        if let Some(n) = value.as_i128() {
            return Self::numeric_from_i128(kind, n);
        }
        if let Some(f) = value.as_f64() {
            return Self::numeric_from_f64(kind, f);
        }
        if let Value::Decimal(d) = value {
            return if kind.is_float() {
                d.to_f64().and_then(|f| Self::numeric_from_f64(kind, f))
            } else {
                d.to_i128().and_then(|n| Self::numeric_from_i128(kind, n))
            };
        }
        None
    }
}

impl Reflection for TypeRegistry {
    fn type_name(&self, ty: TypeId) -> &str {
        self.info(ty).map_or("?", |info| info.name.as_str())
    }

    fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    fn runtime_type(&self, value: &Value) -> TypeId {
        match value {
            Value::Bool(_) => self.bool_id,
            Value::Char(_) => self.char_id,
            Value::String(_) => self.string_id,
            Value::I8(_) => self.numeric(NumericKind::I8),
            Value::I16(_) => self.numeric(NumericKind::I16),
            Value::I32(_) => self.numeric(NumericKind::I32),
            Value::I64(_) => self.numeric(NumericKind::I64),
            Value::I128(_) => self.numeric(NumericKind::I128),
            Value::Isize(_) => self.numeric(NumericKind::Isize),
            Value::U8(_) => self.numeric(NumericKind::U8),
            Value::U16(_) => self.numeric(NumericKind::U16),
            Value::U32(_) => self.numeric(NumericKind::U32),
            Value::U64(_) => self.numeric(NumericKind::U64),
            Value::U128(_) => self.numeric(NumericKind::U128),
            Value::Usize(_) => self.numeric(NumericKind::Usize),
            Value::F32(_) => self.numeric(NumericKind::F32),
            Value::F64(_) => self.numeric(NumericKind::F64),
            Value::Decimal(_) => self.numeric(NumericKind::Decimal),
            Value::Color(_) => self.color_id,
            Value::List(_) => self.list_id,
            Value::Map(_) => self.map_id,
            Value::Enum(e) => self.lookup(&e.type_name).unwrap_or(self.unknown_id),
            Value::Struct(s) => self.lookup(&s.type_name).unwrap_or(self.unknown_id),
            Value::Object(o) => o.type_id,
        }
    }

    fn is_bool(&self, ty: TypeId) -> bool {
        matches!(self.kind(ty), Some(TypeKind::Bool))
    }

    fn is_numeric(&self, ty: TypeId) -> bool {
        // char rides with the numerics: a primitive edited through a
        // single-token input field
        matches!(self.kind(ty), Some(TypeKind::Numeric(_) | TypeKind::Char))
    }

    fn is_string(&self, ty: TypeId) -> bool {
        matches!(self.kind(ty), Some(TypeKind::String))
    }

    fn is_enum(&self, ty: TypeId) -> bool {
        matches!(self.kind(ty), Some(TypeKind::Enum { .. }))
    }

    fn is_color(&self, ty: TypeId) -> bool {
        matches!(self.kind(ty), Some(TypeKind::Color))
    }

    fn is_parseable_struct(&self, ty: TypeId) -> bool {
        // A value struct is parseable when every field is a flat
        // non-string scalar, so the space-separated text form is
        // unambiguous.
        match self.kind(ty) {
            Some(TypeKind::Struct { fields }) if !fields.is_empty() => {
                fields.iter().all(|(_, field_ty)| {
                    matches!(
                        self.kind(*field_ty),
                        Some(TypeKind::Bool | TypeKind::Char | TypeKind::Numeric(_))
                    )
                })
            }
            _ => false,
        }
    }

    fn is_dictionary_shaped(&self, ty: TypeId) -> bool {
        self.shape(ty).dictionary
    }

    fn is_enumerable_shaped(&self, ty: TypeId) -> bool {
        self.shape(ty).enumerable
    }

    fn is_scene_node(&self, ty: TypeId) -> bool {
        self.shape(ty).scene_node
    }

    fn variant_names(&self, ty: TypeId) -> &[String] {
        match self.kind(ty) {
            Some(TypeKind::Enum { variants }) => variants,
            _ => &self.empty_variants,
        }
    }

    fn coerce(&self, value: Value, ty: TypeId) -> Value {
        match self.kind(ty) {
            Some(TypeKind::Numeric(kind)) => self
                .coerce_numeric(&value, *kind)
                .unwrap_or(value),
            _ => value,
        }
    }

    fn describe(&self, value: &Value) -> String {
        match value {
            Value::Object(o) => o.name.as_ref().clone(),
            Value::Enum(e) => e.variant.clone(),
            _ => value.to_string(),
        }
    }
}

impl Codec for TypeRegistry {
    fn can_parse(&self, ty: TypeId) -> bool {
        match self.kind(ty) {
            Some(
                TypeKind::Bool
                | TypeKind::Char
                | TypeKind::String
                | TypeKind::Numeric(_)
                | TypeKind::Enum { .. }
                | TypeKind::Color,
            ) => true,
            Some(TypeKind::Struct { .. }) => self.is_parseable_struct(ty),
            _ => false,
        }
    }

    fn try_parse(&self, text: &str, ty: TypeId) -> Result<Value, ParseError> {
        let type_name = self.type_name(ty).to_string();
        let invalid = |reason: &str| ParseError::Invalid {
            text: text.to_string(),
            type_name: type_name.clone(),
            reason: reason.to_string(),
        };

        match self.kind(ty) {
            Some(TypeKind::Bool) => text
                .trim()
                .parse::<bool>()
                .map(Value::Bool)
                .map_err(|_| invalid("expected `true` or `false`")),

            Some(TypeKind::Char) => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Value::Char(c)),
                    _ => Err(invalid("expected a single character")),
                }
            }

            Some(TypeKind::String) => Ok(Value::string(text)),

            Some(TypeKind::Numeric(kind)) => self.parse_numeric(text, *kind),

            Some(TypeKind::Enum { variants }) => {
                let wanted = text.trim();
                variants
                    .iter()
                    .find(|variant| *variant == wanted)
                    .map(|variant| Value::enumeration(EnumValue::new(&type_name, variant)))
                    .ok_or(ParseError::UnknownVariant {
                        text: wanted.to_string(),
                        type_name,
                    })
            }

            Some(TypeKind::Color) => {
                let channels: Vec<f32> = text
                    .split_whitespace()
                    .map(str::parse::<f32>)
                    .collect::<Result<_, _>>()
                    .map_err(|e| invalid(&e.to_string()))?;
                match channels.as_slice() {
                    [r, g, b] => Ok(Value::Color(Color::opaque(*r, *g, *b))),
                    [r, g, b, a] => Ok(Value::Color(Color::new(*r, *g, *b, *a))),
                    _ => Err(invalid("expected 3 or 4 channel values")),
                }
            }

            Some(TypeKind::Struct { fields }) if self.is_parseable_struct(ty) => {
                let tokens: Vec<&str> = text.split_whitespace().collect();
                if tokens.len() != fields.len() {
                    return Err(invalid(&format!(
                        "expected {} fields, got {}",
                        fields.len(),
                        tokens.len()
                    )));
                }
                let mut parsed = StructValue::new(&type_name);
                for ((field_name, field_ty), token) in fields.iter().zip(tokens) {
                    let field_value = self.try_parse(token, *field_ty)?;
                    parsed.fields.insert(field_name.clone(), field_value);
                }
                Ok(Value::structure(parsed))
            }

            _ => Err(ParseError::Unsupported { type_name }),
        }
    }

    fn format(&self, value: &Value, ty: TypeId) -> String {
        match value {
            Value::Bool(b) => b.to_string(),
            Value::Char(c) => c.to_string(),
            Value::String(s) => s.as_ref().clone(),
            Value::I8(n) => n.to_string(),
            Value::I16(n) => n.to_string(),
            Value::I32(n) => n.to_string(),
            Value::I64(n) => n.to_string(),
            Value::I128(n) => n.to_string(),
            Value::Isize(n) => n.to_string(),
            Value::U8(n) => n.to_string(),
            Value::U16(n) => n.to_string(),
            Value::U32(n) => n.to_string(),
            Value::U64(n) => n.to_string(),
            Value::U128(n) => n.to_string(),
            Value::Usize(n) => n.to_string(),
            Value::F32(n) => n.to_string(),
            Value::F64(n) => n.to_string(),
            Value::Decimal(d) => d.to_string(),
            Value::Enum(e) => e.variant.clone(),
            Value::Color(c) => format!("{} {} {} {}", c.r, c.g, c.b, c.a),
            Value::Struct(s) => {
                let field_types: Vec<TypeId> = match self.kind(ty) {
                    Some(TypeKind::Struct { fields }) => {
                        fields.iter().map(|(_, field_ty)| *field_ty).collect()
                    }
                    _ => Vec::new(),
                };
                s.fields
                    .values()
                    .enumerate()
                    .map(|(i, field)| {
                        let field_ty = field_types
                            .get(i)
                            .copied()
                            .unwrap_or_else(|| self.runtime_type(field));
                        self.format(field, field_ty)
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            }
            other => other.to_string(),
        }
    }

    fn example_text(&self, ty: TypeId) -> String {
        match self.kind(ty) {
            Some(TypeKind::Bool) => "true".to_string(),
            Some(TypeKind::Char) => "a".to_string(),
            Some(TypeKind::String) => String::new(),
            Some(TypeKind::Numeric(kind)) => if kind.is_float() {
                "0.0"
            } else {
                "0"
            }
            .to_string(),
            Some(TypeKind::Enum { variants }) => variants.first().cloned().unwrap_or_default(),
            Some(TypeKind::Color) => "1.0 0.5 0.5 1.0".to_string(),
            Some(TypeKind::Struct { fields }) => fields
                .iter()
                .map(|(_, field_ty)| self.example_text(*field_ty))
                .collect::<Vec<_>>()
                .join(" "),
            _ => String::new(),
        }
    }
}
