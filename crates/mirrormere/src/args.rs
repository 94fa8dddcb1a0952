//! Parameter specs and argument text parsing for evaluable slots

use tracing::warn;

use crate::reflect::{Runtime, TypeId};
use crate::value::Value;

/// One parameter an evaluable slot needs before it can run.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    /// Parameter name, shown next to its input field
    pub name: String,
    /// The parameter's type; input text parses against it
    pub ty: TypeId,
    /// Whether the parameter may be left blank
    pub optional: bool,
    /// The value used when an optional parameter is left blank
    pub default: Option<Value>,
}

impl ParamSpec {
    /// A required parameter
    pub fn required(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
            default: None,
        }
    }

    /// An optional parameter with a fallback value
    pub fn optional(name: impl Into<String>, ty: TypeId, default: Value) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: true,
            default: Some(default),
        }
    }
}

/// Parse one input string per parameter into argument values.
///
/// String parameters take their input verbatim, untrimmed. Blank input
/// falls back to the parameter's default for optional parameters and
/// fails for required ones. Any failure logs the offending parameter
/// and returns `None`; evaluation must not proceed on a partial
/// argument list.
pub fn parse_arguments(
    params: &[ParamSpec],
    inputs: &[&str],
    rt: &dyn Runtime,
) -> Option<Vec<Value>> {
    if inputs.len() != params.len() {
        warn!(
            expected = params.len(),
            got = inputs.len(),
            "argument count mismatch"
        );
        return None;
    }

    let mut values = Vec::with_capacity(params.len());
    for (param, input) in params.iter().zip(inputs) {
        if rt.is_string(param.ty) {
            values.push(Value::string(*input));
            continue;
        }

        if input.trim().is_empty() {
            match (&param.default, param.optional) {
                (Some(default), true) => {
                    values.push(default.clone());
                    continue;
                }
                _ => {
                    warn!(param = %param.name, "required argument left blank");
                    return None;
                }
            }
        }

        match rt.try_parse(input.trim(), param.ty) {
            Ok(value) => values.push(value),
            Err(err) => {
                warn!(param = %param.name, %err, "argument did not parse");
                return None;
            }
        }
    }
    Some(values)
}

/// Placeholder text for a parameter's input field.
///
/// Strings take anything, so their placeholder stays blank; other types
/// show a parse example.
pub fn example_placeholder(ty: TypeId, rt: &dyn Runtime) -> String {
    if rt.is_string(ty) {
        return String::new();
    }
    let example = rt.example_text(ty);
    if example.is_empty() {
        String::new()
    } else {
        format!("eg. {example}")
    }
}
