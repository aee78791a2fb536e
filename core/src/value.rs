//! Kind discrimination for the dynamically-typed value tree.
//!
//! The value tree itself is [`serde_json::Value`]; this module adds the
//! closed kind enum the codec dispatches on. JSON numbers are split into
//! two kinds: anything representable as `i64` is [`ValueKind::Int`], every
//! other number is [`ValueKind::Double`]. The codec never coerces between
//! the two.

use std::fmt;

use serde_json::Value;

/// Concrete kind of a [`serde_json::Value`] node.
///
/// # Examples
///
/// ```
/// use device_commands_core::ValueKind;
/// use serde_json::json;
///
/// assert_eq!(ValueKind::of(&json!(42)), ValueKind::Int);
/// assert_eq!(ValueKind::of(&json!(42.5)), ValueKind::Double);
/// assert_eq!(ValueKind::of(&json!([1, 2])), ValueKind::List);
/// assert_ne!(ValueKind::of(&json!(1)), ValueKind::of(&json!(true)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Double,
    String,
    List,
    Dictionary,
}

impl ValueKind {
    /// Returns the kind of `value`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(n) if n.as_i64().is_some() => Self::Int,
            Value::Number(_) => Self::Double,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::List,
            Value::Object(_) => Self::Dictionary,
        }
    }

    /// Stable lowercase name used in error messages and transport codes.
    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Int => "integer",
            Self::Double => "double",
            Self::String => "string",
            Self::List => "list",
            Self::Dictionary => "dictionary",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_kind_of_scalars() {
        assert_eq!(ValueKind::of(&json!(null)), ValueKind::Null);
        assert_eq!(ValueKind::of(&json!(true)), ValueKind::Bool);
        assert_eq!(ValueKind::of(&json!(-7)), ValueKind::Int);
        assert_eq!(ValueKind::of(&json!(0.25)), ValueKind::Double);
        assert_eq!(ValueKind::of(&json!("x")), ValueKind::String);
    }

    #[test]
    fn test_kind_of_containers() {
        assert_eq!(ValueKind::of(&json!([])), ValueKind::List);
        assert_eq!(ValueKind::of(&json!({})), ValueKind::Dictionary);
    }

    #[test]
    fn test_large_unsigned_is_double() {
        // Beyond i64::MAX there is no integer wire representation.
        assert_eq!(ValueKind::of(&json!(u64::MAX)), ValueKind::Double);
    }

    #[test]
    fn test_int_and_double_never_coerce() {
        assert_ne!(ValueKind::of(&json!(1)), ValueKind::of(&json!(1.0)));
    }
}
