//! Parameter-schema validation and base-schema inheritance.
//!
//! An [`ObjectSchema`] is built from the `"parameters"` member of a command
//! definition. Validation is structural: the schema must be a JSON object,
//! and each property definition must be one of the accepted shapes. The
//! value-level constraint grammar inside a property definition (ranges,
//! defaults, nested objects) is carried opaquely and round-trips through
//! [`ObjectSchema::to_value`].
//!
//! # Property definition shapes
//!
//! ```json
//! {
//!     "color": "string",
//!     "mode": ["eco", "boost"],
//!     "level": {"type": "integer", "minimum": 0, "maximum": 100}
//! }
//! ```
//!
//! A command inherited from a base registry holds its base schema as a
//! shared [`Arc`]; properties it does not override are inherited, and the
//! full serialized form merges the base under the overrides.

use std::sync::Arc;

use device_commands_core::ValueKind;
use serde_json::{Map, Value};
use thiserror::Error;

/// Type names accepted in `"type"` members and string shorthands.
const TYPE_NAMES: &[&str] = &["boolean", "integer", "number", "string", "object", "array"];

/// Structural schema violations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// The schema JSON is not an object.
    #[error("parameter schema must be an object, found {found}")]
    ObjectExpected { found: ValueKind },

    /// A property definition is none of the accepted shapes.
    #[error("invalid definition for property '{property}'")]
    InvalidPropertyDefinition { property: String },

    /// A `"type"` member or string shorthand names an unknown type.
    #[error("unknown type '{type_name}' for property '{property}'")]
    UnknownType {
        property: String,
        type_name: String,
    },
}

/// An immutable, validated parameter schema.
///
/// Schemas are never mutated after construction; inheritance shares the
/// base schema behind an [`Arc`] whose lifetime is the longer of the two
/// holders.
///
/// # Examples
///
/// ```
/// use device_commands_registry::ObjectSchema;
/// use serde_json::json;
///
/// let schema = ObjectSchema::from_value(
///     &json!({"level": {"type": "integer"}}),
///     None,
/// )
/// .unwrap();
/// assert!(schema.properties().contains_key("level"));
/// ```
#[derive(Debug)]
pub struct ObjectSchema {
    properties: Map<String, Value>,
    base: Option<Arc<ObjectSchema>>,
}

impl ObjectSchema {
    /// Validates `schema_json` and builds a schema, optionally deriving
    /// from `base`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ObjectExpected`] for a non-object schema,
    /// and [`SchemaError::InvalidPropertyDefinition`] /
    /// [`SchemaError::UnknownType`] for malformed property definitions.
    pub fn from_value(
        schema_json: &Value,
        base: Option<&Arc<ObjectSchema>>,
    ) -> Result<Self, SchemaError> {
        let object = schema_json
            .as_object()
            .ok_or_else(|| SchemaError::ObjectExpected {
                found: ValueKind::of(schema_json),
            })?;

        for (name, definition) in object {
            validate_property(name, definition)?;
        }

        Ok(Self {
            properties: object.clone(),
            base: base.cloned(),
        })
    }

    /// Serializes the schema back into a value tree.
    ///
    /// With `full` set, inherited base properties are merged underneath
    /// this schema's own definitions (an override wins per property);
    /// otherwise only the schema's own definitions are emitted.
    pub fn to_value(&self, full: bool) -> Result<Value, SchemaError> {
        let merged = match (&self.base, full) {
            (Some(base), true) => {
                let mut merged = match base.to_value(true)? {
                    Value::Object(object) => object,
                    _ => Map::new(),
                };
                for (name, definition) in &self.properties {
                    merged.insert(name.clone(), definition.clone());
                }
                merged
            }
            _ => self.properties.clone(),
        };
        Ok(Value::Object(merged))
    }

    /// This schema's own property definitions, excluding inherited ones.
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// The base schema this one derives from, if any.
    pub fn base(&self) -> Option<&Arc<ObjectSchema>> {
        self.base.as_ref()
    }

    /// Returns `true` if `name` is defined here or inherited from a base.
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
            || self
                .base
                .as_ref()
                .is_some_and(|base| base.has_property(name))
    }
}

fn validate_property(name: &str, definition: &Value) -> Result<(), SchemaError> {
    match definition {
        // Type-name shorthand: "level": "integer"
        Value::String(type_name) => check_type_name(name, type_name),
        // Enum shorthand: "mode": ["eco", "boost"]
        Value::Array(options) => {
            if options.is_empty() {
                return Err(SchemaError::InvalidPropertyDefinition {
                    property: name.to_string(),
                });
            }
            Ok(())
        }
        Value::Object(members) => match members.get("type") {
            Some(Value::String(type_name)) => check_type_name(name, type_name),
            Some(_) => Err(SchemaError::InvalidPropertyDefinition {
                property: name.to_string(),
            }),
            None => Ok(()),
        },
        _ => Err(SchemaError::InvalidPropertyDefinition {
            property: name.to_string(),
        }),
    }
}

fn check_type_name(property: &str, type_name: &str) -> Result<(), SchemaError> {
    if TYPE_NAMES.contains(&type_name) {
        Ok(())
    } else {
        Err(SchemaError::UnknownType {
            property: property.to_string(),
            type_name: type_name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_accepts_all_definition_shapes() {
        let schema = ObjectSchema::from_value(
            &json!({
                "color": "string",
                "mode": ["eco", "boost"],
                "level": {"type": "integer", "minimum": 0},
                "opaque": {"anything": [1, 2, 3]},
            }),
            None,
        )
        .unwrap();
        assert_eq!(schema.properties().len(), 4);
    }

    #[test]
    fn test_rejects_non_object_schema() {
        let err = ObjectSchema::from_value(&json!("nope"), None).unwrap_err();
        assert_eq!(
            err,
            SchemaError::ObjectExpected {
                found: ValueKind::String,
            }
        );
    }

    #[test]
    fn test_rejects_unknown_type_name() {
        let err = ObjectSchema::from_value(&json!({"x": "quaternion"}), None).unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownType {
                property: "x".to_string(),
                type_name: "quaternion".to_string(),
            }
        );

        let err =
            ObjectSchema::from_value(&json!({"x": {"type": "quaternion"}}), None).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownType { .. }));
    }

    #[test]
    fn test_rejects_malformed_definitions() {
        assert!(ObjectSchema::from_value(&json!({"x": 5}), None).is_err());
        assert!(ObjectSchema::from_value(&json!({"x": []}), None).is_err());
        assert!(ObjectSchema::from_value(&json!({"x": {"type": 3}}), None).is_err());
    }

    #[test]
    fn test_inheritance_merges_under_overrides() {
        let base = Arc::new(
            ObjectSchema::from_value(
                &json!({"color": "string", "level": {"type": "integer"}}),
                None,
            )
            .unwrap(),
        );
        let derived = ObjectSchema::from_value(
            &json!({"level": {"type": "integer", "maximum": 50}, "extra": "boolean"}),
            Some(&base),
        )
        .unwrap();

        // Own view carries only the overrides.
        assert_eq!(
            derived.to_value(false).unwrap(),
            json!({"level": {"type": "integer", "maximum": 50}, "extra": "boolean"})
        );

        // Full view inherits "color" and keeps the override for "level".
        assert_eq!(
            derived.to_value(true).unwrap(),
            json!({
                "color": "string",
                "level": {"type": "integer", "maximum": 50},
                "extra": "boolean",
            })
        );

        assert!(derived.has_property("color"));
        assert!(derived.has_property("extra"));
        assert!(!derived.has_property("missing"));
    }

    #[test]
    fn test_full_view_without_base_equals_own_view() {
        let schema = ObjectSchema::from_value(&json!({"on": "boolean"}), None).unwrap();
        assert_eq!(
            schema.to_value(true).unwrap(),
            schema.to_value(false).unwrap()
        );
    }
}
