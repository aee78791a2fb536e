//! Bidirectional conversion between value trees and wire variants.
//!
//! [`encode_dictionary`] turns an outbound state/command object into the
//! [`VariantDictionary`] handed to the transport; [`decode_dictionary`]
//! turns an inbound property update back into a value tree. Both directions
//! abort on the first failing member and return no partial result.
//!
//! # List homogeneity
//!
//! Encoding a non-empty list inspects the first element's [`ValueKind`] and
//! requires every element to match it exactly — integers and doubles never
//! mix. Scalar lists become typed variant lists, lists of objects become
//! [`Variant::DictionaryList`], and nested lists fall back to the
//! heterogeneous [`Variant::VariantList`] since no concrete element type
//! exists at that level. Empty lists also travel as an empty
//! `VariantList` because their element type is unknowable.
//!
//! # Round-trip guarantees
//!
//! `decode(encode(v)) == v` holds for scalars, objects, and homogeneous
//! lists. The *variant* shape of nested and heterogeneous lists is not
//! reproduced bit-for-bit: a `VariantList` decodes into a plain list whose
//! re-encoding is governed by the homogeneity rules again (and fails for a
//! mixed-type list). That asymmetry is a documented property of the wire
//! format, not a defect to compensate for.

use serde_json::{Map, Number, Value};

use crate::error::{CodecError, Result};
use crate::value::ValueKind;
use crate::variant::{Variant, VariantDictionary};

/// Encodes an outbound object into the wire map exchanged with the
/// transport.
///
/// # Examples
///
/// ```
/// use device_commands_core::{encode_dictionary, Variant};
/// use serde_json::json;
///
/// let state = json!({"level": 40, "modes": ["eco", "boost"]});
/// let wire = encode_dictionary(state.as_object().unwrap()).unwrap();
///
/// assert_eq!(wire.get("level"), Some(&Variant::Int(40)));
/// assert_eq!(
///     wire.get("modes"),
///     Some(&Variant::StringList(vec!["eco".into(), "boost".into()]))
/// );
/// ```
pub fn encode_dictionary(object: &Map<String, Value>) -> Result<VariantDictionary> {
    let mut result = VariantDictionary::new();
    for (key, value) in object {
        result.insert(key.clone(), encode_value(value)?);
    }
    Ok(result)
}

/// Encodes a single value-tree node into a [`Variant`].
///
/// Scalars map one-to-one with no numeric coercion. Null has no wire
/// representation and reports [`CodecError::UnsupportedType`].
pub fn encode_value(value: &Value) -> Result<Variant> {
    match value {
        Value::Null => Err(unsupported(ValueKind::Null.name())),
        Value::Bool(b) => Ok(Variant::Bool(*b)),
        Value::Number(n) => encode_number(n),
        Value::String(s) => Ok(Variant::String(s.clone())),
        Value::Array(items) => encode_list(items),
        Value::Object(object) => Ok(Variant::Dictionary(encode_dictionary(object)?)),
    }
}

fn encode_number(number: &Number) -> Result<Variant> {
    if let Some(i) = number.as_i64() {
        Ok(Variant::Int(i))
    } else if let Some(f) = number.as_f64() {
        Ok(Variant::Double(f))
    } else {
        Err(unsupported("number"))
    }
}

/// Encodes a list, dispatching on the first element's kind.
///
/// Every element must share that kind; the first mismatch aborts the
/// encode with [`CodecError::TypeMismatch`].
fn encode_list(items: &[Value]) -> Result<Variant> {
    let Some(first) = items.first() else {
        // Element type of an empty list is unknowable.
        return Ok(Variant::VariantList(Vec::new()));
    };

    match ValueKind::of(first) {
        ValueKind::Bool => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Bool(b) => values.push(*b),
                    other => return Err(mixed(ValueKind::Bool, other)),
                }
            }
            Ok(Variant::BoolList(values))
        }
        ValueKind::Int => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                match ValueKind::of(item) {
                    ValueKind::Int => match item.as_i64() {
                        Some(i) => values.push(i),
                        None => return Err(unsupported("number")),
                    },
                    found => return Err(CodecError::TypeMismatch { expected: ValueKind::Int, found }),
                }
            }
            Ok(Variant::IntList(values))
        }
        ValueKind::Double => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                match ValueKind::of(item) {
                    ValueKind::Double => match item.as_f64() {
                        Some(f) => values.push(f),
                        None => return Err(unsupported("number")),
                    },
                    found => {
                        return Err(CodecError::TypeMismatch {
                            expected: ValueKind::Double,
                            found,
                        });
                    }
                }
            }
            Ok(Variant::DoubleList(values))
        }
        ValueKind::String => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(s) => values.push(s.clone()),
                    other => return Err(mixed(ValueKind::String, other)),
                }
            }
            Ok(Variant::StringList(values))
        }
        ValueKind::Dictionary => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Object(object) => values.push(encode_dictionary(object)?),
                    other => return Err(mixed(ValueKind::Dictionary, other)),
                }
            }
            Ok(Variant::DictionaryList(values))
        }
        ValueKind::List => {
            // No concrete element type exists for list-of-lists; each
            // element is encoded individually into the fallback shape.
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Array(_) => values.push(encode_value(item)?),
                    other => return Err(mixed(ValueKind::List, other)),
                }
            }
            Ok(Variant::VariantList(values))
        }
        ValueKind::Null => Err(unsupported(ValueKind::Null.name())),
    }
}

/// Decodes an inbound wire map into a value-tree object.
///
/// Aborts on the first failing member; no partial object is returned.
pub fn decode_dictionary(object: &VariantDictionary) -> Result<Map<String, Value>> {
    let mut result = Map::new();
    for (key, variant) in object {
        result.insert(key.clone(), decode_variant(variant)?);
    }
    Ok(result)
}

/// Decodes a single [`Variant`] into a value-tree node.
///
/// The arms below are kept in the transport's probe precedence — bool,
/// int, double, string, dictionary, heterogeneous list, typed scalar
/// lists, dictionary list — because downstream consumers depend on which
/// concrete type wins for ambiguous wire payloads. Do not reorder.
///
/// # Examples
///
/// ```
/// use device_commands_core::{decode_variant, Variant};
/// use serde_json::json;
///
/// let wire = Variant::IntList(vec![1, 2, 3]);
/// assert_eq!(decode_variant(&wire).unwrap(), json!([1, 2, 3]));
/// ```
pub fn decode_variant(variant: &Variant) -> Result<Value> {
    match variant {
        Variant::Bool(b) => Ok(Value::Bool(*b)),
        Variant::Int(i) => Ok(Value::from(*i)),
        Variant::Double(f) => decode_double(*f, variant),
        Variant::String(s) => Ok(Value::String(s.clone())),
        Variant::Dictionary(object) => Ok(Value::Object(decode_dictionary(object)?)),
        Variant::VariantList(items) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                values.push(decode_variant(item)?);
            }
            Ok(Value::Array(values))
        }
        Variant::BoolList(items) => {
            Ok(Value::Array(items.iter().map(|b| Value::Bool(*b)).collect()))
        }
        Variant::IntList(items) => {
            Ok(Value::Array(items.iter().map(|i| Value::from(*i)).collect()))
        }
        Variant::DoubleList(items) => {
            let mut values = Vec::with_capacity(items.len());
            for f in items {
                values.push(decode_double(*f, variant)?);
            }
            Ok(Value::Array(values))
        }
        Variant::StringList(items) => Ok(Value::Array(
            items.iter().map(|s| Value::String(s.clone())).collect(),
        )),
        Variant::DictionaryList(items) => {
            let mut values = Vec::with_capacity(items.len());
            for object in items {
                values.push(Value::Object(decode_dictionary(object)?));
            }
            Ok(Value::Array(values))
        }
    }
}

/// NaN and infinities have no value-tree representation.
fn decode_double(value: f64, variant: &Variant) -> Result<Value> {
    match Number::from_f64(value) {
        Some(number) => Ok(Value::Number(number)),
        None => Err(unsupported(variant.type_name())),
    }
}

fn mixed(expected: ValueKind, found: &Value) -> CodecError {
    CodecError::TypeMismatch {
        expected,
        found: ValueKind::of(found),
    }
}

fn unsupported(type_name: &str) -> CodecError {
    CodecError::UnsupportedType {
        type_name: type_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn round_trip(value: Value) {
        let encoded = encode_value(&value).unwrap();
        assert_eq!(decode_variant(&encoded).unwrap(), value);
    }

    #[test]
    fn test_scalar_round_trips() {
        round_trip(json!(true));
        round_trip(json!(false));
        round_trip(json!(0));
        round_trip(json!(-123));
        round_trip(json!(98.5));
        round_trip(json!("hello"));
        round_trip(json!(""));
    }

    #[test]
    fn test_dictionary_round_trip() {
        round_trip(json!({"a": 1, "b": [true, false]}));
    }

    #[test]
    fn test_dictionary_list_round_trip() {
        round_trip(json!([{"x": 1}, {"x": 2}]));
    }

    #[test]
    fn test_nested_dictionary_round_trip() {
        round_trip(json!({
            "device": {"name": "lamp", "channels": [1, 2, 3]},
            "tags": ["a", "b"],
        }));
    }

    #[test]
    fn test_nested_list_round_trips_through_fallback() {
        let value = json!([[1, 2], [3]]);
        let encoded = encode_value(&value).unwrap();
        assert_eq!(
            encoded,
            Variant::VariantList(vec![
                Variant::IntList(vec![1, 2]),
                Variant::IntList(vec![3]),
            ])
        );
        assert_eq!(decode_variant(&encoded).unwrap(), value);
    }

    #[test]
    fn test_empty_list_encodes_as_variant_list() {
        assert_eq!(
            encode_value(&json!([])).unwrap(),
            Variant::VariantList(Vec::new())
        );
    }

    #[test]
    fn test_typed_lists() {
        assert_eq!(
            encode_value(&json!([true, false])).unwrap(),
            Variant::BoolList(vec![true, false])
        );
        assert_eq!(
            encode_value(&json!([1, 2, 3])).unwrap(),
            Variant::IntList(vec![1, 2, 3])
        );
        assert_eq!(
            encode_value(&json!([1.5, 2.5])).unwrap(),
            Variant::DoubleList(vec![1.5, 2.5])
        );
        assert_eq!(
            encode_value(&json!(["a", "b"])).unwrap(),
            Variant::StringList(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_mixed_list_is_an_error_not_a_crash() {
        let err = encode_value(&json!([1, "two"])).unwrap_err();
        assert_eq!(
            err,
            CodecError::TypeMismatch {
                expected: ValueKind::Int,
                found: ValueKind::String,
            }
        );
        assert_eq!(err.code(), "type_mismatch");
    }

    #[test]
    fn test_int_double_mix_is_rejected() {
        assert!(matches!(
            encode_value(&json!([1, 2.5])),
            Err(CodecError::TypeMismatch {
                expected: ValueKind::Int,
                found: ValueKind::Double,
            })
        ));
        assert!(matches!(
            encode_value(&json!([2.5, 1])),
            Err(CodecError::TypeMismatch {
                expected: ValueKind::Double,
                found: ValueKind::Int,
            })
        ));
    }

    #[test]
    fn test_null_has_no_wire_representation() {
        let err = encode_value(&json!(null)).unwrap_err();
        assert_eq!(err.code(), "unknown_type");

        let err = encode_value(&json!([null, null])).unwrap_err();
        assert_eq!(err.code(), "unknown_type");
    }

    #[test]
    fn test_failed_member_aborts_dictionary_encode() {
        let state = json!({"good": 1, "bad": null});
        let Some(object) = state.as_object() else {
            unreachable!()
        };
        assert!(encode_dictionary(object).is_err());
    }

    #[test]
    fn test_heterogeneous_variant_list_decodes_generically() {
        let wire = Variant::VariantList(vec![
            Variant::Int(1),
            Variant::String("two".to_string()),
        ]);
        let decoded = decode_variant(&wire).unwrap();
        assert_eq!(decoded, json!([1, "two"]));

        // The decoded tree cannot re-encode: the lossy case is one-way.
        assert!(encode_value(&decoded).is_err());
    }

    #[test]
    fn test_decoded_homogeneous_variant_list_reshapes_on_reencode() {
        // A generic list of ints decodes fine but re-encodes as a typed
        // list, not the original variant shape.
        let wire = Variant::VariantList(vec![Variant::Int(1), Variant::Int(2)]);
        let decoded = decode_variant(&wire).unwrap();
        assert_eq!(decoded, json!([1, 2]));
        assert_eq!(
            encode_value(&decoded).unwrap(),
            Variant::IntList(vec![1, 2])
        );
    }

    #[test]
    fn test_non_finite_double_fails_decode() {
        let err = decode_variant(&Variant::Double(f64::NAN)).unwrap_err();
        assert_eq!(err.code(), "unknown_type");

        let err = decode_variant(&Variant::DoubleList(vec![1.0, f64::INFINITY])).unwrap_err();
        assert_eq!(
            err,
            CodecError::UnsupportedType {
                type_name: "list<double>".to_string(),
            }
        );
    }

    #[test]
    fn test_failed_element_aborts_list_decode() {
        let wire = Variant::VariantList(vec![
            Variant::Int(1),
            Variant::Double(f64::NAN),
            Variant::Int(3),
        ]);
        assert!(decode_variant(&wire).is_err());
    }

    #[test]
    fn test_wire_map_round_trip() {
        let state = json!({
            "on": true,
            "brightness": 70,
            "color": {"r": 255, "g": 128, "b": 0},
            "scenes": [{"name": "day"}, {"name": "night"}],
        });
        let Some(object) = state.as_object() else {
            unreachable!()
        };
        let wire = encode_dictionary(object).unwrap();
        assert_eq!(&decode_dictionary(&wire).unwrap(), object);
    }
}
