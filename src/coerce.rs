//! Typed coercion of attribute values.
//!
//! Dispatch is total over [`CoercionKind`]. The rules are deliberately
//! asymmetric:
//!
//! | Kind         | Accepts                                  |
//! |--------------|------------------------------------------|
//! | `bool`       | booleans only (never `"true"`)           |
//! | `int`        | any number; floats are truncated         |
//! | `float`      | floats only                              |
//! | `string`     | strings, plus booleans and numbers as text |
//! | `string_map` | mappings whose values are all strings    |
//!
//! ```rust
//! use ktf::{coerce, AttrType, CoercionKind, Number, TypedValue, Value};
//!
//! let v = coerce(AttrType::scalar(CoercionKind::Int), &Value::from(3.5)).unwrap();
//! assert_eq!(v, TypedValue::Number(Number::Integer(3)));
//!
//! assert!(coerce(AttrType::scalar(CoercionKind::Bool), &Value::from("true")).is_err());
//! ```

use crate::{AttrType, CoercionKind, Error, Number, TypedValue, Value};
use std::collections::BTreeMap;

/// A value did not match the expected kind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("expected {expected}, got {found} (value {value})")]
pub struct Mismatch {
    pub expected: String,
    pub found: &'static str,
    pub value: String,
}

impl Mismatch {
    fn new(expected: impl Into<String>, value: &Value) -> Self {
        Mismatch {
            expected: expected.into(),
            found: value.type_name(),
            value: value.to_string(),
        }
    }

    fn non_finite(expected: &str, value: &Value) -> Self {
        Mismatch {
            found: "non-finite float",
            ..Mismatch::new(expected, value)
        }
    }

    /// Attaches the attribute name, producing [`Error::TypeMismatch`].
    #[must_use]
    pub fn for_attribute(self, attribute: &str) -> Error {
        Error::TypeMismatch {
            attribute: attribute.to_string(),
            expected: self.expected,
            found: self.found,
            value: self.value,
        }
    }
}

/// Coerces `value` to `ty`, element-wise for repeated attributes.
///
/// # Errors
///
/// Returns the first [`Mismatch`]; for lists that is the first bad element.
pub fn coerce(ty: AttrType, value: &Value) -> Result<TypedValue, Mismatch> {
    if !ty.repeated {
        return ty.kind.coerce(value);
    }
    match value {
        Value::Sequence(items) => items
            .iter()
            .map(|item| ty.kind.coerce(item))
            .collect::<Result<Vec<_>, _>>()
            .map(TypedValue::List),
        other => Err(Mismatch::new(ty.to_string(), other)),
    }
}

impl CoercionKind {
    /// Coerces a single value to this kind.
    ///
    /// # Errors
    ///
    /// Returns a [`Mismatch`] when the value's shape is not accepted.
    pub fn coerce(&self, value: &Value) -> Result<TypedValue, Mismatch> {
        match self {
            CoercionKind::Bool => to_bool(value),
            CoercionKind::Int => to_int(value),
            CoercionKind::Float => to_float(value),
            CoercionKind::String => to_string(value),
            CoercionKind::StringMap => to_string_map(value),
        }
    }
}

fn to_bool(value: &Value) -> Result<TypedValue, Mismatch> {
    match value {
        Value::Bool(b) => Ok(TypedValue::Bool(*b)),
        other => Err(Mismatch::new("bool", other)),
    }
}

fn to_int(value: &Value) -> Result<TypedValue, Mismatch> {
    match value {
        Value::Number(n @ Number::Integer(_)) | Value::Number(n @ Number::Unsigned(_)) => {
            Ok(TypedValue::Number(*n))
        }
        Value::Number(n @ Number::Float(_)) if !n.is_finite() => Err(Mismatch::non_finite("int", value)),
        // Truncates; the fractional part is not checked.
        Value::Number(Number::Float(f)) => Ok(TypedValue::Number(Number::Integer(*f as i64))),
        other => Err(Mismatch::new("int", other)),
    }
}

fn to_float(value: &Value) -> Result<TypedValue, Mismatch> {
    match value {
        Value::Number(n @ Number::Float(_)) if !n.is_finite() => Err(Mismatch::non_finite("float", value)),
        Value::Number(n @ Number::Float(_)) => Ok(TypedValue::Number(*n)),
        other => Err(Mismatch::new("float", other)),
    }
}

fn to_string(value: &Value) -> Result<TypedValue, Mismatch> {
    match value {
        Value::String(s) => Ok(TypedValue::String(s.clone())),
        // Unquoted scalars in manifests often stand for strings.
        Value::Bool(b) => Ok(TypedValue::String(b.to_string())),
        Value::Number(n) => Ok(TypedValue::String(n.to_string())),
        other => Err(Mismatch::new("string", other)),
    }
}

fn to_string_map(value: &Value) -> Result<TypedValue, Mismatch> {
    let map = match value {
        Value::Mapping(map) => map,
        other => return Err(Mismatch::new("string_map", other)),
    };
    let mut out = BTreeMap::new();
    for (key, v) in map {
        match v {
            Value::String(s) => {
                out.insert(key.clone(), s.clone());
            }
            other => return Err(Mismatch::new(format!("string for key {key:?}"), other)),
        }
    }
    Ok(TypedValue::StringMap(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;

    fn scalar(kind: CoercionKind, value: Value) -> Result<TypedValue, Mismatch> {
        coerce(AttrType::scalar(kind), &value)
    }

    #[test]
    fn test_bool_exact_only() {
        assert_eq!(scalar(CoercionKind::Bool, doc!(true)), Ok(TypedValue::Bool(true)));
        let err = scalar(CoercionKind::Bool, doc!("true")).unwrap_err();
        assert_eq!(err.expected, "bool");
        assert_eq!(err.found, "string");
        assert_eq!(err.value, "\"true\"");
        assert!(scalar(CoercionKind::Bool, doc!(1)).is_err());
    }

    #[test]
    fn test_int_truncates_floats() {
        assert_eq!(
            scalar(CoercionKind::Int, doc!(3.0)),
            Ok(TypedValue::Number(Number::Integer(3)))
        );
        assert_eq!(
            scalar(CoercionKind::Int, doc!(3.5)),
            Ok(TypedValue::Number(Number::Integer(3)))
        );
        assert_eq!(
            scalar(CoercionKind::Int, Value::Number(Number::Float(-2.9))),
            Ok(TypedValue::Number(Number::Integer(-2)))
        );
        assert_eq!(
            scalar(CoercionKind::Int, Value::from(u64::MAX)),
            Ok(TypedValue::Number(Number::Unsigned(u64::MAX)))
        );
        assert!(scalar(CoercionKind::Int, doc!("3")).is_err());
    }

    #[test]
    fn test_float_accepts_floats_only() {
        assert_eq!(
            scalar(CoercionKind::Float, doc!(0.5)),
            Ok(TypedValue::Number(Number::Float(0.5)))
        );
        let err = scalar(CoercionKind::Float, doc!(2)).unwrap_err();
        assert_eq!(err.found, "integer");
    }

    #[test]
    fn test_non_finite_floats_are_rejected() {
        for value in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            for kind in [CoercionKind::Float, CoercionKind::Int] {
                let err = scalar(kind, Value::from(value)).unwrap_err();
                assert_eq!(err.expected, kind.as_str());
                assert_eq!(err.found, "non-finite float");
            }
        }

        let yaml: Value = serde_yaml::from_str("[.inf, .nan]").unwrap();
        let err = coerce(AttrType::list(CoercionKind::Float), &yaml).unwrap_err();
        assert_eq!(err.found, "non-finite float");
        assert_eq!(err.value, "inf");
    }

    #[test]
    fn test_string_is_lenient() {
        assert_eq!(
            scalar(CoercionKind::String, doc!(true)),
            Ok(TypedValue::String("true".to_string()))
        );
        assert_eq!(
            scalar(CoercionKind::String, doc!(8080)),
            Ok(TypedValue::String("8080".to_string()))
        );
        assert_eq!(
            scalar(CoercionKind::String, doc!(1.0)),
            Ok(TypedValue::String("1".to_string()))
        );
        assert!(scalar(CoercionKind::String, doc!(null)).is_err());
        assert!(scalar(CoercionKind::String, doc!(["a"])).is_err());
    }

    #[test]
    fn test_string_map() {
        let got = scalar(CoercionKind::StringMap, doc!({ "b": "2", "a": "1" })).unwrap();
        let mut want = BTreeMap::new();
        want.insert("a".to_string(), "1".to_string());
        want.insert("b".to_string(), "2".to_string());
        assert_eq!(got, TypedValue::StringMap(want));

        let err = scalar(CoercionKind::StringMap, doc!({ "a": "1", "n": 5 })).unwrap_err();
        assert_eq!(err.found, "integer");
        assert_eq!(err.value, "5");
        assert!(err.expected.contains("\"n\""));
    }

    #[test]
    fn test_repeated_preserves_order_and_fails_fast() {
        let ty = AttrType::list(CoercionKind::String);
        assert_eq!(
            coerce(ty, &doc!(["b", "a", 1])),
            Ok(TypedValue::List(vec![
                TypedValue::String("b".to_string()),
                TypedValue::String("a".to_string()),
                TypedValue::String("1".to_string()),
            ]))
        );

        let err = coerce(AttrType::list(CoercionKind::Int), &doc!([1, "x", true])).unwrap_err();
        assert_eq!(err.found, "string");

        let err = coerce(ty, &doc!("a")).unwrap_err();
        assert_eq!(err.expected, "list of string");
    }

    #[test]
    fn test_for_attribute() {
        let err = scalar(CoercionKind::Bool, doc!("yes"))
            .unwrap_err()
            .for_attribute("immutable");
        assert!(matches!(err, Error::TypeMismatch { ref attribute, .. } if attribute == "immutable"));
    }
}
