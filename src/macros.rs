/// Builds a [`Value`](crate::Value) tree from JSON-like syntax.
///
/// ```rust
/// use ktf::{doc, Value};
///
/// let v = doc!({ "kind": "Namespace", "metadata": { "name": "ns" } });
/// assert!(v.is_mapping());
/// ```
#[macro_export]
macro_rules! doc {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    // Handle true
    (true) => {
        $crate::Value::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty sequence
    ([]) => {
        $crate::Value::Sequence(vec![])
    };

    // Handle non-empty sequence
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Sequence(vec![$($crate::doc!($elem)),*])
    };

    // Handle empty mapping
    ({}) => {
        $crate::Value::Mapping($crate::Map::new())
    };

    // Handle non-empty mapping
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut mapping = $crate::Map::new();
        $(
            mapping.insert($key.to_string(), $crate::doc!($value));
        )*
        $crate::Value::Mapping(mapping)
    }};

    // Scalars go through `From`
    ($s:expr) => {
        $crate::Value::from($s)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Map, Number, Value};

    #[test]
    fn test_doc_macro_primitives() {
        assert_eq!(doc!(null), Value::Null);
        assert_eq!(doc!(true), Value::Bool(true));
        assert_eq!(doc!(false), Value::Bool(false));
        assert_eq!(doc!(42), Value::Number(Number::Integer(42)));
        assert_eq!(doc!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(doc!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_doc_macro_sequences() {
        assert_eq!(doc!([]), Value::Sequence(vec![]));

        match doc!([1, "two", 3]) {
            Value::Sequence(vec) => {
                assert_eq!(vec.len(), 3);
                assert_eq!(vec[1], Value::String("two".to_string()));
            }
            _ => panic!("Expected sequence"),
        }
    }

    #[test]
    fn test_doc_macro_mappings() {
        assert_eq!(doc!({}), Value::Mapping(Map::new()));

        match doc!({ "name": "web", "ports": [80, 443] }) {
            Value::Mapping(map) => {
                assert_eq!(map.len(), 2);
                assert_eq!(map.get("name"), Some(&Value::String("web".to_string())));
                assert!(map.get("ports").map(Value::is_sequence).unwrap_or(false));
            }
            _ => panic!("Expected mapping"),
        }
    }
}
