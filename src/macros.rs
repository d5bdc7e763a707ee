#[macro_export]
macro_rules! value {
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
        $crate::Value::Sequence(vec![$($crate::value!($elem)),*])
    };

    // Handle empty mapping
    ({}) => {
        $crate::Value::Mapping($crate::Map::new())
    };

    // Handle non-empty mapping
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut mapping = $crate::Map::new();
        $(
            mapping.insert($key.to_string(), $crate::value!($value));
        )*
        $crate::Value::Mapping(mapping)
    }};

    // Fallback for any expression; From covers the scalar literals
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Map, Number, Value};

    #[test]
    fn value_macro_primitives() {
        assert_eq!(crate::value!(null), Value::Null);
        assert_eq!(crate::value!(true), Value::Bool(true));
        assert_eq!(crate::value!(false), Value::Bool(false));
        assert_eq!(crate::value!(42), Value::Number(Number::Integer(42)));
        assert_eq!(crate::value!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(crate::value!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn value_macro_sequences() {
        assert_eq!(crate::value!([]), Value::Sequence(vec![]));

        let seq = crate::value!([1, "two", null]);
        match seq {
            Value::Sequence(elements) => {
                assert_eq!(elements.len(), 3);
                assert_eq!(elements[0], Value::Number(Number::Integer(1)));
                assert_eq!(elements[1], Value::String("two".to_string()));
                assert_eq!(elements[2], Value::Null);
            }
            _ => panic!("Expected sequence"),
        }
    }

    #[test]
    fn value_macro_mappings() {
        assert_eq!(crate::value!({}), Value::Mapping(Map::new()));

        let doc = crate::value!({
            "title": "Widgets",
            "count": 30,
            "paths": { "/widgets": { "$ref": "./paths/widgets.yaml" } }
        });

        match doc {
            Value::Mapping(map) => {
                assert_eq!(map.len(), 3);
                assert_eq!(map.get("title"), Some(&Value::String("Widgets".to_string())));
                assert_eq!(map.get("count"), Some(&Value::Number(Number::Integer(30))));
                assert!(map.get("paths").is_some_and(Value::is_mapping));
            }
            _ => panic!("Expected mapping"),
        }
    }
}
