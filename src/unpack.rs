// Author: Dustin Pilgrim
// License: MIT

use tracing::trace;

use crate::ast::Value;
use crate::TsonError;

/// Object key whose object value is spread into the containing object.
pub const UNPACK_KEY: &str = "*";

/// Merge every `"*"` entry into its containing object, at every nesting level.
///
/// Keys already present in the containing object are never overwritten. A
/// spread may bring in another `"*"` key, so each object is unpacked until none
/// is left before its children are visited.
///
/// # Errors
/// Returns a `TypeError` if a `"*"` value is not an object.
pub fn unpack(node: &mut Value) -> Result<(), TsonError> {
    match node {
        Value::Object(items) => {
            while let Some(spread) = items.shift_remove(UNPACK_KEY) {
                let src = match spread {
                    Value::Object(src) => src,
                    other => {
                        return Err(TsonError::type_error(
                            format!("can only unpack an object, found {}", other.type_name()),
                            Some("The value of a \"*\" key must be an object"),
                            410,
                        ));
                    }
                };

                for (key, value) in src {
                    if !items.contains_key(&key) {
                        trace!(key = %key, "unpacking key");
                        items.insert(key, value);
                    }
                }
            }

            for child in items.values_mut() {
                if child.is_structured() {
                    unpack(child)?;
                }
            }
        }
        Value::Array(elements) => {
            for child in elements.iter_mut() {
                if child.is_structured() {
                    unpack(child)?;
                }
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::parser::parse_document;

    fn parse(input: &str) -> Value {
        parse_document(input).unwrap()
    }

    fn unpacked(input: &str) -> Result<Value, TsonError> {
        let mut value = parse(input);
        unpack(&mut value)?;
        Ok(value)
    }

    #[test]
    fn test_plain_document_unchanged() {
        let input = r#"{"a": [1, {"b": null}], "c": {"d": "e"}}"#;
        assert_eq!(unpacked(input), Ok(parse(input)));
    }

    #[test]
    fn test_existing_keys_win() {
        let value = unpacked(r#"{"a": 1, "*": {"a": 2, "b": 3}}"#).unwrap();
        assert_eq!(value, parse(r#"{"a": 1, "b": 3}"#));
    }

    #[test]
    fn test_spread_before_key_still_loses() {
        let value = unpacked(r#"{"*": {"a": 2}, "a": 1}"#).unwrap();
        assert_eq!(value.get("a").and_then(Value::as_i64), Some(1));
    }

    #[test]
    fn test_chained_unpack() {
        let value = unpacked(r#"{"*": {"*": {"c": 4}}}"#).unwrap();
        assert_eq!(value, parse(r#"{"c": 4}"#));
    }

    #[test]
    fn test_chained_precedence() {
        // outer spread entries take precedence over the spread they carry
        let value = unpacked(r#"{"x": 0, "*": {"x": 1, "y": 1, "*": {"x": 2, "y": 2, "z": 2}}}"#).unwrap();
        assert_eq!(value, parse(r#"{"x": 0, "y": 1, "z": 2}"#));
    }

    #[test]
    fn test_unpack_inside_arrays() {
        let value = unpacked(r#"{"a": [{"*": {"b": 1}}]}"#).unwrap();
        assert_eq!(value, parse(r#"{"a": [{"b": 1}]}"#));
    }

    #[test]
    fn test_unpack_in_merged_children() {
        let value = unpacked(r#"{"*": {"inner": {"*": {"deep": true}}}}"#).unwrap();
        assert_eq!(value, parse(r#"{"inner": {"deep": true}}"#));
    }

    #[test]
    fn test_top_level_array() {
        let value = unpacked(r#"[[{"*": {"k": 1}}], 5]"#).unwrap();
        assert_eq!(value, parse(r#"[[{"k": 1}], 5]"#));
    }

    #[test]
    fn test_key_order_after_unpack() {
        let value = unpacked(r#"{"first": 1, "*": {"second": 2, "first": 9}, "third": 3}"#).unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["first", "third", "second"]);
    }

    #[test]
    fn test_non_object_spread_fails() {
        let err = unpacked(r#"{"*": "not-an-object"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert_eq!(err.code(), Some(410));
        assert!(err.to_string().contains("can only unpack an object"));
    }

    #[test]
    fn test_nested_non_object_spread_fails() {
        assert!(unpacked(r#"{"a": [{"*": [1]}]}"#).is_err());
        assert!(unpacked(r#"{"*": {"*": null}}"#).is_err());
    }

    #[test]
    fn test_spread_key_in_array_is_plain_string() {
        let input = r#"["*", {"k": "*"}]"#;
        assert_eq!(unpacked(input), Ok(parse(input)));
    }
}
