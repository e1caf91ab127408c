//! Typed access to untyped nested configuration
//!
//! Observed configuration is an arbitrarily nested JSON object. The helpers
//! here read and write values by [`ConfigPath`], creating intermediate maps
//! on write and refusing to overwrite non-map intermediates.

use serde_json::{Map, Value as JsonValue};

use crate::error::FieldError;
use crate::path::ConfigPath;

/// Untyped nested configuration, keyed by string at every level
pub type ObservedConfig = Map<String, JsonValue>;

/// Get a reference to the value at `path`
///
/// Returns `Ok(None)` when any key along the path is absent.
///
/// # Errors
/// Returns [`FieldError::NotAMap`] when an intermediate value is not an object
pub fn nested_field<'a>(
    obj: &'a ObservedConfig,
    path: &ConfigPath,
) -> Result<Option<&'a JsonValue>, FieldError> {
    let Some((leaf, parents)) = path.split_last() else {
        return Ok(None);
    };

    let mut current = obj;
    for segment in parents {
        match current.get(segment) {
            None => return Ok(None),
            Some(JsonValue::Object(map)) => current = map,
            Some(other) => {
                return Err(FieldError::NotAMap {
                    path: path.clone(),
                    segment: segment.clone(),
                    found: json_type_name(other),
                })
            }
        }
    }

    Ok(current.get(leaf))
}

/// Get a copy of the string list at `path`
///
/// Returns `Ok(None)` when the path is absent or holds `null`.
///
/// # Errors
/// Returns error if an intermediate is not a map or the leaf is not a list of strings
pub fn nested_string_slice(
    obj: &ObservedConfig,
    path: &ConfigPath,
) -> Result<Option<Vec<String>>, FieldError> {
    let Some(value) = nested_field(obj, path)? else {
        return Ok(None);
    };

    let not_a_slice = || FieldError::NotAStringSlice {
        path: path.clone(),
        found: value.to_string(),
        kind: json_type_name(value),
    };

    match value {
        JsonValue::Null => Ok(None),
        JsonValue::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(not_a_slice))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        _ => Err(not_a_slice()),
    }
}

/// Set `value` at `path`, creating intermediate maps as needed
///
/// An existing leaf is replaced regardless of its type.
///
/// # Errors
/// Returns [`FieldError::NotAMap`] if an existing intermediate is not an object,
/// and [`FieldError::EmptyPath`] for the root path
pub fn set_nested_field(
    obj: &mut ObservedConfig,
    value: JsonValue,
    path: &ConfigPath,
) -> Result<(), FieldError> {
    let (leaf, parents) = path.split_last().ok_or(FieldError::EmptyPath)?;

    let mut current = obj;
    for segment in parents {
        let entry = current
            .entry(segment.clone())
            .or_insert_with(|| JsonValue::Object(Map::new()));
        current = match entry {
            JsonValue::Object(map) => map,
            other => {
                return Err(FieldError::NotAMap {
                    path: path.clone(),
                    segment: segment.clone(),
                    found: json_type_name(other),
                })
            }
        };
    }

    current.insert(leaf.clone(), value);
    Ok(())
}

/// Set a list of strings at `path`
///
/// The list is always stored as a JSON array, even with a single element.
///
/// # Errors
/// See [`set_nested_field`]
pub fn set_nested_string_slice(
    obj: &mut ObservedConfig,
    values: &[String],
    path: &ConfigPath,
) -> Result<(), FieldError> {
    let array = values.iter().cloned().map(JsonValue::String).collect();
    set_nested_field(obj, JsonValue::Array(array), path)
}

/// Name of a JSON value's type, for error messages
#[must_use]
pub fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "map",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn as_config(value: JsonValue) -> ObservedConfig {
        match value {
            JsonValue::Object(map) => map,
            _ => panic!("test fixture must be an object"),
        }
    }

    fn provider_path() -> ConfigPath {
        ConfigPath::from_segments(&["extendedArguments", "cloud-provider"])
    }

    #[test]
    fn read_present_slice() {
        let config = as_config(json!({"extendedArguments": {"cloud-provider": ["aws"]}}));
        let values = nested_string_slice(&config, &provider_path()).unwrap();
        assert_eq!(values, Some(vec!["aws".to_string()]));
    }

    #[test]
    fn read_absent_slice() {
        let config = as_config(json!({"extendedArguments": {}}));
        assert_eq!(nested_string_slice(&config, &provider_path()).unwrap(), None);
        assert_eq!(nested_string_slice(&ObservedConfig::new(), &provider_path()).unwrap(), None);
    }

    #[test]
    fn read_scalar_is_not_a_slice() {
        let config = as_config(json!({"extendedArguments": {"cloud-provider": "aws"}}));
        let err = nested_string_slice(&config, &provider_path()).unwrap_err();
        assert!(matches!(err, FieldError::NotAStringSlice { kind: "string", .. }));
    }

    #[test]
    fn read_mixed_list_is_not_a_slice() {
        let config = as_config(json!({"extendedArguments": {"cloud-provider": ["aws", 1]}}));
        assert!(nested_string_slice(&config, &provider_path()).is_err());
    }

    #[test]
    fn read_through_scalar_fails() {
        let config = as_config(json!({"extendedArguments": "oops"}));
        let err = nested_string_slice(&config, &provider_path()).unwrap_err();
        assert!(matches!(err, FieldError::NotAMap { found: "string", .. }));
    }

    #[test]
    fn set_creates_intermediate_maps() {
        let mut config = ObservedConfig::new();
        set_nested_string_slice(&mut config, &["azure".to_string()], &provider_path()).unwrap();
        assert_eq!(
            JsonValue::Object(config),
            json!({"extendedArguments": {"cloud-provider": ["azure"]}})
        );
    }

    #[test]
    fn read_and_write_share_not_a_map_error() {
        let mut config = as_config(json!({"extendedArguments": "oops"}));
        let read = nested_string_slice(&config, &provider_path()).unwrap_err();
        let write =
            set_nested_string_slice(&mut config, &["aws".to_string()], &provider_path()).unwrap_err();
        assert_eq!(read, write);
    }

    #[test]
    fn set_keeps_sibling_keys() {
        let mut config = as_config(json!({"extendedArguments": {"other": ["x"]}}));
        set_nested_string_slice(&mut config, &["aws".to_string()], &provider_path()).unwrap();
        assert_eq!(
            JsonValue::Object(config),
            json!({"extendedArguments": {"other": ["x"], "cloud-provider": ["aws"]}})
        );
    }

    #[test]
    fn set_through_scalar_fails() {
        let mut config = as_config(json!({"extendedArguments": 7}));
        let err =
            set_nested_string_slice(&mut config, &["aws".to_string()], &provider_path()).unwrap_err();
        assert_eq!(
            err,
            FieldError::NotAMap {
                path: provider_path(),
                segment: "extendedArguments".to_string(),
                found: "number",
            }
        );
    }

    #[test]
    fn set_at_root_fails() {
        let mut config = ObservedConfig::new();
        let err = set_nested_field(&mut config, json!(1), &ConfigPath::new(Vec::new())).unwrap_err();
        assert_eq!(err, FieldError::EmptyPath);
    }

    proptest! {
        #[test]
        fn prop_set_then_read_returns_values(
            segments in prop::collection::vec("[a-zA-Z][a-zA-Z0-9-]{0,8}", 1..4),
            values in prop::collection::vec("[ -~]{0,12}", 0..4),
        ) {
            let path = ConfigPath::new(segments);
            let mut config = ObservedConfig::new();
            set_nested_string_slice(&mut config, &values, &path).unwrap();
            let read = nested_string_slice(&config, &path).unwrap();
            prop_assert_eq!(read, Some(values));
        }
    }
}
