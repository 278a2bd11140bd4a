//! Parameter lookup within a single config document
//!
//! Mapping steps use the key as-is. Sequence steps accept a decimal index.

use serde_yaml::Value;

use super::error::ConfigError;
use super::path::ParamPath;

/// Navigate a document along `path` and return the entry found there
pub fn get_param<'a>(doc: &'a Value, path: &ParamPath) -> Result<&'a Value, ConfigError> {
    if path.is_empty() {
        return Err(ConfigError::entry_not_found(path));
    }

    let mut current = doc;
    for key in path.keys() {
        current = step(current, key).ok_or_else(|| ConfigError::entry_not_found(path))?;
    }
    Ok(current)
}

/// Mutable counterpart of [`get_param`]
pub fn get_param_mut<'a>(
    doc: &'a mut Value,
    path: &ParamPath,
) -> Result<&'a mut Value, ConfigError> {
    if path.is_empty() {
        return Err(ConfigError::entry_not_found(path));
    }

    let mut current = doc;
    for key in path.keys() {
        current = step_mut(current, key).ok_or_else(|| ConfigError::entry_not_found(path))?;
    }
    Ok(current)
}

/// True if `doc` is a mapping with `key` at its top level
pub fn contains_root_key(doc: &Value, key: &str) -> bool {
    match doc {
        Value::Mapping(map) => map.contains_key(key),
        Value::Tagged(tagged) => contains_root_key(&tagged.value, key),
        _ => false,
    }
}

fn step<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Mapping(map) => map.get(key),
        Value::Sequence(seq) => key.parse::<usize>().ok().and_then(|i| seq.get(i)),
        Value::Tagged(tagged) => step(&tagged.value, key),
        _ => None,
    }
}

fn step_mut<'a>(value: &'a mut Value, key: &str) -> Option<&'a mut Value> {
    match value {
        Value::Mapping(map) => map.get_mut(key),
        Value::Sequence(seq) => key.parse::<usize>().ok().and_then(move |i| seq.get_mut(i)),
        Value::Tagged(tagged) => step_mut(&mut tagged.value, key),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Value {
        serde_yaml::from_str(
            r#"
instruments:
  sg:
    address: TCPIP::10.0.0.5
    channels: [a, b, c]
  daq:
    rate: 1000
"#,
        )
        .unwrap()
    }

    fn path(keys: &[&str]) -> ParamPath {
        ParamPath::from(keys)
    }

    #[test]
    fn test_nested_lookup() {
        let doc = doc();
        let value = get_param(&doc, &path(&["instruments", "daq", "rate"])).unwrap();
        assert_eq!(value, &Value::from(1000));
    }

    #[test]
    fn test_sequence_index() {
        let doc = doc();
        let value = get_param(&doc, &path(&["instruments", "sg", "channels", "2"])).unwrap();
        assert_eq!(value, &Value::from("c"));
    }

    #[test]
    fn test_sequence_index_out_of_range() {
        let doc = doc();
        let err = get_param(&doc, &path(&["instruments", "sg", "channels", "7"])).unwrap_err();
        assert!(matches!(err, ConfigError::EntryNotFound { .. }));
    }

    #[test]
    fn test_missing_key_reports_full_path() {
        let doc = doc();
        let err = get_param(&doc, &path(&["instruments", "scope", "address"])).unwrap_err();
        match err {
            ConfigError::EntryNotFound { path: missing } => {
                assert_eq!(missing.to_string(), "instruments -> scope -> address");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_descending_into_scalar_fails() {
        let doc = doc();
        let err = get_param(&doc, &path(&["instruments", "daq", "rate", "unit"])).unwrap_err();
        assert!(matches!(err, ConfigError::EntryNotFound { .. }));
    }

    #[test]
    fn test_empty_path_fails() {
        let doc = doc();
        assert!(get_param(&doc, &ParamPath::default()).is_err());
    }

    #[test]
    fn test_get_param_mut_replaces_value() {
        let mut doc = doc();
        *get_param_mut(&mut doc, &path(&["instruments", "daq", "rate"])).unwrap() =
            Value::from(2000);
        assert_eq!(doc["instruments"]["daq"]["rate"], Value::from(2000));
    }

    #[test]
    fn test_contains_root_key() {
        let doc = doc();
        assert!(contains_root_key(&doc, "instruments"));
        assert!(!contains_root_key(&doc, "sg"));
        assert!(!contains_root_key(&Value::Null, "instruments"));
    }
}
