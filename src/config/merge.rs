//! Config merge logic
//!
//! Flattens several config documents into one with:
//! - Mappings: deep-merge by key
//! - Sequences: REPLACE (last wins)
//! - Scalars: override (last wins)

use std::mem;

use serde_yaml::{Mapping, Value};

/// Deep merge two YAML values.
///
/// Merge semantics:
/// - Mappings: deep-merge by key (recursive)
/// - Sequences: REPLACE (second wins entirely)
/// - Scalars: override (second wins)
/// - Null: override (null can override any value)
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(mut base_map), Value::Mapping(overlay_map)) => {
            // Merge in place so keys keep their position from the base document
            for (key, overlay_value) in overlay_map {
                if let Some(slot) = base_map.get_mut(&key) {
                    let base_value = mem::replace(slot, Value::Null);
                    *slot = deep_merge(base_value, overlay_value);
                } else {
                    base_map.insert(key, overlay_value);
                }
            }
            Value::Mapping(base_map)
        }

        (Value::Sequence(_), overlay @ Value::Sequence(_)) => overlay,

        (_, overlay) => overlay,
    }
}

/// Merge documents in order (first is base, last has highest precedence).
///
/// Documents that are not mappings, such as empty files, are skipped.
pub fn merge_documents<I>(docs: I) -> Value
where
    I: IntoIterator<Item = Value>,
{
    docs.into_iter()
        .filter(Value::is_mapping)
        .fold(Value::Mapping(Mapping::new()), deep_merge)
}
