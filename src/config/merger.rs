//! Layered merging of YAML configuration values.
//!
//! The project config is loaded first and the local override is laid on top.
//!
//! # Merge Rules
//!
//! - Mappings are merged recursively
//! - Sequences and scalars in the overlay replace the base value
//! - `null` in the overlay removes the key from the base

use serde_yaml::Value;

/// Deep merge `overlay` onto `base`.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut result = base_map.clone();

            for (key, overlay_value) in overlay_map {
                if overlay_value.is_null() {
                    result.remove(key);
                } else if let Some(base_value) = base_map.get(key) {
                    result.insert(key.clone(), deep_merge(base_value, overlay_value));
                } else {
                    result.insert(key.clone(), overlay_value.clone());
                }
            }

            Value::Mapping(result)
        }

        // An empty override file parses to null; it changes nothing.
        (base, Value::Null) => base.clone(),

        (_, overlay) => overlay.clone(),
    }
}

/// Merge layers in order; later layers win.
pub fn merge_layers(layers: &[Value]) -> Value {
    layers
        .iter()
        .fold(Value::Mapping(Default::default()), |acc, layer| {
            deep_merge(&acc, layer)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn override_replaces_leaf_and_keeps_siblings() {
        let base = yaml(
            r#"
export:
  compression_level: 9
  archive_name: session.zip
"#,
        );
        let overlay = yaml(
            r#"
export:
  compression_level: 1
"#,
        );

        let result = deep_merge(&base, &overlay);

        assert_eq!(result["export"]["compression_level"], 1);
        assert_eq!(result["export"]["archive_name"], "session.zip");
    }

    #[test]
    fn null_removes_inherited_value() {
        let base = yaml(
            r#"
storage:
  marker: .custom
  atomic_writes: false
"#,
        );
        let overlay = yaml(
            r#"
storage:
  marker: null
"#,
        );

        let result = deep_merge(&base, &overlay);

        assert!(result["storage"].get("marker").is_none());
        assert_eq!(result["storage"]["atomic_writes"], false);
    }

    #[test]
    fn sequences_are_replaced() {
        let result = deep_merge(&yaml("tags: [a, b]"), &yaml("tags: [c]"));
        assert_eq!(result["tags"].as_sequence().unwrap().len(), 1);
    }

    #[test]
    fn empty_override_file_changes_nothing() {
        let base = yaml("storage:\n  marker: .x");
        let result = deep_merge(&base, &yaml(""));
        assert_eq!(result["storage"]["marker"], ".x");
    }

    #[test]
    fn merge_layers_applies_in_order() {
        let result = merge_layers(&[yaml("a: 1\nb: 2"), yaml("b: 3\nc: 4"), yaml("c: 5")]);

        assert_eq!(result["a"], 1);
        assert_eq!(result["b"], 3);
        assert_eq!(result["c"], 5);
    }
}
