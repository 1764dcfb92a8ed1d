//! Helpers over the nested configuration value tree
//!
//! The theme configuration is a plain-data tree (`serde_json::Value`). User
//! overrides are merged structurally: plain objects merge key by key, while
//! arrays and primitives replace the default wholesale.

use serde_json::Value;

/// True for a plain object; arrays are objects in some hosts but never here.
pub fn is_plain_object(value: &Value) -> bool {
    value.is_object()
}

/// Recursively merge `overlay` into `base`.
///
/// Object leaves merge; scalar and array leaves from `overlay` win. Keys only
/// present in `base` are preserved.
pub fn deep_merge(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(base_value) if base_value.is_object() && overlay_value.is_object() => {
                        deep_merge(base_value, overlay_value);
                    }
                    _ => {
                        base_map.insert(key.clone(), overlay_value.clone());
                    }
                }
            }
        }
        (base, overlay) => *base = overlay.clone(),
    }
}
