//! Pure projection from configuration trees to CSS custom properties
//!
//! Variable naming contract: `--{kebab-feature}-{kebab-nested-path}`. A string
//! leaf whose value names a token of a reserved family (`color-*`,
//! `gradation-*`) is emitted as a reference, `var(--value)`, instead of a
//! literal, so features can point at each other's tokens symbolically.

use std::fmt::Write;

use serde_json::Value;
use shoji_core::{camel_to_kebab, Rgb};

/// Token families whose names are rendered as `var(--…)` references.
pub const RESERVED_FAMILIES: [&str; 2] = ["color", "gradation"];

/// Opacity ladder emitted for every named color, in percent.
pub const OPACITY_STEPS: [u8; 15] = [0, 3, 5, 7, 10, 15, 20, 30, 40, 50, 60, 70, 80, 90, 100];

/// Serialize a feature's configuration sub-tree into a `:root { … }` block.
///
/// Nested objects recurse with an accumulating dash-joined prefix. Arrays are
/// not supported as nested containers and are skipped.
pub fn variables(feature: &str, config: &Value) -> String {
    let mut body = String::new();
    emit(&mut body, &camel_to_kebab(feature), config);
    format!(":root {{\n{body}}}\n")
}

fn emit(out: &mut String, prefix: &str, value: &Value) {
    let Some(map) = value.as_object() else {
        tracing::warn!(prefix, "expected an object sub-tree, skipping");
        return;
    };
    for (key, entry) in map {
        let name = format!("{prefix}-{}", camel_to_kebab(key));
        match entry {
            Value::Object(_) => emit(out, &name, entry),
            Value::Array(_) => {
                tracing::warn!(name, "arrays are not supported in theme configuration, skipping");
            }
            leaf => {
                let _ = writeln!(out, "\t--{name}: {};", leaf_text(leaf));
            }
        }
    }
}

fn leaf_text(value: &Value) -> String {
    match value {
        Value::String(s) if is_token_reference(s) => format!("var(--{s})"),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Whether a leaf value names a token of a reserved family.
pub fn is_token_reference(value: &str) -> bool {
    RESERVED_FAMILIES
        .iter()
        .any(|family| value.contains(&format!("{family}-")))
}

/// Color projection: base variable plus the fixed opacity ladder.
///
/// Invalid hex values still emit the base variable but no variants.
pub fn color_variables(config: &Value) -> String {
    let mut body = String::new();
    if let Some(map) = config.as_object() {
        for (name, value) in map {
            let Some(hex) = value.as_str() else { continue };
            let key = camel_to_kebab(name);
            let _ = writeln!(body, "\t--color-{key}: {hex};");
            let Some(rgb) = Rgb::parse_hex(hex) else { continue };
            for step in OPACITY_STEPS {
                let _ = writeln!(
                    body,
                    "\t--color-{key}-{step:03}: {};",
                    rgb.css_with_opacity(step)
                );
            }
        }
    }
    format!(":root {{\n{body}}}\n")
}

/// Gradation projection: one variable per named gradient, value verbatim.
pub fn gradation_variables(config: &Value) -> String {
    let mut body = String::new();
    if let Some(map) = config.as_object() {
        for (name, value) in map {
            let Some(gradient) = value.as_str() else { continue };
            let _ = writeln!(body, "\t--gradation-{}: {gradient};", camel_to_kebab(name));
        }
    }
    format!(":root {{\n{body}}}\n")
}
