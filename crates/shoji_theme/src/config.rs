//! Merged theme configuration
//!
//! Built once at startup from the built-in defaults plus a user override tree,
//! deep-merged so overrides replace only the leaves they specify. Treated as
//! immutable afterwards; application code reads it exclusively through the
//! per-feature accessors, never by traversing the raw tree.

use serde_json::{json, Value};
use shoji_core::{deep_merge, Result, UiError};

/// The merged application theme configuration.
#[derive(Clone, Debug)]
pub struct ThemeConfig {
    root: Value,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self { root: defaults() }
    }
}

impl ThemeConfig {
    /// Defaults merged with a user override tree. Plain objects merge key by
    /// key; arrays and scalars from the override win wholesale.
    pub fn with_overrides(overrides: Value) -> Self {
        let mut root = defaults();
        deep_merge(&mut root, &overrides);
        Self { root }
    }

    /// Load an override tree from TOML text and merge it over the defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let overrides: Value =
            toml::from_str(text).map_err(|e| UiError::InvalidConfig(e.to_string()))?;
        Ok(Self::with_overrides(overrides))
    }

    /// The configuration sub-tree for one feature, or `None` when the feature
    /// is not configured (a tolerated, soft condition).
    pub fn feature(&self, name: &str) -> Option<&Value> {
        self.root.get(name).filter(|v| !v.is_null())
    }

    /// The whole merged tree. Prefer [`ThemeConfig::feature`].
    pub fn root(&self) -> &Value {
        &self.root
    }
}

/// Built-in default theme.
///
/// Values mirror the stock look; hosts override leaves through
/// [`ThemeConfig::with_overrides`].
pub fn defaults() -> Value {
    json!({
        "breakPoint": {
            "xxl": "1680px",
            "xl": "1280px",
            "l": "1024px",
            "m": "680px",
            "s": "430px",
            "xs": "0px",
            "base": "m",
        },
        "color": {
            "primary": "#0C8CE9",
            "dark": "#2D2E31",
            "light": "#FFFFFF",
            "danger": "#E90C41",
            "success": "#0C8CE9",
            "link": "#277BDB",
            "background": "#2D2E31",
            "text": "#FFFFFF",
            "control": "#0C8CE9",
            "indicator": "#FFFFFF",
        },
        "gradation": {
            "special": "linear-gradient(221.59deg, #ffc000 9.16%, #ff4900 45.33%, #ff071f 76.02%, #db0000 100%)",
            "vertical": "linear-gradient(180deg, #ff6200 0%, #ff071f 100%)",
            "horizontal": "linear-gradient(90deg, #ff071f 0%, #ff6200 100%)",
        },
        "typography": {
            "font": {
                "family": {
                    "base": "Hiragino Sans, sans-serif",
                    "serif": "serif",
                    "en": "Helvetica Neue, sans-serif",
                },
                "weight": {
                    "normal": 400,
                    "bold": 700,
                },
            },
        },
        "button": {
            "primary": {
                "textColor": "color-light",
                "backgroundColor": "gradation-horizontal",
                "backgroundBlur": "0",
                "borderWidth": "0",
                "borderColor": "transparent",
            },
            "secondary": {
                "textColor": "color-dark",
                "backgroundColor": "color-light",
                "backgroundBlur": "0",
                "borderWidth": "0",
                "borderColor": "transparent",
            },
            "tertiary": {
                "textColor": "color-text",
                "backgroundColor": "color-text-010",
                "backgroundBlur": "20px",
                "borderWidth": "0",
                "borderColor": "transparent",
            },
        },
        "container": {
            "base": { "maxWidth": "1080px", "sideSpace": "40px" },
            "wide": { "maxWidth": "1280px", "sideSpace": "40px" },
            "narrow": { "maxWidth": "800px", "sideSpace": "40px" },
        },
        "tabs": {
            "height": "48px",
            "barRadius": "2px",
            "barHeight": "2px",
            "barColor": "color-primary",
            "barBackgroundHeight": "1px",
            "barBackgroundColor": "color-text-010",
        },
        "toast": {
            "textColor": "color-dark",
            "backgroundColor": "color-light",
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_preserve_unspecified_defaults() {
        let config = ThemeConfig::with_overrides(json!({
            "color": { "primary": "#FF0000" },
        }));
        let color = config.feature("color").unwrap();
        assert_eq!(color["primary"], "#FF0000");
        assert_eq!(color["dark"], "#2D2E31");
    }

    #[test]
    fn missing_feature_is_none() {
        let config = ThemeConfig::default();
        assert!(config.feature("header").is_none());
        assert!(config.feature("color").is_some());
    }

    #[test]
    fn from_toml_overrides() {
        let config = ThemeConfig::from_toml_str(
            r##"
            [color]
            primary = "#123456"
            "##,
        )
        .unwrap();
        assert_eq!(config.feature("color").unwrap()["primary"], "#123456");
    }

    #[test]
    fn bad_toml_is_invalid_config() {
        assert!(ThemeConfig::from_toml_str("color = [").is_err());
    }
}
