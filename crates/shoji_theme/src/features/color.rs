//! Color tokens with derived opacity variants

use std::sync::Arc;

use serde_json::Value;
use shoji_core::{StateCell, StateRegistry};

use crate::config::ThemeConfig;
use crate::css;
use crate::stylesheet::StyleSheet;

const FEATURE: &str = "color";

/// Color composable: `--color-{name}` plus the opacity ladder per token.
pub struct ColorStyles {
    config: Arc<StateCell<Option<Value>>>,
}

impl ColorStyles {
    pub fn new(registry: &StateRegistry) -> Self {
        Self {
            config: registry.state("ui-color-config", || None),
        }
    }

    pub fn config(&self) -> Option<Value> {
        self.config.get()
    }

    pub fn init(&self, app_config: &ThemeConfig, sheet: &dyn StyleSheet) -> bool {
        let Some(colors) = app_config.feature(FEATURE) else {
            tracing::debug!(feature = FEATURE, "not configured, skipping");
            return false;
        };
        self.apply(colors.clone(), sheet);
        true
    }

    pub fn update(&self, config: Value, sheet: &dyn StyleSheet) {
        self.apply(config, sheet);
    }

    /// `var(--color-{name})` for a configured color, `None` otherwise.
    pub fn var_reference(&self, name: &str) -> Option<String> {
        self.config.with(|config| {
            let configured = config.as_ref()?.get(name)?;
            configured.as_str()?;
            Some(format!("var(--color-{})", shoji_core::camel_to_kebab(name)))
        })
    }

    fn apply(&self, config: Value, sheet: &dyn StyleSheet) {
        let text = css::color_variables(&config);
        sheet.set_block(FEATURE, &text);
        self.config.set(Some(config));
        tracing::debug!(feature = FEATURE, "style block installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stylesheet::MemoryStyleSheet;
    use serde_json::json;

    #[test]
    fn scenario_primary_with_opacity_ladder() {
        let registry = StateRegistry::new();
        let sheet = MemoryStyleSheet::new();
        let colors = ColorStyles::new(&registry);
        let config = ThemeConfig::with_overrides(json!({
            "color": { "primary": "#0C8CE9" },
        }));

        assert!(colors.init(&config, &sheet));
        let block = sheet.block("color").unwrap();
        assert!(block.contains("--color-primary: #0C8CE9;"));
        for (step, pct) in [("000", 0u8), ("003", 3), ("050", 50), ("100", 100)] {
            assert!(
                block.contains(&format!("--color-primary-{step}: rgb(12 140 233 / {pct}%);")),
                "missing step {step}"
            );
        }
    }

    #[test]
    fn var_reference_only_for_configured_names() {
        let registry = StateRegistry::new();
        let sheet = MemoryStyleSheet::new();
        let colors = ColorStyles::new(&registry);
        colors.init(&ThemeConfig::default(), &sheet);

        assert_eq!(colors.var_reference("primary").as_deref(), Some("var(--color-primary)"));
        assert_eq!(colors.var_reference("missing"), None);
    }

    #[test]
    fn update_replaces_block() {
        let registry = StateRegistry::new();
        let sheet = MemoryStyleSheet::new();
        let colors = ColorStyles::new(&registry);
        colors.update(json!({ "primary": "#000000" }), &sheet);
        colors.update(json!({ "primary": "#FFFFFF" }), &sheet);
        assert_eq!(sheet.len(), 1);
        assert!(sheet.block("color").unwrap().contains("--color-primary: #FFFFFF;"));
    }
}
