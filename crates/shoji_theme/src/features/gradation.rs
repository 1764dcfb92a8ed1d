//! Gradient tokens

use std::sync::Arc;

use serde_json::Value;
use shoji_core::{StateCell, StateRegistry};

use crate::config::ThemeConfig;
use crate::css;
use crate::stylesheet::StyleSheet;

const FEATURE: &str = "gradation";

/// Gradation composable: one `--gradation-{name}` variable per gradient.
pub struct GradationStyles {
    config: Arc<StateCell<Option<Value>>>,
}

impl GradationStyles {
    pub fn new(registry: &StateRegistry) -> Self {
        Self {
            config: registry.state("ui-gradation-config", || None),
        }
    }

    pub fn config(&self) -> Option<Value> {
        self.config.get()
    }

    pub fn init(&self, app_config: &ThemeConfig, sheet: &dyn StyleSheet) -> bool {
        let Some(gradations) = app_config.feature(FEATURE) else {
            tracing::debug!(feature = FEATURE, "not configured, skipping");
            return false;
        };
        self.apply(gradations.clone(), sheet);
        true
    }

    pub fn update(&self, config: Value, sheet: &dyn StyleSheet) {
        self.apply(config, sheet);
    }

    /// `var(--gradation-{name})` for a configured gradient, `None` otherwise.
    pub fn var_reference(&self, name: &str) -> Option<String> {
        self.config.with(|config| {
            config.as_ref()?.get(name)?;
            Some(format!("var(--gradation-{})", shoji_core::camel_to_kebab(name)))
        })
    }

    fn apply(&self, config: Value, sheet: &dyn StyleSheet) {
        let text = css::gradation_variables(&config);
        sheet.set_block(FEATURE, &text);
        self.config.set(Some(config));
        tracing::debug!(feature = FEATURE, "style block installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stylesheet::MemoryStyleSheet;

    #[test]
    fn init_and_reference() {
        let registry = StateRegistry::new();
        let sheet = MemoryStyleSheet::new();
        let gradations = GradationStyles::new(&registry);

        assert!(gradations.init(&ThemeConfig::default(), &sheet));
        assert!(sheet.block("gradation").unwrap().contains("--gradation-horizontal:"));
        assert_eq!(
            gradations.var_reference("horizontal").as_deref(),
            Some("var(--gradation-horizontal)")
        );
        assert_eq!(gradations.var_reference("diagonal"), None);
    }
}
