//! Per-feature style composables
//!
//! Most features share one shape: read the feature's sub-tree from the merged
//! configuration, project it with the generic serializer, install the block.
//! Color and gradation carry extra behavior and live in their own modules.

pub mod color;
pub mod gradation;

use std::sync::Arc;

use serde_json::Value;
use shoji_core::{StateCell, StateRegistry};

use crate::config::ThemeConfig;
use crate::css;
use crate::stylesheet::StyleSheet;

/// Feature names handled by the generic projector, in initialization order.
pub const GENERIC_FEATURES: [&str; 9] = [
    "typography",
    "button",
    "tabs",
    "container",
    "forms",
    "header",
    "toast",
    "toolTip",
    "dropdownMenu",
];

/// Generic configuration-to-CSS composable for one feature.
pub struct FeatureStyles {
    name: &'static str,
    config: Arc<StateCell<Option<Value>>>,
}

impl FeatureStyles {
    pub fn new(name: &'static str, registry: &StateRegistry) -> Self {
        let config = registry.state(&format!("ui-{name}-config"), || None);
        Self { name, config }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Latest applied configuration, if the feature was configured.
    pub fn config(&self) -> Option<Value> {
        self.config.get()
    }

    /// Project and install this feature's styles.
    ///
    /// A missing sub-tree is tolerated: the feature stays uninitialized and
    /// `false` is returned.
    pub fn init(&self, app_config: &ThemeConfig, sheet: &dyn StyleSheet) -> bool {
        let Some(feature) = app_config.feature(self.name) else {
            tracing::debug!(feature = self.name, "not configured, skipping");
            return false;
        };
        self.apply(feature.clone(), sheet);
        true
    }

    /// Re-project at runtime (dynamic theme switching). The previous block is
    /// replaced, never duplicated.
    pub fn update(&self, config: Value, sheet: &dyn StyleSheet) {
        self.apply(config, sheet);
    }

    fn apply(&self, config: Value, sheet: &dyn StyleSheet) {
        let text = css::variables(self.name, &config);
        sheet.set_block(self.name, &text);
        self.config.set(Some(config));
        tracing::debug!(feature = self.name, "style block installed");
    }
}
