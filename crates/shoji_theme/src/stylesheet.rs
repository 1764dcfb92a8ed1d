//! Style block injection adapter
//!
//! Generated CSS lands in one block per feature, identified by a namespaced
//! marker (`data-ui="{feature}"` on a `<style>` element in a DOM host).
//! Re-applying a feature replaces its previous block, never duplicates it.

use std::sync::RwLock;

use indexmap::IndexMap;

/// Marker attribute namespace. A DOM host tags each generated `<style>`
/// element with `data-{DATA_KEY}="{feature}"` so it can be replaced later.
pub const DATA_KEY: &str = "ui";

/// Destination for generated style blocks, keyed by feature name.
///
/// Implementors must uphold the single-block invariant: after `set_block`,
/// exactly one block exists for that feature, holding the latest text.
pub trait StyleSheet: Send + Sync {
    /// Install `css` for `feature`, removing any previous block first.
    fn set_block(&self, feature: &str, css: &str);

    /// Remove the block for `feature`, if present.
    fn remove_block(&self, feature: &str);

    /// Current text of the block for `feature`.
    fn block(&self, feature: &str) -> Option<String>;

    /// Names of all installed blocks, in installation order.
    fn features(&self) -> Vec<String>;
}

/// In-memory style sheet for tests and headless hosts.
#[derive(Default)]
pub struct MemoryStyleSheet {
    blocks: RwLock<IndexMap<String, String>>,
}

impl MemoryStyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of installed blocks.
    pub fn len(&self) -> usize {
        self.blocks.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.read().unwrap().is_empty()
    }
}

impl StyleSheet for MemoryStyleSheet {
    fn set_block(&self, feature: &str, css: &str) {
        let mut blocks = self.blocks.write().unwrap();
        // Remove-then-insert keeps the block's position reflecting the latest
        // application order, matching a DOM host that re-appends the element.
        blocks.shift_remove(feature);
        blocks.insert(feature.to_string(), css.to_string());
    }

    fn remove_block(&self, feature: &str) {
        self.blocks.write().unwrap().shift_remove(feature);
    }

    fn block(&self, feature: &str) -> Option<String> {
        self.blocks.read().unwrap().get(feature).cloned()
    }

    fn features(&self) -> Vec<String> {
        self.blocks.read().unwrap().keys().cloned().collect()
    }
}
