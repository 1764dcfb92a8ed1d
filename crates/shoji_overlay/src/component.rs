//! Registry mapping host component types to overlay content names

use std::any::{type_name, TypeId};
use std::sync::{Arc, RwLock};

use rustc_hash::FxHashMap;
use shoji_core::{Result, UiError};

/// Maps Rust component types to the names overlays are opened by. Lookups
/// for unregistered types fail loudly instead of rendering nothing.
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    inner: Arc<RwLock<FxHashMap<TypeId, String>>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component type under the name overlays refer to it by.
    /// Re-registering replaces the previous name.
    pub fn register<T: 'static>(&self, name: impl Into<String>) {
        let name = name.into();
        tracing::debug!(component = type_name::<T>(), name = %name, "component registered");
        self.inner.write().unwrap().insert(TypeId::of::<T>(), name);
    }

    /// Resolve the registered name for a component type.
    pub fn name_of<T: 'static>(&self) -> Result<String> {
        self.inner
            .read()
            .unwrap()
            .get(&TypeId::of::<T>())
            .cloned()
            .ok_or_else(|| UiError::UnknownComponent(type_name::<T>().to_string()))
    }

    /// Whether any type has been registered under this name.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.read().unwrap().values().any(|n| n == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LoginPanel;
    struct SharePanel;

    #[test]
    fn lookup_round_trip() {
        let registry = ComponentRegistry::new();
        registry.register::<LoginPanel>("login");
        registry.register::<SharePanel>("share");

        assert_eq!(registry.name_of::<LoginPanel>().unwrap(), "login");
        assert!(registry.contains("share"));
        assert!(!registry.contains("settings"));
    }

    #[test]
    fn unregistered_type_errors() {
        let registry = ComponentRegistry::new();
        let err = registry.name_of::<LoginPanel>().unwrap_err();
        assert!(matches!(err, UiError::UnknownComponent(name) if name.contains("LoginPanel")));
    }

    #[test]
    fn reregister_replaces() {
        let registry = ComponentRegistry::new();
        registry.register::<LoginPanel>("login");
        registry.register::<LoginPanel>("sign-in");
        assert_eq!(registry.name_of::<LoginPanel>().unwrap(), "sign-in");
    }
}
