//! Modal overlay (single entry)

use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::result::{deferred, Deferred, OverlayResult, Resolver};

/// Backdrop darkness behind the modal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Backdrop {
    #[default]
    None,
    UltraSoft,
    Soft,
    Medium,
    Hard,
    Solid,
}

/// What to show and how to dim the page behind it.
#[derive(Clone, Debug, Default)]
pub struct ModalPayload {
    /// Registered component name to render.
    pub name: String,
    pub backdrop: Backdrop,
    pub blur: bool,
    pub options: Option<Value>,
}

impl ModalPayload {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn backdrop(mut self, backdrop: Backdrop) -> Self {
        self.backdrop = backdrop;
        self
    }

    pub fn blur(mut self, blur: bool) -> Self {
        self.blur = blur;
        self
    }

    pub fn options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }
}

struct Entry {
    payload: ModalPayload,
    resolver: Resolver,
}

/// At most one modal is open at a time; opening another supersedes the first,
/// resolving its caller with `Cancelled`.
#[derive(Clone, Default)]
pub struct Modal {
    slot: Arc<Mutex<Option<Entry>>>,
}

impl Modal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a modal. The returned deferred resolves when the modal closes.
    pub fn open(&self, payload: ModalPayload) -> Deferred {
        let (resolver, result) = deferred();
        let mut slot = self.slot.lock().unwrap();
        if let Some(mut previous) = slot.take() {
            tracing::debug!(name = %previous.payload.name, "modal superseded");
            previous.resolver.resolve(OverlayResult::Cancelled);
        }
        tracing::debug!(name = %payload.name, "modal opened");
        *slot = Some(Entry { payload, resolver });
        result
    }

    /// Close with the acknowledged default (`true`).
    pub fn close(&self) {
        self.close_with(OverlayResult::acknowledged());
    }

    /// Close with an explicit result. No-op when nothing is open.
    pub fn close_with(&self, result: impl Into<OverlayResult>) {
        let entry = self.slot.lock().unwrap().take();
        if let Some(mut entry) = entry {
            tracing::debug!(name = %entry.payload.name, "modal closed");
            entry.resolver.resolve(result.into());
        }
    }

    pub fn is_open(&self) -> bool {
        self.slot.lock().unwrap().is_some()
    }

    pub fn payload(&self) -> Option<ModalPayload> {
        self.slot.lock().unwrap().as_ref().map(|e| e.payload.clone())
    }

    pub fn name(&self) -> Option<String> {
        self.slot.lock().unwrap().as_ref().map(|e| e.payload.name.clone())
    }

    pub fn backdrop(&self) -> Option<Backdrop> {
        self.slot.lock().unwrap().as_ref().map(|e| e.payload.backdrop)
    }

    pub fn blur(&self) -> bool {
        self.slot
            .lock()
            .unwrap()
            .as_ref()
            .map_or(false, |e| e.payload.blur)
    }

    pub fn options(&self) -> Option<Value> {
        self.slot
            .lock()
            .unwrap()
            .as_ref()
            .and_then(|e| e.payload.options.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn open_then_close_resolves_once() {
        let modal = Modal::new();
        let pending = modal.open(ModalPayload::new("settings").blur(true));
        assert!(modal.is_open());
        assert_eq!(modal.name().as_deref(), Some("settings"));

        modal.close_with(json!({ "saved": true }));
        assert!(!modal.is_open());
        assert_eq!(pending.await, OverlayResult::Resolved(json!({ "saved": true })));
    }

    #[tokio::test]
    async fn close_without_open_is_a_no_op() {
        let modal = Modal::new();
        modal.close();
        assert!(!modal.is_open());
    }

    #[tokio::test]
    async fn reopening_supersedes_previous_caller() {
        let modal = Modal::new();
        let first = modal.open(ModalPayload::new("first"));
        let second = modal.open(ModalPayload::new("second"));

        assert_eq!(first.await, OverlayResult::Cancelled);
        assert_eq!(modal.name().as_deref(), Some("second"));

        modal.close();
        assert_eq!(second.await, OverlayResult::acknowledged());
    }
}
