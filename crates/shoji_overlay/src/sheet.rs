//! Sheet overlay (bottom sheets, stacking)

use std::sync::{Arc, Mutex};

use crate::result::{deferred, Deferred, OverlayResult, Resolver};

/// Content of one open sheet.
#[derive(Clone, Debug)]
pub struct SheetPayload {
    pub name: String,
    pub options: serde_json::Value,
}

impl SheetPayload {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: serde_json::Value::Null,
        }
    }

    pub fn options(mut self, options: serde_json::Value) -> Self {
        self.options = options;
        self
    }
}

struct Entry {
    payload: SheetPayload,
    resolver: Resolver,
}

/// Sheets stack; only the top one is interactive, closing reveals the one
/// beneath it.
#[derive(Clone, Default)]
pub struct Sheets {
    stack: Arc<Mutex<Vec<Entry>>>,
}

impl Sheets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self, payload: SheetPayload) -> Deferred {
        let (resolver, result) = deferred();
        tracing::debug!(name = %payload.name, "sheet opened");
        self.stack
            .lock()
            .unwrap()
            .push(Entry { payload, resolver });
        result
    }

    /// Close the top sheet with the acknowledged default (`true`).
    pub fn close(&self) {
        self.close_with(OverlayResult::acknowledged());
    }

    /// Close the top sheet with an explicit result. No-op when empty.
    pub fn close_with(&self, result: impl Into<OverlayResult>) {
        let entry = self.stack.lock().unwrap().pop();
        if let Some(mut entry) = entry {
            tracing::debug!(name = %entry.payload.name, "sheet closed");
            entry.resolver.resolve(result.into());
        }
    }

    /// Close the sheet at a position in the stack (0 is the oldest).
    pub fn close_at(&self, index: usize, result: impl Into<OverlayResult>) {
        let mut stack = self.stack.lock().unwrap();
        if index < stack.len() {
            let mut entry = stack.remove(index);
            tracing::debug!(name = %entry.payload.name, "sheet closed");
            entry.resolver.resolve(result.into());
        }
    }

    /// Close everything, top first, resolving each `Cancelled`.
    pub fn close_all(&self) {
        let mut stack = self.stack.lock().unwrap();
        while let Some(mut entry) = stack.pop() {
            entry.resolver.resolve(OverlayResult::Cancelled);
        }
    }

    /// Payload of the top sheet.
    pub fn current(&self) -> Option<SheetPayload> {
        self.stack
            .lock()
            .unwrap()
            .last()
            .map(|e| e.payload.clone())
    }

    pub fn len(&self) -> usize {
        self.stack.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.lock().unwrap().is_empty()
    }

    pub fn is_open(&self) -> bool {
        !self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn stack_closes_top_first() {
        let sheets = Sheets::new();
        let filters = sheets.open(SheetPayload::new("filters"));
        let picker = sheets.open(SheetPayload::new("picker"));
        assert_eq!(sheets.current().unwrap().name, "picker");

        sheets.close_with(json!({"choice": "blue"}));
        assert_eq!(
            picker.await,
            OverlayResult::Resolved(json!({"choice": "blue"}))
        );
        assert_eq!(sheets.current().unwrap().name, "filters");

        sheets.close();
        assert_eq!(filters.await, OverlayResult::acknowledged());
        assert!(!sheets.is_open());
    }

    #[tokio::test]
    async fn close_at_removes_buried_sheet() {
        let sheets = Sheets::new();
        let bottom = sheets.open(SheetPayload::new("bottom"));
        sheets.open(SheetPayload::new("top"));

        sheets.close_at(0, false);
        assert_eq!(bottom.await, OverlayResult::Resolved(json!(false)));
        assert_eq!(sheets.current().unwrap().name, "top");
    }

    #[tokio::test]
    async fn close_all_cancels() {
        let sheets = Sheets::new();
        let a = sheets.open(SheetPayload::new("a"));
        let b = sheets.open(SheetPayload::new("b"));
        sheets.close_all();
        assert_eq!(a.await, OverlayResult::Cancelled);
        assert_eq!(b.await, OverlayResult::Cancelled);
        assert_eq!(sheets.len(), 0);
    }
}
