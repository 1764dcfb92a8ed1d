//! Processing overlay (blocking progress indicator, single entry)

use std::sync::{Arc, Mutex};

use crate::result::{deferred, Deferred, OverlayResult, Resolver};

/// Content of the processing indicator.
#[derive(Clone, Debug)]
pub struct ProcessingPayload {
    pub message: String,
    pub icon: Option<String>,
    /// Show the indeterminate spinner.
    pub spinner: bool,
    /// `Some(0..=100)` for determinate progress.
    pub percent: Option<u8>,
}

impl ProcessingPayload {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            icon: None,
            spinner: true,
            percent: None,
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn spinner(mut self, spinner: bool) -> Self {
        self.spinner = spinner;
        self
    }

    pub fn percent(mut self, percent: u8) -> Self {
        self.percent = Some(percent.min(100));
        self
    }
}

struct Entry {
    payload: ProcessingPayload,
    resolver: Resolver,
}

/// At most one processing indicator; reopening supersedes the previous one.
#[derive(Clone, Default)]
pub struct Processing {
    slot: Arc<Mutex<Option<Entry>>>,
}

impl Processing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self, payload: ProcessingPayload) -> Deferred {
        let (resolver, result) = deferred();
        let mut slot = self.slot.lock().unwrap();
        if let Some(mut previous) = slot.take() {
            tracing::debug!("processing superseded");
            previous.resolver.resolve(OverlayResult::Cancelled);
        }
        tracing::debug!(message = %payload.message, "processing opened");
        *slot = Some(Entry { payload, resolver });
        result
    }

    /// Update message and progress in place without resetting the pending
    /// result. No-op when nothing is open.
    pub fn update(&self, payload: ProcessingPayload) {
        if let Some(entry) = self.slot.lock().unwrap().as_mut() {
            entry.payload = payload;
        }
    }

    /// Update only the progress percentage.
    pub fn set_percent(&self, percent: u8) {
        if let Some(entry) = self.slot.lock().unwrap().as_mut() {
            entry.payload.percent = Some(percent.min(100));
        }
    }

    pub fn close(&self) {
        self.close_with(OverlayResult::acknowledged());
    }

    pub fn close_with(&self, result: impl Into<OverlayResult>) {
        let entry = self.slot.lock().unwrap().take();
        if let Some(mut entry) = entry {
            tracing::debug!("processing closed");
            entry.resolver.resolve(result.into());
        }
    }

    pub fn is_open(&self) -> bool {
        self.slot.lock().unwrap().is_some()
    }

    pub fn payload(&self) -> Option<ProcessingPayload> {
        self.slot.lock().unwrap().as_ref().map(|e| e.payload.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn update_keeps_pending_result() {
        let processing = Processing::new();
        let done = processing.open(ProcessingPayload::new("Uploading"));

        processing.set_percent(40);
        assert_eq!(processing.payload().unwrap().percent, Some(40));
        processing.update(ProcessingPayload::new("Finalizing").percent(90));
        assert_eq!(processing.payload().unwrap().message, "Finalizing");

        processing.close();
        assert_eq!(done.await, OverlayResult::acknowledged());
    }

    #[tokio::test]
    async fn reopen_supersedes() {
        let processing = Processing::new();
        let first = processing.open(ProcessingPayload::new("one"));
        let _second = processing.open(ProcessingPayload::new("two"));
        assert_eq!(first.await, OverlayResult::Cancelled);
        assert_eq!(processing.payload().unwrap().message, "two");
    }

    #[test]
    fn percent_is_clamped() {
        assert_eq!(ProcessingPayload::new("x").percent(250).percent, Some(100));
    }
}
