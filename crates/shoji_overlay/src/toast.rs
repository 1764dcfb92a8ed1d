//! Toast notifications (stacking, auto-hide timers)

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::AbortHandle;

/// Auto-hide delay applied when the payload does not set one.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);

/// Toast flavor, driving icon and palette in the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastKind {
    #[default]
    Text,
    Success,
    Error,
    Warning,
    Info,
}

/// Optional image shown alongside the message.
#[derive(Clone, Debug)]
pub struct ToastImage {
    pub src: String,
    /// Overlay a progress spinner on the image.
    pub processing: bool,
}

/// Content and behavior of one toast.
#[derive(Clone, Debug)]
pub struct ToastPayload {
    pub message: String,
    pub kind: ToastKind,
    pub icon: Option<String>,
    pub duration: Duration,
    /// Persistent toasts never auto-hide.
    pub persistent: bool,
    /// Whether the host shows a close affordance.
    pub dismissible: bool,
    pub image: Option<ToastImage>,
}

impl ToastPayload {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::default(),
            icon: None,
            duration: DEFAULT_DURATION,
            persistent: false,
            dismissible: true,
            image: None,
        }
    }

    pub fn kind(mut self, kind: ToastKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn persistent(mut self) -> Self {
        self.persistent = true;
        self
    }

    pub fn dismissible(mut self, dismissible: bool) -> Self {
        self.dismissible = dismissible;
        self
    }

    pub fn image(mut self, src: impl Into<String>, processing: bool) -> Self {
        self.image = Some(ToastImage {
            src: src.into(),
            processing,
        });
        self
    }
}

struct Entry {
    id: u64,
    payload: ToastPayload,
    timer: Option<AbortHandle>,
}

struct Inner {
    entries: Mutex<Vec<Entry>>,
    next_id: AtomicU64,
}

/// Toast stack. New toasts append; non-persistent ones auto-hide after their
/// duration when a tokio runtime is available.
#[derive(Clone)]
pub struct Toasts {
    inner: Arc<Inner>,
}

impl Default for Toasts {
    fn default() -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }
}

impl Toasts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a toast and return its id. Never fails; without a runtime the
    /// toast simply stays until hidden explicitly.
    pub fn show(&self, payload: ToastPayload) -> u64 {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(id, kind = ?payload.kind, "toast shown");
        // Spawned while the entries lock is held: the timer's removal cannot
        // run before the entry is in the list, even at zero duration.
        let mut entries = self.inner.entries.lock().unwrap();
        let timer = if payload.persistent {
            None
        } else {
            self.spawn_timer(id, payload.duration)
        };
        entries.push(Entry { id, payload, timer });
        id
    }

    fn spawn_timer(&self, id: u64, duration: Duration) -> Option<AbortHandle> {
        let Ok(handle) = Handle::try_current() else {
            tracing::warn!(id, "no async runtime, toast will not auto-hide");
            return None;
        };
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let task = handle.spawn(async move {
            tokio::time::sleep(duration).await;
            if let Some(inner) = weak.upgrade() {
                let mut entries = inner.entries.lock().unwrap();
                if let Some(index) = entries.iter().position(|e| e.id == id) {
                    tracing::debug!(id, "toast auto-hidden");
                    entries.remove(index);
                }
            }
        });
        Some(task.abort_handle())
    }

    /// Hide one toast by id. Cancels its pending timer first.
    pub fn hide(&self, id: u64) {
        let mut entries = self.inner.entries.lock().unwrap();
        if let Some(index) = entries.iter().position(|e| e.id == id) {
            let entry = entries.remove(index);
            if let Some(timer) = entry.timer {
                timer.abort();
            }
            tracing::debug!(id, "toast hidden");
        }
    }

    /// Hide every toast of one kind.
    pub fn hide_by_kind(&self, kind: ToastKind) {
        let mut entries = self.inner.entries.lock().unwrap();
        entries.retain(|e| {
            if e.payload.kind == kind {
                if let Some(timer) = &e.timer {
                    timer.abort();
                }
                false
            } else {
                true
            }
        });
    }

    pub fn hide_all(&self) {
        let mut entries = self.inner.entries.lock().unwrap();
        for entry in entries.drain(..) {
            if let Some(timer) = entry.timer {
                timer.abort();
            }
        }
    }

    pub fn get(&self, id: u64) -> Option<ToastPayload> {
        self.inner
            .entries
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.payload.clone())
    }

    /// Snapshot of visible toasts, oldest first.
    pub fn list(&self) -> Vec<(u64, ToastPayload)> {
        self.inner
            .entries
            .lock()
            .unwrap()
            .iter()
            .map(|e| (e.id, e.payload.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.lock().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn auto_hides_after_duration() {
        let toasts = Toasts::new();
        let id = toasts.show(ToastPayload::new("saved").duration(Duration::from_millis(2000)));
        assert!(toasts.get(id).is_some());

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(toasts.get(id).is_some());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(toasts.get(id).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn explicit_hide_cancels_timer() {
        let toasts = Toasts::new();
        let id = toasts.show(ToastPayload::new("saved").duration(Duration::from_millis(2000)));
        let keeper = toasts.show(ToastPayload::new("still here").persistent());

        tokio::time::sleep(Duration::from_millis(500)).await;
        toasts.hide(id);
        assert!(toasts.get(id).is_none());

        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert!(toasts.get(keeper).is_some());
        assert_eq!(toasts.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_duration_toast_still_auto_hides() {
        let toasts = Toasts::new();
        let id = toasts.show(ToastPayload::new("flash").duration(Duration::ZERO));
        assert!(toasts.get(id).is_some());

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(toasts.get(id).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn persistent_never_auto_hides() {
        let toasts = Toasts::new();
        let id = toasts.show(ToastPayload::new("uploading").persistent());
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(toasts.get(id).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn hide_by_kind_and_all() {
        let toasts = Toasts::new();
        toasts.show(ToastPayload::new("e1").kind(ToastKind::Error));
        let ok = toasts.show(ToastPayload::new("ok").kind(ToastKind::Success));
        toasts.show(ToastPayload::new("e2").kind(ToastKind::Error));

        toasts.hide_by_kind(ToastKind::Error);
        assert_eq!(toasts.list().len(), 1);
        assert_eq!(toasts.list()[0].0, ok);

        toasts.hide_all();
        assert!(toasts.is_empty());
    }

    #[test]
    fn show_without_runtime_keeps_toast() {
        let toasts = Toasts::new();
        let id = toasts.show(ToastPayload::new("offline"));
        assert!(toasts.get(id).is_some());
    }
}
