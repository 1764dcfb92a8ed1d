//! Dialog overlay (alert / confirm / error, single entry)

use std::sync::{Arc, Mutex};

use crate::result::{deferred, Deferred, OverlayResult, Resolver};

/// Which dialog flavor is being shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogKind {
    Alert,
    Confirm,
    Error,
}

/// Well-known error conditions with default titles and messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    Network,
    Validation,
    BadRequest,
    AuthorizationRequired,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    TooManyRequests,
    Server,
    Unknown,
}

impl ErrorCode {
    /// Default human-readable text for the code.
    pub fn default_message(self) -> &'static str {
        match self {
            Self::Network => "Network Error",
            Self::Validation => "Validation Error",
            Self::BadRequest => "Bad Request",
            Self::AuthorizationRequired => "Authorization Required",
            Self::Forbidden => "Forbidden",
            Self::NotFound => "Not Found",
            Self::MethodNotAllowed => "Method Not Allowed",
            Self::TooManyRequests => "Too Many Requests",
            Self::Server => "Internal Server Error",
            Self::Unknown => "Unknown Error",
        }
    }

    /// Map an HTTP status to a code.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::AuthorizationRequired,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            405 => Self::MethodNotAllowed,
            429 => Self::TooManyRequests,
            500..=599 => Self::Server,
            _ => Self::Unknown,
        }
    }
}

/// Content of the currently open dialog.
#[derive(Clone, Debug)]
pub struct DialogPayload {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
    pub icon: String,
    pub ok_label: String,
    /// Present only for confirm dialogs.
    pub cancel_label: Option<String>,
}

impl DialogPayload {
    pub fn alert(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Alert,
            title: title.into(),
            message: message.into(),
            icon: String::new(),
            ok_label: "OK".to_string(),
            cancel_label: None,
        }
    }

    pub fn confirm(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Confirm,
            cancel_label: Some("Cancel".to_string()),
            ..Self::alert(title, message)
        }
    }

    /// Error dialog; empty message falls back to the code's default text.
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.is_empty() {
            code.default_message().to_string()
        } else {
            message
        };
        Self {
            kind: DialogKind::Error,
            title: code.default_message().to_string(),
            message,
            icon: "exclamation".to_string(),
            ok_label: "OK".to_string(),
            cancel_label: None,
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn ok_label(mut self, label: impl Into<String>) -> Self {
        self.ok_label = label.into();
        self
    }

    pub fn cancel_label(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = Some(label.into());
        self
    }
}

struct Entry {
    payload: DialogPayload,
    resolver: Resolver,
}

/// At most one dialog at a time; a new one supersedes the old (`Cancelled`).
#[derive(Clone, Default)]
pub struct Dialog {
    slot: Arc<Mutex<Option<Entry>>>,
}

impl Dialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show any dialog payload. Resolves `true` on plain close, `false` when
    /// the host closes with a negative result (confirm's cancel).
    pub fn open(&self, payload: DialogPayload) -> Deferred {
        let (resolver, result) = deferred();
        let mut slot = self.slot.lock().unwrap();
        if let Some(mut previous) = slot.take() {
            tracing::debug!(kind = ?previous.payload.kind, "dialog superseded");
            previous.resolver.resolve(OverlayResult::Cancelled);
        }
        tracing::debug!(kind = ?payload.kind, title = %payload.title, "dialog opened");
        *slot = Some(Entry { payload, resolver });
        result
    }

    pub fn alert(&self, payload: DialogPayload) -> Deferred {
        self.open(payload)
    }

    /// Close with the acknowledged default (`true`).
    pub fn close(&self) {
        self.close_with(OverlayResult::acknowledged());
    }

    /// Close with an explicit result. No-op when nothing is open.
    pub fn close_with(&self, result: impl Into<OverlayResult>) {
        let entry = self.slot.lock().unwrap().take();
        if let Some(mut entry) = entry {
            tracing::debug!(kind = ?entry.payload.kind, "dialog closed");
            entry.resolver.resolve(result.into());
        }
    }

    pub fn is_open(&self) -> bool {
        self.slot.lock().unwrap().is_some()
    }

    pub fn kind(&self) -> Option<DialogKind> {
        self.slot.lock().unwrap().as_ref().map(|e| e.payload.kind)
    }

    pub fn payload(&self) -> Option<DialogPayload> {
        self.slot.lock().unwrap().as_ref().map(|e| e.payload.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[tokio::test]
    async fn confirm_resolves_with_choice() {
        let dialog = Dialog::new();
        let answer = dialog.open(DialogPayload::confirm("Delete?", "This cannot be undone"));
        assert_eq!(dialog.kind(), Some(DialogKind::Confirm));

        dialog.close_with(false);
        assert_eq!(answer.await, OverlayResult::Resolved(Value::Bool(false)));
        assert!(!dialog.is_open());
    }

    #[tokio::test]
    async fn alert_defaults() {
        let payload = DialogPayload::alert("Done", "Saved");
        assert_eq!(payload.ok_label, "OK");
        assert!(payload.cancel_label.is_none());

        let dialog = Dialog::new();
        let answer = dialog.open(payload);
        dialog.close();
        assert_eq!(answer.await, OverlayResult::acknowledged());
    }

    #[test]
    fn error_defaults_from_code() {
        let payload = DialogPayload::error(ErrorCode::NotFound, "");
        assert_eq!(payload.title, "Not Found");
        assert_eq!(payload.message, "Not Found");
        assert_eq!(payload.icon, "exclamation");

        let custom = DialogPayload::error(ErrorCode::Server, "database unavailable");
        assert_eq!(custom.message, "database unavailable");
    }

    #[test]
    fn status_mapping() {
        assert_eq!(ErrorCode::from_status(404), ErrorCode::NotFound);
        assert_eq!(ErrorCode::from_status(503), ErrorCode::Server);
        assert_eq!(ErrorCode::from_status(418), ErrorCode::Unknown);
    }
}
