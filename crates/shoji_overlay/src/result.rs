//! Deferred overlay results
//!
//! Opening an overlay returns a [`Deferred`] the caller awaits; the matching
//! `close` resolves it through the [`Resolver`] stored in the entry record.
//! A resolver fires exactly once: the sender is consumed on first use, and a
//! dropped resolver (entry superseded or manager torn down) surfaces as
//! [`OverlayResult::Cancelled`] rather than a hang.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use serde_json::Value;
use tokio::sync::oneshot;

/// Outcome delivered to the caller that opened an overlay.
#[derive(Clone, Debug, PartialEq)]
pub enum OverlayResult {
    /// The overlay was closed with a value (acknowledgement, form data, …).
    Resolved(Value),
    /// The overlay was dismissed without an answer.
    Cancelled,
}

impl OverlayResult {
    /// The positive default: `Resolved(true)`.
    pub fn acknowledged() -> Self {
        OverlayResult::Resolved(Value::Bool(true))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, OverlayResult::Cancelled)
    }

    /// The carried value, if resolved.
    pub fn value(&self) -> Option<&Value> {
        match self {
            OverlayResult::Resolved(value) => Some(value),
            OverlayResult::Cancelled => None,
        }
    }
}

impl From<Value> for OverlayResult {
    fn from(value: Value) -> Self {
        OverlayResult::Resolved(value)
    }
}

impl From<bool> for OverlayResult {
    fn from(value: bool) -> Self {
        OverlayResult::Resolved(Value::Bool(value))
    }
}

/// Create a linked resolver/deferred pair.
pub fn deferred() -> (Resolver, Deferred) {
    let (tx, rx) = oneshot::channel();
    (Resolver(Some(tx)), Deferred { rx })
}

/// The close-side half, stored inside an overlay entry.
pub struct Resolver(Option<oneshot::Sender<OverlayResult>>);

impl Resolver {
    /// Deliver the result. Returns `false` if this resolver already fired.
    /// The receiver may be gone (caller dropped the future); that is fine.
    pub fn resolve(&mut self, result: OverlayResult) -> bool {
        match self.0.take() {
            Some(tx) => {
                let _ = tx.send(result);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Resolver").field(&self.0.is_some()).finish()
    }
}

/// The await-side half, returned from `open`.
#[derive(Debug)]
pub struct Deferred {
    rx: oneshot::Receiver<OverlayResult>,
}

impl Future for Deferred {
    type Output = OverlayResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|result| result.unwrap_or(OverlayResult::Cancelled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_with_sent_value() {
        let (mut resolver, deferred) = deferred();
        assert!(resolver.resolve(OverlayResult::acknowledged()));
        assert_eq!(deferred.await, OverlayResult::acknowledged());
    }

    #[tokio::test]
    async fn second_resolve_is_a_no_op() {
        let (mut resolver, deferred) = deferred();
        assert!(resolver.resolve(false.into()));
        assert!(!resolver.resolve(true.into()));
        assert_eq!(deferred.await, OverlayResult::Resolved(Value::Bool(false)));
    }

    #[tokio::test]
    async fn dropped_resolver_yields_cancelled() {
        let (resolver, deferred) = deferred();
        drop(resolver);
        assert_eq!(deferred.await, OverlayResult::Cancelled);
    }
}
