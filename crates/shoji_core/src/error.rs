//! Error taxonomy shared by every shoji crate
//!
//! Precondition failures (missing render context, unregistered components) are
//! programmer errors surfaced as `Err` from `init`-style calls. Soft conditions
//! are deliberately NOT errors: a missing feature configuration makes its
//! projection return `false`, and an unparsable color hex skips its variants.

use thiserror::Error;

/// Errors produced by the shoji UI runtime
#[derive(Error, Debug)]
pub enum UiError {
    /// No live style/render context was provided where one is required
    #[error("no render context: {0}")]
    NoRenderContext(&'static str),

    /// A configuration value has the wrong shape
    #[error("invalid ui configuration: {0}")]
    InvalidConfig(String),

    /// A component reference could not be resolved to a registered name
    #[error("component not registered: {0}")]
    UnknownComponent(String),

    /// The server answered with a non-2xx status
    #[error("http {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never produced a response
    #[error("transport error: {0}")]
    Transport(String),
}

/// Result type for shoji operations
pub type Result<T> = std::result::Result<T, UiError>;
