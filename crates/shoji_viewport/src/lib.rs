//! Viewport facts: screen-size breakpoints, viewport dimensions and scroll
//! state.
//!
//! The breakpoint tracker prefers host media queries (see
//! [`MediaQueryHost`]) and falls back to raw width comparison when none are
//! available. All state lives in [`StateCell`]s obtained from a shared
//! [`StateRegistry`], so the rest of the application observes changes
//! through subscriptions rather than polling.
//!
//! [`StateCell`]: shoji_core::StateCell
//! [`StateRegistry`]: shoji_core::StateRegistry

pub mod breakpoint;
pub mod scroll;
pub mod viewport;

pub use breakpoint::{BreakpointConfig, Breakpoints, MediaQueryHost, ScreenSize};
pub use scroll::{Scroll, ScrollHost, ScrollState};
pub use viewport::{Viewport, ViewportSize};
