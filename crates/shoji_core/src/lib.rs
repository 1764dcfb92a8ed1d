//! Shoji core primitives
//!
//! Shared building blocks for the shoji UI runtime:
//!
//! - [`Rgb`]: hex color parsing and `rgb(r g b / a%)` rendering
//! - [`deep_merge`]: recursive configuration merge (objects merge, leaves replace)
//! - [`StateCell`] / [`StateRegistry`]: keyed, lazily-initialized shared state
//!   with subscribers, injected into feature modules instead of ambient globals
//! - [`UiError`]: the error taxonomy shared by every shoji crate
//!
//! # Quick Start
//!
//! ```rust
//! use shoji_core::{Rgb, StateRegistry};
//!
//! let registry = StateRegistry::new();
//! let counter = registry.state("clicks", || 0u32);
//! counter.set(1);
//!
//! let rgb = Rgb::parse_hex("#0C8CE9").unwrap();
//! assert_eq!((rgb.r, rgb.g, rgb.b), (12, 140, 233));
//! ```

pub mod case;
pub mod color;
pub mod error;
pub mod state;
pub mod value;

pub use case::{camel_to_kebab, kebab_to_camel};
pub use color::Rgb;
pub use error::{Result, UiError};
pub use state::{StateCell, StateRegistry, Subscription};
pub use value::{deep_merge, is_plain_object};
