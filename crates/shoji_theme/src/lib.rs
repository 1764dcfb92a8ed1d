//! Shoji theme system
//!
//! Projects a nested theme configuration into CSS custom properties and keeps
//! the live style sheet consistent with the latest configuration.
//!
//! # Overview
//!
//! - [`ThemeConfig`]: built-in defaults deep-merged with user overrides
//! - [`css`]: pure projection, configuration sub-tree → `:root { … }` text
//! - [`StyleSheet`]: the side-effecting injection adapter, one block per
//!   feature; [`MemoryStyleSheet`] for tests and headless hosts
//! - [`FeatureStyles`] and the color/gradation specializations: per-feature
//!   `init`/`update` composables
//!
//! # Quick Start
//!
//! ```rust
//! use shoji_core::StateRegistry;
//! use shoji_theme::{ColorStyles, MemoryStyleSheet, StyleSheet, ThemeConfig};
//!
//! let registry = StateRegistry::new();
//! let sheet = MemoryStyleSheet::new();
//! let config = ThemeConfig::with_overrides(serde_json::json!({
//!     "color": { "primary": "#0C8CE9" },
//! }));
//!
//! let colors = ColorStyles::new(&registry);
//! assert!(colors.init(&config, &sheet));
//! assert!(sheet.block("color").unwrap().contains("--color-primary: #0C8CE9;"));
//! ```
//!
//! The projection itself is a pure function; injecting the generated text into
//! a live document is the host adapter's job, which keeps the testable logic
//! free of any rendering-environment dependency.

pub mod config;
pub mod css;
pub mod features;
pub mod stylesheet;
pub mod units;

pub use config::ThemeConfig;
pub use css::{OPACITY_STEPS, RESERVED_FAMILIES};
pub use features::color::ColorStyles;
pub use features::gradation::GradationStyles;
pub use features::FeatureStyles;
pub use stylesheet::{MemoryStyleSheet, StyleSheet, DATA_KEY};
