//! Top-level UI session.
//!
//! [`Ui`] wires the layers together: a merged [`ThemeConfig`] projected into
//! CSS variable blocks, breakpoint and viewport tracking, the overlay
//! managers and an HTTP client. Hosts provide the side-effecting surfaces
//! (a [`StyleSheet`], optionally a [`MediaQueryHost`] and [`ScrollHost`])
//! and call [`Ui::init`] once at startup:
//!
//! ```
//! use std::sync::Arc;
//! use shoji_theme::{MemoryStyleSheet, StyleSheet};
//! use shoji_ui::Ui;
//!
//! let sheet = Arc::new(MemoryStyleSheet::new());
//! let ui = Ui::builder().stylesheet(sheet.clone()).build();
//! ui.init().unwrap();
//! assert!(sheet.block("color").is_some());
//! ```
//!
//! Initialization is ordered: viewport facts first, then breakpoints, then
//! the color and gradation families (so later features can reference their
//! variables), then the remaining feature blocks.

use std::sync::Arc;

use serde_json::Value;

use shoji_core::{deep_merge, Result, StateRegistry, UiError};
use shoji_fetch::FetchClient;
use shoji_overlay::Overlays;
use shoji_theme::features::GENERIC_FEATURES;
use shoji_theme::{ColorStyles, FeatureStyles, GradationStyles, StyleSheet, ThemeConfig};
use shoji_viewport::{Breakpoints, MediaQueryHost, Scroll, ScrollHost, Viewport, ViewportSize};

pub mod prelude {
    pub use shoji_core::{Result, StateRegistry, UiError};
    pub use shoji_fetch::{CachePolicy, FetchClient, FetchRequest};
    pub use shoji_overlay::{
        DialogPayload, DrawerPayload, ModalPayload, OverlayResult, Overlays, SheetPayload,
        ToastPayload,
    };
    pub use shoji_theme::{MemoryStyleSheet, StyleSheet, ThemeConfig};
    pub use shoji_viewport::{MediaQueryHost, ScreenSize, ViewportSize};

    pub use crate::{Ui, UiBuilder};
}

/// Builder for [`Ui`]. Everything is optional; without a [`StyleSheet`]
/// the built session refuses to [`Ui::init`].
#[derive(Default)]
pub struct UiBuilder {
    overrides: Value,
    sheet: Option<Arc<dyn StyleSheet>>,
    media: Option<Arc<dyn MediaQueryHost>>,
    scroll_host: Option<Arc<dyn ScrollHost>>,
    viewport_size: Option<ViewportSize>,
}

impl UiBuilder {
    /// Merge theme overrides on top of the defaults. Repeated calls merge
    /// deeply, later values winning.
    pub fn overrides(mut self, overrides: Value) -> Self {
        deep_merge(&mut self.overrides, &overrides);
        self
    }

    /// Parse theme overrides from a TOML document.
    pub fn overrides_toml(self, text: &str) -> Result<Self> {
        let table: toml::Value = text
            .parse()
            .map_err(|e: toml::de::Error| UiError::InvalidConfig(e.to_string()))?;
        let parsed =
            serde_json::to_value(table).map_err(|e| UiError::InvalidConfig(e.to_string()))?;
        Ok(self.overrides(parsed))
    }

    pub fn stylesheet(mut self, sheet: Arc<dyn StyleSheet>) -> Self {
        self.sheet = Some(sheet);
        self
    }

    pub fn media_queries(mut self, host: Arc<dyn MediaQueryHost>) -> Self {
        self.media = Some(host);
        self
    }

    pub fn scroll_host(mut self, host: Arc<dyn ScrollHost>) -> Self {
        self.scroll_host = Some(host);
        self
    }

    pub fn viewport_size(mut self, width: f64, height: f64) -> Self {
        self.viewport_size = Some(ViewportSize::new(width, height));
        self
    }

    pub fn build(self) -> Ui {
        let registry = StateRegistry::new();
        let theme = if self.overrides.is_null() {
            ThemeConfig::default()
        } else {
            ThemeConfig::with_overrides(self.overrides)
        };

        let colors = ColorStyles::new(&registry);
        let gradations = GradationStyles::new(&registry);
        let features: Vec<FeatureStyles> = GENERIC_FEATURES
            .into_iter()
            .map(|name| FeatureStyles::new(name, &registry))
            .collect();

        let breakpoints = Breakpoints::new(&theme, &registry);
        let viewport = Viewport::new(&registry);
        let mut scroll = Scroll::new(&registry);
        if let Some(host) = self.scroll_host {
            scroll = scroll.with_host(host);
        }

        Ui {
            fetch: FetchClient::new(&registry),
            registry,
            theme,
            sheet: self.sheet,
            media: self.media,
            viewport_size: self.viewport_size,
            colors,
            gradations,
            features,
            breakpoints,
            viewport,
            scroll,
            overlays: Overlays::new(),
        }
    }
}

/// One UI session.
pub struct Ui {
    registry: Arc<StateRegistry>,
    theme: ThemeConfig,
    sheet: Option<Arc<dyn StyleSheet>>,
    media: Option<Arc<dyn MediaQueryHost>>,
    viewport_size: Option<ViewportSize>,

    pub colors: ColorStyles,
    pub gradations: GradationStyles,
    features: Vec<FeatureStyles>,
    pub breakpoints: Breakpoints,
    pub viewport: Viewport,
    pub scroll: Scroll,
    pub overlays: Overlays,
    pub fetch: FetchClient,
}

impl Ui {
    pub fn builder() -> UiBuilder {
        UiBuilder::default()
    }

    /// Project every configured feature into the style sheet and start the
    /// breakpoint tracker. Fails when no [`StyleSheet`] was provided.
    pub fn init(&self) -> Result<()> {
        let sheet = self
            .sheet
            .as_deref()
            .ok_or(UiError::NoRenderContext("style sheet"))?;

        if let Some(size) = self.viewport_size {
            self.viewport.init(size);
        }

        self.breakpoints.init(&self.theme, sheet);
        match &self.media {
            Some(host) => self.breakpoints.bind_media(host.as_ref()),
            None => {
                // No media queries on this host, fall back to raw width.
                let breakpoints = self.breakpoints.clone();
                self.viewport
                    .cell()
                    .subscribe(move |size| breakpoints.apply_width(size.width));
                self.breakpoints.apply_width(self.viewport.width());
            }
        }

        self.colors.init(&self.theme, sheet);
        self.gradations.init(&self.theme, sheet);
        for feature in &self.features {
            feature.init(&self.theme, sheet);
        }
        tracing::debug!("ui initialized");
        Ok(())
    }

    /// Re-project one feature with a replacement configuration.
    pub fn update_feature(&self, name: &str, config: Value) -> Result<()> {
        let sheet = self
            .sheet
            .as_deref()
            .ok_or(UiError::NoRenderContext("style sheet"))?;
        match name {
            "color" => self.colors.update(config, sheet),
            "gradation" => self.gradations.update(config, sheet),
            _ => {
                let feature = self
                    .features
                    .iter()
                    .find(|f| f.name() == name)
                    .ok_or_else(|| UiError::InvalidConfig(format!("unknown feature {name:?}")))?;
                feature.update(config, sheet);
            }
        }
        Ok(())
    }

    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    pub fn registry(&self) -> &Arc<StateRegistry> {
        &self.registry
    }
}
