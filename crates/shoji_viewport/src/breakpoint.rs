//! Screen-size breakpoints driven by min-width media queries

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use serde_json::Value;
use smallvec::SmallVec;

use shoji_core::{StateCell, StateRegistry};
use shoji_theme::{css, StyleSheet, ThemeConfig};

/// Named screen-size buckets, largest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScreenSize {
    Xxl,
    Xl,
    L,
    M,
    S,
    Xs,
}

impl ScreenSize {
    pub const ALL: [ScreenSize; 6] = [
        ScreenSize::Xxl,
        ScreenSize::Xl,
        ScreenSize::L,
        ScreenSize::M,
        ScreenSize::S,
        ScreenSize::Xs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Xxl => "xxl",
            Self::Xl => "xl",
            Self::L => "l",
            Self::M => "m",
            Self::S => "s",
            Self::Xs => "xs",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    /// Position in the size order, 0 being the largest.
    pub fn rank(self) -> usize {
        self as usize
    }
}

/// Parsed breakpoint thresholds, ordered largest first.
#[derive(Clone, Debug)]
pub struct BreakpointConfig {
    pub entries: SmallVec<[(ScreenSize, f64); 6]>,
    pub base: ScreenSize,
}

impl Default for BreakpointConfig {
    fn default() -> Self {
        Self {
            entries: SmallVec::new(),
            base: ScreenSize::M,
        }
    }
}

impl BreakpointConfig {
    /// Read thresholds and the base size from the `breakPoint` feature
    /// sub-tree. Unparseable thresholds are skipped with a warning.
    pub fn from_theme(theme: &ThemeConfig) -> Self {
        let mut config = Self::default();
        let Some(tree) = theme.feature("breakPoint") else {
            return config;
        };
        let Some(map) = tree.as_object() else {
            return config;
        };
        for size in ScreenSize::ALL {
            let Some(raw) = map.get(size.name()) else {
                continue;
            };
            match parse_px(raw) {
                Some(px) => config.entries.push((size, px)),
                None => {
                    tracing::warn!(size = size.name(), ?raw, "unparseable breakpoint threshold")
                }
            }
        }
        config
            .entries
            .sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        if let Some(base) = map
            .get("base")
            .and_then(Value::as_str)
            .and_then(ScreenSize::from_name)
        {
            config.base = base;
        }
        config
    }

    /// Smallest configured size, used when no query matches.
    fn smallest(&self) -> Option<ScreenSize> {
        self.entries.last().map(|(size, _)| *size)
    }
}

fn parse_px(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches("px").trim().parse().ok(),
        _ => None,
    }
}

/// Host-side media query source. `watch_min_width` registers an observer for
/// `(min-width: {px}px)` and returns whether the query currently matches.
pub trait MediaQueryHost: Send + Sync {
    fn watch_min_width(&self, px: f64, on_change: Box<dyn Fn(bool) + Send + Sync>) -> bool;
}

struct Inner {
    config: BreakpointConfig,
    /// Match state per entry, same order as `config.entries`.
    matched: Mutex<SmallVec<[bool; 6]>>,
    current: Arc<StateCell<ScreenSize>>,
    /// Once a media query host is bound, width fallback is ignored.
    media_active: AtomicBool,
}

impl Inner {
    /// Largest matched size, else the smallest configured one.
    fn recompute(&self) {
        let matched = self.matched.lock().unwrap();
        let next = self
            .config
            .entries
            .iter()
            .zip(matched.iter())
            .find(|(_, hit)| **hit)
            .map(|((size, _), _)| *size)
            .or_else(|| self.config.smallest())
            .unwrap_or(self.config.base);
        drop(matched);
        if self.current.get() != next {
            tracing::debug!(size = next.name(), "screen size changed");
            self.current.set(next);
        }
    }
}

/// Tracks the current [`ScreenSize`] from media queries, with a plain width
/// fallback for hosts without media query support.
#[derive(Clone)]
pub struct Breakpoints {
    inner: Arc<Inner>,
}

impl Breakpoints {
    pub fn new(theme: &ThemeConfig, registry: &StateRegistry) -> Self {
        let config = BreakpointConfig::from_theme(theme);
        let initial = config.base;
        let current = registry.state("ui-screen-size", move || initial);
        let matched = config.entries.iter().map(|_| false).collect();
        Self {
            inner: Arc::new(Inner {
                config,
                matched: Mutex::new(matched),
                current,
                media_active: AtomicBool::new(false),
            }),
        }
    }

    /// Install the breakpoint CSS variable block. Returns `false` when the
    /// theme carries no breakpoint sub-tree.
    pub fn init(&self, theme: &ThemeConfig, sheet: &dyn StyleSheet) -> bool {
        let Some(tree) = theme.feature("breakPoint") else {
            tracing::debug!("no breakpoint configuration, skipped");
            return false;
        };
        sheet.set_block("breakPoint", &css::variables("breakPoint", tree));
        true
    }

    /// Register one min-width query per threshold and switch to media-query
    /// driven updates. Width fallback stops applying from here on.
    pub fn bind_media(&self, host: &dyn MediaQueryHost) {
        self.inner.media_active.store(true, Ordering::Release);
        for (index, (_, px)) in self.inner.config.entries.iter().enumerate() {
            let weak: Weak<Inner> = Arc::downgrade(&self.inner);
            let initial = host.watch_min_width(
                *px,
                Box::new(move |hit| {
                    if let Some(inner) = weak.upgrade() {
                        inner.matched.lock().unwrap()[index] = hit;
                        inner.recompute();
                    }
                }),
            );
            self.inner.matched.lock().unwrap()[index] = initial;
        }
        self.inner.recompute();
    }

    /// Derive the size from a raw pixel width. Ignored once a media query
    /// host is bound.
    pub fn apply_width(&self, width: f64) {
        if self.inner.media_active.load(Ordering::Acquire) {
            return;
        }
        {
            let mut matched = self.inner.matched.lock().unwrap();
            for (slot, (_, px)) in matched.iter_mut().zip(self.inner.config.entries.iter()) {
                *slot = width >= *px;
            }
        }
        self.inner.recompute();
    }

    pub fn current(&self) -> ScreenSize {
        self.inner.current.get()
    }

    /// Observable cell holding the current size.
    pub fn cell(&self) -> Arc<StateCell<ScreenSize>> {
        Arc::clone(&self.inner.current)
    }

    /// Current size is `size` or larger.
    pub fn above(&self, size: ScreenSize) -> bool {
        self.current().rank() <= size.rank()
    }

    /// Current size is `size` or smaller.
    pub fn below(&self, size: ScreenSize) -> bool {
        self.current().rank() >= size.rank()
    }

    /// Current size is the configured base or larger.
    pub fn base_above(&self) -> bool {
        self.above(self.inner.config.base)
    }

    pub fn base(&self) -> ScreenSize {
        self.inner.config.base
    }
}
