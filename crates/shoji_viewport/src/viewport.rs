//! Viewport dimensions and on-screen keyboard inference

use std::sync::Arc;

use shoji_core::{StateCell, StateRegistry};

/// Width and height in logical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Current and initial viewport size. The initial size is captured once and
/// used to infer the on-screen keyboard height on mobile hosts, where the
/// keyboard shrinks the visual viewport.
#[derive(Clone)]
pub struct Viewport {
    size: Arc<StateCell<ViewportSize>>,
    initial: Arc<StateCell<Option<ViewportSize>>>,
}

impl Viewport {
    pub fn new(registry: &StateRegistry) -> Self {
        Self {
            size: registry.state("ui-viewport-size", ViewportSize::default),
            initial: registry.state("ui-viewport-initial", || None),
        }
    }

    /// Record the first reported size. Later calls only update the current
    /// size, the initial one stays fixed.
    pub fn init(&self, size: ViewportSize) {
        self.initial.update(|slot| {
            if slot.is_none() {
                *slot = Some(size);
            }
        });
        self.size.set(size);
    }

    pub fn update(&self, size: ViewportSize) {
        if self.initial.get().is_none() {
            self.init(size);
        } else {
            self.size.set(size);
        }
    }

    pub fn size(&self) -> ViewportSize {
        self.size.get()
    }

    pub fn width(&self) -> f64 {
        self.size.get().width
    }

    pub fn height(&self) -> f64 {
        self.size.get().height
    }

    pub fn initial_size(&self) -> Option<ViewportSize> {
        self.initial.get()
    }

    /// How much shorter the viewport is than when it was first seen.
    pub fn keyboard_height(&self) -> f64 {
        match self.initial.get() {
            Some(initial) => (initial.height - self.height()).max(0.0),
            None => 0.0,
        }
    }

    /// Observable cell holding the current size.
    pub fn cell(&self) -> Arc<StateCell<ViewportSize>> {
        Arc::clone(&self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_size_is_sticky() {
        let registry = StateRegistry::new();
        let viewport = Viewport::new(&registry);
        viewport.init(ViewportSize::new(390.0, 844.0));
        viewport.update(ViewportSize::new(390.0, 500.0));

        assert_eq!(viewport.height(), 500.0);
        assert_eq!(viewport.initial_size(), Some(ViewportSize::new(390.0, 844.0)));
    }

    #[test]
    fn keyboard_height_never_negative() {
        let registry = StateRegistry::new();
        let viewport = Viewport::new(&registry);
        viewport.init(ViewportSize::new(390.0, 844.0));

        viewport.update(ViewportSize::new(390.0, 500.0));
        assert_eq!(viewport.keyboard_height(), 344.0);

        viewport.update(ViewportSize::new(390.0, 900.0));
        assert_eq!(viewport.keyboard_height(), 0.0);
    }

    #[test]
    fn update_before_init_captures_initial() {
        let registry = StateRegistry::new();
        let viewport = Viewport::new(&registry);
        viewport.update(ViewportSize::new(1280.0, 800.0));
        assert_eq!(viewport.initial_size(), Some(ViewportSize::new(1280.0, 800.0)));
    }
}
