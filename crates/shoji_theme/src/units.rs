//! Fluid size helpers
//!
//! Sizes are authored in design pixels against a base viewport and rendered
//! either as absolute `px` or as a fluid `max({vw}vw, {px}px)` expression that
//! never shrinks below the design size.

/// Design viewport width the vw conversions are relative to.
pub const BASE_VIEWPORT: f64 = 1080.0;

/// Convert design pixels to vw units against `viewport` (falls back to
/// [`BASE_VIEWPORT`] for non-positive viewports).
pub fn vw_from_px(px: f64, viewport: f64) -> f64 {
    let vp = if viewport > 0.0 { viewport } else { BASE_VIEWPORT };
    (100.0 / vp) * px
}

/// Convert vw units back to design pixels.
pub fn px_from_vw(vw: f64, viewport: f64) -> f64 {
    let vp = if viewport > 0.0 { viewport } else { BASE_VIEWPORT };
    vw / (100.0 / vp)
}

/// A fluid CSS length: `max({vw}vw, {px}px)`.
///
/// Zero renders as plain `0` (a `max(0, 0)` expression is invalid CSS) and
/// negative sizes use `min`, which is the correct bound on that side.
pub fn max_px_vw(px: f64, viewport: f64) -> String {
    if px == 0.0 {
        "0".to_string()
    } else if px < 0.0 {
        format!("min({}vw, {}px)", fmt(vw_from_px(px, viewport)), fmt(px))
    } else {
        format!("max({}vw, {}px)", fmt(vw_from_px(px, viewport)), fmt(px))
    }
}

/// Render a design size: absolute `{px}px`, or the fluid expression.
pub fn size(px: f64, absolute: bool, viewport: f64) -> String {
    if absolute {
        format!("{}px", fmt(px))
    } else {
        max_px_vw(px, viewport)
    }
}

// Trim trailing zeros so 40.0 renders as "40" and 3.7037 keeps its digits.
fn fmt(value: f64) -> String {
    let text = format!("{value:.4}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vw_conversion_roundtrip() {
        let vw = vw_from_px(108.0, BASE_VIEWPORT);
        assert!((vw - 10.0).abs() < 1e-9);
        assert!((px_from_vw(vw, BASE_VIEWPORT) - 108.0).abs() < 1e-9);
    }

    #[test]
    fn non_positive_viewport_falls_back() {
        assert_eq!(vw_from_px(108.0, 0.0), vw_from_px(108.0, BASE_VIEWPORT));
    }

    #[test]
    fn fluid_expression_shapes() {
        assert_eq!(max_px_vw(0.0, BASE_VIEWPORT), "0");
        assert_eq!(max_px_vw(108.0, BASE_VIEWPORT), "max(10vw, 108px)");
        assert_eq!(max_px_vw(-108.0, BASE_VIEWPORT), "min(-10vw, -108px)");
    }

    #[test]
    fn size_absolute_and_fluid() {
        assert_eq!(size(40.0, true, BASE_VIEWPORT), "40px");
        assert_eq!(size(54.0, false, BASE_VIEWPORT), "max(5vw, 54px)");
    }
}
