//! Hex color parsing
//!
//! Theme color tokens are authored as `#rgb` or `#rrggbb` strings. The parser
//! is total: anything else yields `None` and the caller skips the derived
//! opacity variants for that token.

/// An sRGB color with 8-bit components
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a 3- or 6-digit hex color, with or without a leading `#`.
    ///
    /// Three-digit shorthand expands each digit (`#abc` → `#aabbcc`). Any
    /// other shape returns `None`.
    pub fn parse_hex(hex: &str) -> Option<Rgb> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);

        let expanded: String = if digits.len() == 3 {
            digits.chars().flat_map(|c| [c, c]).collect()
        } else {
            digits.to_string()
        };

        if expanded.len() != 6 || !expanded.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        let component = |range: std::ops::Range<usize>| u8::from_str_radix(&expanded[range], 16).ok();
        Some(Rgb {
            r: component(0..2)?,
            g: component(2..4)?,
            b: component(4..6)?,
        })
    }

    /// Render as a space-separated CSS color with a percentage alpha,
    /// e.g. `rgb(12 140 233 / 30%)`.
    pub fn css_with_opacity(&self, pct: u8) -> String {
        format!("rgb({} {} {} / {}%)", self.r, self.g, self.b, pct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex() {
        assert_eq!(Rgb::parse_hex("#0C8CE9"), Some(Rgb::new(12, 140, 233)));
        assert_eq!(Rgb::parse_hex("2D2E31"), Some(Rgb::new(45, 46, 49)));
    }

    #[test]
    fn expands_three_digit_hex() {
        assert_eq!(Rgb::parse_hex("#abc"), Some(Rgb::new(0xAA, 0xBB, 0xCC)));
        assert_eq!(Rgb::parse_hex("fff"), Some(Rgb::new(255, 255, 255)));
    }

    #[test]
    fn rejects_other_shapes() {
        for bad in ["", "#", "#ab", "#abcd", "#abcde", "#abcdefa", "red", "#0C8CEZ"] {
            assert_eq!(Rgb::parse_hex(bad), None, "{bad:?} should not parse");
        }
    }

    #[test]
    fn renders_opacity_variant() {
        let rgb = Rgb::parse_hex("#0C8CE9").unwrap();
        assert_eq!(rgb.css_with_opacity(30), "rgb(12 140 233 / 30%)");
    }
}
