//! Color normalization
//!
//! Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r,g,b)` and `rgba(r,g,b,a)`
//! and produces the shortest canonical hex form. The strict entry point is
//! [`Color::parse`]; [`normalize`] and [`Color::parse_or_warning`] are total
//! and substitute [`Color::WARNING`] for anything malformed.

pub mod grammar;
pub mod lexer;

use std::fmt;

use log::warn;

use crate::error::ColorError;

/// An sRGB color with 8-bit alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// A color split into the parts an SVG attribute needs
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    /// Opaque hex color, shorthand when possible
    pub hex: String,
    /// `None` for fully opaque colors, otherwise a value in (0, 1)
    pub opacity: Option<f64>,
}

impl Color {
    /// Substituted for malformed input so a bad color is visible, not fatal
    pub const WARNING: Color = Color::rgb(0xee, 0x00, 0x00);

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with explicit alpha
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a color string, reporting why it was rejected
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        grammar::parse_color(input)
    }

    /// Parse a color string, falling back to [`Color::WARNING`]
    pub fn parse_or_warning(input: &str) -> Self {
        match Self::parse(input) {
            Ok(color) => color,
            Err(err) => {
                warn!("malformed color '{}' ({}), using warning color", input, err);
                Self::WARNING
            }
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Fully transparent colors are never drawn
    pub fn is_invisible(&self) -> bool {
        self.a == 0
    }

    /// Opacity in (0, 1), or `None` when the color is opaque
    pub fn opacity(&self) -> Option<f64> {
        if self.is_opaque() {
            None
        } else {
            Some(f64::from(self.a) / 255.0)
        }
    }

    /// Whether all three channels can be written with one nibble each
    fn has_shorthand(&self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|&v| v >> 4 == v & 0x0f)
    }

    /// Shortest hex form of the RGB part, ignoring alpha
    pub fn rgb_hex(&self) -> String {
        if self.has_shorthand() {
            format!("#{:x}{:x}{:x}", self.r & 0x0f, self.g & 0x0f, self.b & 0x0f)
        } else {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        }
    }

    /// Canonical hex form: `#rgb` when possible, `#rrggbb` otherwise,
    /// with an alpha byte appended only when the color is not opaque
    pub fn to_hex(&self) -> String {
        if self.is_opaque() {
            self.rgb_hex()
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            )
        }
    }

    /// Split into an opaque hex color plus an optional opacity
    pub fn paint(&self) -> Paint {
        Paint {
            hex: self.rgb_hex(),
            opacity: self.opacity(),
        }
    }
}

impl Paint {
    /// Parse any supported notation straight into attribute parts,
    /// falling back to the warning color
    pub fn resolve(input: &str) -> Self {
        Color::parse_or_warning(input).paint()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Normalize any supported color notation to its canonical hex form
///
/// Never fails: malformed input yields `#e00`.
///
/// ```rust
/// use qrsvg::color::normalize;
///
/// assert_eq!(normalize("rgba(255,0,0,0.5)"), "#ff000080");
/// assert_eq!(normalize("#aabbcc"), "#abc");
/// assert_eq!(normalize("not a color"), "#e00");
/// ```
pub fn normalize(input: &str) -> String {
    Color::parse_or_warning(input).to_hex()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_scenarios() {
        assert_eq!(normalize("rgba(255,0,0,0.5)"), "#ff000080");
        assert_eq!(normalize("#aabbcc"), "#abc");
        assert_eq!(normalize("#AABBCC"), "#abc");
        assert_eq!(normalize("#abc"), "#abc");
        assert_eq!(normalize("#aabbcd"), "#aabbcd");
        assert_eq!(normalize("rgb(255, 255, 255)"), "#fff");
        assert_eq!(normalize("rgb(18,52,86)"), "#123456");
    }

    #[test]
    fn test_opaque_alpha_is_dropped() {
        assert_eq!(normalize("#112233ff"), "#123");
        assert_eq!(normalize("#102030ff"), "#102030");
        assert_eq!(normalize("rgba(0,0,0,1.0)"), "#000");
    }

    #[test]
    fn test_translucent_keeps_long_form() {
        // Shorthand is only allowed when the color is opaque
        assert_eq!(normalize("#ffffff00"), "#ffffff00");
        assert_eq!(normalize("#00000080"), "#00000080");
    }

    #[test]
    fn test_malformed_falls_back() {
        for input in ["", "#12", "#12345", "hsl(0,0%,0%)", "rgb(300,0,0)", "blue"] {
            assert_eq!(normalize(input), "#e00", "input {:?}", input);
        }
    }

    #[test]
    fn test_idempotence() {
        for input in [
            "#abc",
            "#aabbcc",
            "#a1b2c3",
            "#a1b2c380",
            "#ffffff00",
            "rgb(0,17,34)",
            "rgba(10,20,30,0.25)",
            "garbage",
        ] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input {:?}", input);
        }
    }

    #[test]
    fn test_shorthand_round_trip() {
        for (r, g, b) in [(0x11, 0x22, 0x33), (0xff, 0x00, 0xee), (0, 0, 0)] {
            let short = normalize(&format!("rgb({},{},{})", r, g, b));
            assert_eq!(short.len(), 4);
            let expanded: String = short[1..]
                .chars()
                .flat_map(|c| [c, c])
                .collect();
            assert_eq!(expanded, format!("{:02x}{:02x}{:02x}", r, g, b));
        }
    }

    #[test]
    fn test_paint() {
        assert_eq!(
            Color::rgb(0, 0, 0).paint(),
            Paint {
                hex: "#000".to_string(),
                opacity: None
            }
        );
        let paint = Color::rgba(0x12, 0x34, 0x56, 0x80).paint();
        assert_eq!(paint.hex, "#123456");
        assert!((paint.opacity.unwrap() - 128.0 / 255.0).abs() < 1e-12);
    }

    #[test]
    fn test_resolve() {
        assert_eq!(Paint::resolve("#FFF").hex, "#fff");
        assert_eq!(Paint::resolve("rgb(1,2)").hex, "#e00");
        assert_eq!(Paint::resolve("#ffffff80").opacity.map(|o| (o * 1000.0).round()), Some(502.0));
    }

    #[test]
    fn test_invisible() {
        assert!(Color::parse_or_warning("#ffffff00").is_invisible());
        assert!(!Color::parse_or_warning("#ffffff01").is_invisible());
        assert!(!Color::WARNING.is_invisible());
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::rgba(255, 0, 0, 128).to_string(), "#ff000080");
    }
}
