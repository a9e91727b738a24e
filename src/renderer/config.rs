//! Configuration for SVG rendering

use std::fmt;

use log::warn;
use serde::Deserialize;

use crate::error::ProfileError;

/// Rendering style for dark modules
///
/// Parsing is deliberately permissive: any name containing `dotted` is
/// dotted, otherwise any name containing `rounded` is rounded, and
/// everything else falls back to normal. Case is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum Variation {
    /// Square blocks
    #[default]
    Normal,
    /// One circle per module
    Dotted,
    /// Blocks with rounded free corners
    Rounded,
}

impl Variation {
    /// Match a variation name permissively
    ///
    /// ```rust
    /// use qrsvg::Variation;
    ///
    /// assert_eq!(Variation::from_name("Rounded"), Variation::Rounded);
    /// assert_eq!(Variation::from_name("dotted-rounded"), Variation::Dotted);
    /// assert_eq!(Variation::from_name("squares"), Variation::Normal);
    /// ```
    pub fn from_name(name: &str) -> Self {
        let name = name.to_lowercase();
        if name.contains("dotted") {
            Variation::Dotted
        } else if name.contains("rounded") {
            Variation::Rounded
        } else {
            Variation::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variation::Normal => "normal",
            Variation::Dotted => "dotted",
            Variation::Rounded => "rounded",
        }
    }

    /// Dotted and rounded codes get a background with rounded corners
    pub fn has_round_background(&self) -> bool {
        !matches!(self, Variation::Normal)
    }
}

impl From<&str> for Variation {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<String> for Variation {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl fmt::Display for Variation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the module pattern is written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// One `<path>` per layer
    #[default]
    PathMerged,
    /// One primitive per run or dot
    PerElement,
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RenderMode::PathMerged => "path_merged",
            RenderMode::PerElement => "per_element",
        })
    }
}

/// What to draw: size, colors, style and frame
///
/// Colors accept `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb()` and `rgba()`.
/// A fully transparent foreground over a visible background switches to
/// frame mode, where `border_width` and `border_radius_percent` apply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Pixel width and height of the document
    pub width: u32,

    /// Color of dark modules
    pub foreground: String,

    /// Color behind the pattern
    pub background: String,

    /// Accessible label; blank means no `aria-label`
    pub alt_text: String,

    pub variation: Variation,

    pub render_mode: RenderMode,

    /// Frame border in modules, frame mode only
    pub border_width: u32,

    /// Frame corner radius as a percentage of the border width
    pub border_radius_percent: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 256,
            foreground: "#000000ff".to_string(),
            background: "#ffffff00".to_string(),
            alt_text: String::new(),
            variation: Variation::Normal,
            render_mode: RenderMode::PathMerged,
            border_width: 0,
            border_radius_percent: 0.0,
        }
    }
}

impl RenderOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a TOML render profile
    ///
    /// Missing keys keep their defaults; unknown keys are rejected.
    ///
    /// ```rust
    /// use qrsvg::{RenderOptions, Variation};
    ///
    /// let options = RenderOptions::from_toml_str(r##"
    ///     width = 200
    ///     foreground = "#700096"
    ///     variation = "rounded"
    /// "##).unwrap();
    /// assert_eq!(options.width, 200);
    /// assert_eq!(options.variation, Variation::Rounded);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, ProfileError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the pixel width
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Set the foreground color
    pub fn with_foreground(mut self, color: impl Into<String>) -> Self {
        self.foreground = color.into();
        self
    }

    /// Set the background color
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = color.into();
        self
    }

    /// Set the accessible label
    pub fn with_alt_text(mut self, alt_text: impl Into<String>) -> Self {
        self.alt_text = alt_text.into();
        self
    }

    /// Set the variation (accepts anything [`Variation::from_name`] does)
    pub fn with_variation(mut self, variation: impl Into<Variation>) -> Self {
        self.variation = variation.into();
        self
    }

    /// Set the render mode
    pub fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.render_mode = mode;
        self
    }

    /// Set the frame border width and corner radius percentage
    pub fn with_border(mut self, width: u32, radius_percent: f64) -> Self {
        self.border_width = width;
        self.border_radius_percent = radius_percent;
        self
    }

    /// Border radius percentage limited to [0, 100]
    pub fn clamped_radius_percent(&self) -> f64 {
        let pct = self.border_radius_percent;
        if !pct.is_finite() {
            warn!("border radius percent {} is not finite, using 0", pct);
            return 0.0;
        }
        let clamped = pct.clamp(0.0, 100.0);
        if clamped != pct {
            warn!("border radius percent {} clamped to {}", pct, clamped);
        }
        clamped
    }
}

/// Configuration options for SVG output
#[derive(Debug, Clone, Default)]
pub struct SvgConfig {
    /// Whether to include the XML declaration
    pub standalone: bool,

    /// Whether to put each element on its own indented line
    pub pretty_print: bool,

    /// Prefix for element ids (e.g., "qr1-" for "qr1-p"), so several
    /// documents can be inlined into one page
    pub id_prefix: Option<String>,
}

impl SvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the id prefix
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = Some(prefix.into());
        self
    }

    /// Remove the id prefix
    pub fn without_id_prefix(mut self) -> Self {
        self.id_prefix = None;
        self
    }

    /// Full id for a document-local element
    ///
    /// Prefix characters outside `[A-Za-z0-9_.-]` are replaced with `_`,
    /// so the id is safe inside attributes and `url(#...)` references.
    pub fn id(&self, name: &str) -> String {
        let prefix: String = self
            .id_prefix
            .as_deref()
            .unwrap_or_default()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}{}", prefix, name)
    }
}
