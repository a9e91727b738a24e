//! qrsvg - compact SVG rendering of QR code module matrices
//!
//! This library turns a square matrix of dark/light modules into a small SVG
//! document. Encoding the QR symbol is left to any encoder that implements
//! [`ModuleSource`]; this crate only draws.
//!
//! Three variations are supported: square blocks (`normal`), one circle per
//! module (`dotted`) and blocks with rounded free corners (`rounded`). A
//! fully transparent foreground over a visible background draws a frame with
//! the code cut out of it.
//!
//! # Example
//!
//! ```rust
//! use qrsvg::{render, ModuleGrid, RenderOptions};
//!
//! let grid: ModuleGrid = "##.\n#..\n..#".parse().unwrap();
//! let svg = render(&grid, &RenderOptions::default());
//!
//! assert!(svg.starts_with("<svg"));
//! assert!(svg.contains(r#"viewBox="0 0 3 3""#));
//! ```

pub mod color;
pub mod error;
pub mod grid;
pub mod renderer;

pub use color::{normalize, Color, Paint};
pub use error::{ColorError, GridError, ProfileError};
pub use grid::{ModuleGrid, ModuleSource};
pub use renderer::{render_svg, RenderMode, RenderOptions, SvgConfig, Variation};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// What to draw
    pub options: RenderOptions,
    /// SVG output configuration
    pub svg: SvgConfig,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the render options
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }
}

/// Render a module grid to SVG with default output formatting
///
/// This is the main entry point for the library.
///
/// # Example
///
/// ```rust
/// use qrsvg::{render, ModuleGrid, RenderOptions, Variation};
///
/// let grid = ModuleGrid::from_rows(&["#.#", ".#.", "#.#"]).unwrap();
/// let options = RenderOptions::new()
///     .with_foreground("rgb(112, 0, 150)")
///     .with_variation(Variation::Dotted);
///
/// let svg = render(&grid, &options);
/// assert_eq!(svg.matches("A0.5 0.5").count(), 10);
/// assert!(svg.contains(r##"fill="#700096""##));
/// ```
pub fn render<S: ModuleSource + ?Sized>(source: &S, options: &RenderOptions) -> String {
    render_svg(source, options, &SvgConfig::default())
}

/// Render a module grid to SVG with custom configuration
///
/// # Example
///
/// ```rust
/// use qrsvg::{render_with_config, ModuleGrid, RenderConfig, SvgConfig};
///
/// let config = RenderConfig::new().with_svg(SvgConfig::new().with_standalone(true));
/// let svg = render_with_config(&ModuleGrid::new(21), &config);
/// assert!(svg.starts_with("<?xml"));
/// ```
pub fn render_with_config<S: ModuleSource + ?Sized>(source: &S, config: &RenderConfig) -> String {
    render_svg(source, &config.options, &config.svg)
}

/// Encode an SVG document as a base64 `data:` URI for use in `<img src>`
///
/// ```rust
/// assert_eq!(
///     qrsvg::to_data_uri("<svg/>"),
///     "data:image/svg+xml;base64,PHN2Zy8+"
/// );
/// ```
pub fn to_data_uri(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}
