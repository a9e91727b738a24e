//! SVG renderer for module grids
//!
//! Dark modules become a list of [`Shape`]s (per-run contours or dots),
//! which the composite assembler in [`svg`] writes either as one merged
//! path or as individual primitives, over a background or cut out of a
//! frame.

pub mod config;
pub mod dots;
pub mod path;
pub mod shape;
pub mod svg;

pub use config::{RenderMode, RenderOptions, SvgConfig, Variation};
pub use shape::Shape;
pub use svg::{render_svg, Layout, SvgBuilder};
