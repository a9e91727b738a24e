//! SVG generation from a module grid

use log::debug;

use crate::color::{Color, Paint};
use crate::grid::{CornerFlags, ModuleSource};

use super::config::{RenderMode, RenderOptions, SvgConfig, Variation};
use super::path::{filleted_rect, fmt_num, Block, ResolvedPath, ROW_OVERLAP};
use super::shape::{pattern_shapes, Shape};

const CRISP_EDGES: &str = r#" shape-rendering="crispEdges""#;

/// Corner radius of the background behind dotted and rounded codes
const BACKGROUND_RADIUS: f64 = 0.5;

/// Document structure chosen from the visibility of the two colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Nothing visible: an invisible rect keeps the document's size
    Placeholder,
    /// Background shape under the module pattern
    BackgroundAndForeground,
    /// Module pattern on a transparent canvas
    ForegroundOnly,
    /// Background-colored frame with the pattern cut out of it
    Frame,
}

impl Layout {
    pub fn select(foreground: &Color, background: &Color) -> Self {
        match (foreground.is_invisible(), background.is_invisible()) {
            (true, true) => Layout::Placeholder,
            (false, false) => Layout::BackgroundAndForeground,
            (false, true) => Layout::ForegroundOnly,
            (true, false) => Layout::Frame,
        }
    }
}

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    defs: Vec<String>,
    elements: Vec<String>,
    unit_height: Option<f64>,
    in_defs: bool,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            defs: vec![],
            elements: vec![],
            unit_height: None,
            in_defs: false,
            indent: 1,
        }
    }

    /// Document-local id, with the configured prefix
    pub fn id(&self, name: &str) -> String {
        self.config.id(name)
    }

    fn pad(&self, level: usize) -> String {
        if self.config.pretty_print {
            "  ".repeat(level)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    fn push(&mut self, markup: String) {
        let line = format!("{}{}", self.pad(self.indent), markup);
        if self.in_defs {
            self.defs.push(line);
        } else {
            self.elements.push(line);
        }
    }

    /// Number of elements written outside `<defs>`
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Add a `size` × `size` rectangle at the origin
    pub fn add_rect(&mut self, size: f64, rx: f64, attrs: &str) {
        let size = fmt_num(size);
        let rx_attr = if rx > 0.0 {
            format!(r#" rx="{}""#, fmt_num(rx))
        } else {
            String::new()
        };
        self.push(format!(
            r#"<rect x="0" y="0" width="{}" height="{}"{}{}/>"#,
            size, size, rx_attr, attrs
        ));
    }

    /// Add a path element
    pub fn add_path(&mut self, d: &str, attrs: &str) {
        self.push(format!(r#"<path d="{}"{}/>"#, d, attrs));
    }

    /// Add one shape as its own primitive
    ///
    /// The first unit block declares the shared `<defs>` rect.
    pub fn add_shape(&mut self, shape: &Shape) {
        if let Shape::UnitBlock(block) = shape {
            self.unit_height.get_or_insert(block.height);
        }
        let unit_id = self.id("p");
        self.push(shape.to_element(&unit_id));
    }

    /// Open a group carrying the given attributes
    pub fn start_group(&mut self, attrs: &str) {
        self.push(format!("<g{}>", attrs));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.push("</g>".to_string());
    }

    /// Open a `<mask>`; everything until [`SvgBuilder::end_mask`] goes
    /// into `<defs>`
    pub fn start_mask(&mut self, id: &str) {
        self.in_defs = true;
        self.indent = 2;
        self.push(format!(r#"<mask id="{}">"#, id));
        self.indent += 1;
    }

    /// Close the open mask
    pub fn end_mask(&mut self) {
        self.indent = 2;
        self.push("</mask>".to_string());
        self.in_defs = false;
        self.indent = 1;
    }

    /// Build the final SVG string
    pub fn build(self, width: u32, view_size: usize, alt_text: &str) -> String {
        let nl = self.newline();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        let label = alt_text.trim();
        let aria = if label.is_empty() {
            String::new()
        } else {
            format!(r#" aria-label="{}""#, escape_xml(label))
        };
        svg.push_str(&format!(
            r#"<svg role="img"{} width="{}" height="{}" viewBox="0 0 {} {}" xmlns="http://www.w3.org/2000/svg">"#,
            aria, width, width, view_size, view_size
        ));
        svg.push_str(nl);

        let unit_def = self.unit_height.map(|height| {
            format!(
                r#"{}<rect id="{}" width="1" height="{}"/>"#,
                self.pad(2),
                self.id("p"),
                fmt_num(height)
            )
        });

        if unit_def.is_some() || !self.defs.is_empty() {
            svg.push_str(&self.pad(1));
            svg.push_str("<defs>");
            svg.push_str(nl);
            for def in unit_def.iter().chain(&self.defs) {
                svg.push_str(def);
                svg.push_str(nl);
            }
            svg.push_str(&self.pad(1));
            svg.push_str("</defs>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a module grid to an SVG document
///
/// Never fails: malformed colors are replaced by the warning color and
/// out-of-range frame settings are clamped.
pub fn render_svg<S: ModuleSource + ?Sized>(
    source: &S,
    options: &RenderOptions,
    config: &SvgConfig,
) -> String {
    let foreground = Color::parse_or_warning(&options.foreground);
    let background = Color::parse_or_warning(&options.background);
    let layout = Layout::select(&foreground, &background);
    let variation = options.variation;
    let count = source.module_count();
    let crisp = variation == Variation::Normal;

    let mut builder = SvgBuilder::new(config.clone());

    let view_size = match layout {
        Layout::Placeholder => {
            builder.add_rect(count as f64, 0.0, r#" opacity="0""#);
            count
        }
        Layout::BackgroundAndForeground => {
            let radius = if variation.has_round_background() {
                BACKGROUND_RADIUS
            } else {
                0.0
            };
            let attrs = fill_attrs(&background.paint(), crisp);
            builder.add_rect(count as f64, radius, &attrs);

            let shapes = pattern_shapes(source, variation, 0.0, ROW_OVERLAP);
            add_foreground(&mut builder, &shapes, &foreground.paint(), options, crisp);
            count
        }
        Layout::ForegroundOnly => {
            let shapes = pattern_shapes(source, variation, 0.0, ROW_OVERLAP);
            add_foreground(&mut builder, &shapes, &foreground.paint(), options, crisp);
            count
        }
        Layout::Frame => {
            let border = options.border_width as usize;
            let view_size = count.saturating_add(border.saturating_mul(2));
            let outer = view_size as f64;
            let radius = (options.border_width as f64 * options.clamped_radius_percent() / 100.0)
                .min(outer / 2.0);

            // Even-odd filling would turn overlapping strips opaque again.
            // Mask holes are a plain union and keep the overlap.
            let overlap = match options.render_mode {
                RenderMode::PathMerged => 0.0,
                RenderMode::PerElement => ROW_OVERLAP,
            };
            let shapes = pattern_shapes(source, variation, border as f64, overlap);
            let frame = Frame {
                size: outer,
                radius,
                paint: background.paint(),
                crisp: crisp && radius == 0.0,
            };
            frame.add_to(&mut builder, &shapes, options.render_mode);
            view_size
        }
    };

    debug!(
        "rendering {}x{} modules as {:?} ({}, {}), {} elements",
        count,
        count,
        layout,
        variation,
        options.render_mode,
        builder.element_count()
    );

    builder.build(options.width, view_size, &options.alt_text)
}

/// Paint attributes for a single element
fn fill_attrs(paint: &Paint, crisp: bool) -> String {
    let mut attrs = format!(r#" fill="{}""#, paint.hex);
    if let Some(opacity) = paint.opacity {
        attrs.push_str(&format!(r#" fill-opacity="{}""#, fmt_num(opacity)));
    }
    if crisp {
        attrs.push_str(CRISP_EDGES);
    }
    attrs
}

/// Paint attributes for a group; `opacity` applies to the composited
/// group, so overlapping members are not darkened twice
fn group_attrs(paint: &Paint, crisp: bool) -> String {
    let mut attrs = format!(r#" fill="{}""#, paint.hex);
    if let Some(opacity) = paint.opacity {
        attrs.push_str(&format!(r#" opacity="{}""#, fmt_num(opacity)));
    }
    if crisp {
        attrs.push_str(CRISP_EDGES);
    }
    attrs
}

fn merged_d(shapes: &[Shape]) -> String {
    shapes
        .iter()
        .map(Shape::to_path_d)
        .collect::<Vec<_>>()
        .join(" ")
}

fn add_foreground(
    builder: &mut SvgBuilder,
    shapes: &[Shape],
    paint: &Paint,
    options: &RenderOptions,
    crisp: bool,
) {
    if shapes.is_empty() {
        return;
    }

    match options.render_mode {
        RenderMode::PathMerged => {
            builder.add_path(&merged_d(shapes), &fill_attrs(paint, crisp));
        }
        RenderMode::PerElement => {
            builder.start_group(&group_attrs(paint, crisp));
            for shape in shapes {
                builder.add_shape(shape);
            }
            builder.end_group();
        }
    }
}

/// Outer rounded square that the module pattern is cut out of
struct Frame {
    size: f64,
    radius: f64,
    paint: Paint,
    crisp: bool,
}

impl Frame {
    fn add_to(&self, builder: &mut SvgBuilder, holes: &[Shape], mode: RenderMode) {
        let fill = fill_attrs(&self.paint, self.crisp);

        if holes.is_empty() {
            builder.add_rect(self.size, self.radius, &fill);
            return;
        }

        match mode {
            RenderMode::PathMerged => {
                let d = format!("{} {}", self.outline().to_svg_d(), merged_d(holes));
                builder.add_path(&d, &format!(r#" fill-rule="evenodd"{}"#, fill));
            }
            RenderMode::PerElement => {
                let mask_id = builder.id("holes");
                builder.start_mask(&mask_id);
                builder.add_rect(self.size, 0.0, r##" fill="#fff""##);
                let crisp = if self.crisp { CRISP_EDGES } else { "" };
                builder.start_group(&format!(r##" fill="#000"{}"##, crisp));
                for hole in holes {
                    builder.add_shape(hole);
                }
                builder.end_group();
                builder.end_mask();
                builder.add_rect(
                    self.size,
                    self.radius,
                    &format!(r#"{} mask="url(#{})""#, fill, mask_id),
                );
            }
        }
    }

    fn outline(&self) -> ResolvedPath {
        let corners = if self.radius > 0.0 {
            CornerFlags::NONE
        } else {
            CornerFlags::ALL
        };
        filleted_rect(
            Block::new(0.0, 0.0, self.size, self.size),
            corners,
            self.radius,
        )
    }
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
