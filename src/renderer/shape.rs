//! Shapes for the dark modules of a grid
//!
//! Both render modes start from the same list of shapes: merged output
//! concatenates their path data into one `<path>`, per-element output writes
//! one primitive per shape. Keeping a single source of geometry is what
//! makes the two modes interchangeable.

use log::trace;

use crate::grid::{runs, CornerFlags, ModuleSource};

use super::config::Variation;
use super::dots::dot_shapes;
use super::path::{circle, filleted_rect, fmt_num, Block, ResolvedPath, MODULE_RADIUS};

/// One drawable piece of the module pattern
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Single-module rectangle drawn through the shared `<defs>` block
    UnitBlock(Block),
    /// Plain rectangle
    Rect(Block),
    /// Circle of [`MODULE_RADIUS`]
    Circle { cx: f64, cy: f64 },
    /// Rectangle with some corners filleted
    Contour(ResolvedPath),
}

impl Shape {
    /// Path data for merged output
    pub fn to_path_d(&self) -> String {
        match self {
            Shape::UnitBlock(block) | Shape::Rect(block) => {
                filleted_rect(*block, CornerFlags::ALL, MODULE_RADIUS).to_svg_d()
            }
            Shape::Circle { cx, cy } => circle(*cx, *cy).to_svg_d(),
            Shape::Contour(path) => path.to_svg_d(),
        }
    }

    /// Standalone element for per-element output
    pub fn to_element(&self, unit_id: &str) -> String {
        match self {
            Shape::UnitBlock(block) => format!(
                r##"<use href="#{}" x="{}" y="{}"/>"##,
                unit_id,
                fmt_num(block.x),
                fmt_num(block.y)
            ),
            Shape::Rect(block) => format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}"/>"#,
                fmt_num(block.x),
                fmt_num(block.y),
                fmt_num(block.width),
                fmt_num(block.height)
            ),
            Shape::Circle { cx, cy } => format!(
                r#"<circle cx="{}" cy="{}" r="{}"/>"#,
                fmt_num(*cx),
                fmt_num(*cy),
                fmt_num(MODULE_RADIUS)
            ),
            Shape::Contour(path) => format!(r#"<path d="{}"/>"#, path.to_svg_d()),
        }
    }
}

/// Choose the shape for one run block
///
/// Fully joined runs stay rectangles (single modules of the standard height
/// reuse the unit block), isolated single modules become circles and
/// everything else gets per-corner fillets.
pub fn run_shape(block: Block, corners: CornerFlags, unit_height: f64) -> Shape {
    let single = (block.width - 1.0).abs() < 1e-9;

    if corners.is_all() {
        if single && (block.height - unit_height).abs() < 1e-9 {
            Shape::UnitBlock(block)
        } else {
            Shape::Rect(block)
        }
    } else if corners.is_none() && single {
        Shape::Circle {
            cx: block.x + MODULE_RADIUS,
            cy: block.y + MODULE_RADIUS,
        }
    } else {
        Shape::Contour(filleted_rect(block, corners, MODULE_RADIUS))
    }
}

/// Shapes for every dark module of `source` in row-major order
///
/// `offset` shifts the whole pattern (used for frame borders). `overlap` is
/// added below every row but the last.
pub fn pattern_shapes<S: ModuleSource + ?Sized>(
    source: &S,
    variation: Variation,
    offset: f64,
    overlap: f64,
) -> Vec<Shape> {
    if variation == Variation::Dotted {
        return dot_shapes(source, offset);
    }

    let count = source.module_count();
    let unit_height = 1.0 + overlap;
    let mut shapes = Vec::new();

    for row in 0..count {
        let row_overlap = if row + 1 == count { 0.0 } else { overlap };
        let before = shapes.len();
        for run in runs(source, row) {
            let corners = match variation {
                Variation::Rounded => CornerFlags::classify(source, &run),
                _ => CornerFlags::ALL,
            };
            let block = Block::from_run(&run, offset, row_overlap);
            shapes.push(run_shape(block, corners, unit_height));
        }
        trace!("row {}: {} runs", row, shapes.len() - before);
    }

    shapes
}
