//! Contour construction for runs
//!
//! Every run becomes one closed contour: a rectangle whose four corners are
//! either square or filleted with a quarter circle. All contours wind
//! clockwise (SVG y-down), so stacked blocks compose without gaps and the
//! same contours can be even-odd combined with a frame.

use crate::grid::{CornerFlags, Run};

/// Fillet and dot radius in module units
pub const MODULE_RADIUS: f64 = 0.5;

/// Extra height added below every block except in the last row, so stacked
/// blocks overlap slightly and no anti-aliasing seam shows between them
pub const ROW_OVERLAP: f64 = 0.005;

/// A point in module units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn approx_eq(self, other: Point) -> bool {
        (self.x - other.x).abs() < 1e-9 && (self.y - other.y).abs() < 1e-9
    }
}

/// Axis-aligned box covered by one run, in module units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Block {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box for `run`, shifted by `offset` on both axes and extended
    /// downwards by `overlap`
    pub fn from_run(run: &Run, offset: f64, overlap: f64) -> Self {
        Self {
            x: run.col_start as f64 + offset,
            y: run.row as f64 + offset,
            width: run.len() as f64,
            height: 1.0 + overlap,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// A segment in a resolved path
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Move to starting point
    MoveTo(Point),
    /// Straight line to point
    LineTo(Point),
    /// Circular arc to point
    ArcTo {
        end: Point,
        radius: f64,
        large_arc: bool,
        sweep: bool, // true = clockwise in SVG coordinates (y-down)
    },
    /// Close path back to start
    Close,
}

/// A resolved path ready for SVG rendering
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedPath {
    pub segments: Vec<PathSegment>,
}

impl ResolvedPath {
    /// Convert to SVG path `d` attribute string
    pub fn to_svg_d(&self) -> String {
        let mut d = String::new();

        for seg in &self.segments {
            if !d.is_empty() {
                d.push(' ');
            }
            match seg {
                PathSegment::MoveTo(p) => {
                    d.push_str(&format!("M{} {}", fmt_num(p.x), fmt_num(p.y)));
                }
                PathSegment::LineTo(p) => {
                    d.push_str(&format!("L{} {}", fmt_num(p.x), fmt_num(p.y)));
                }
                PathSegment::ArcTo {
                    end,
                    radius,
                    large_arc,
                    sweep,
                } => {
                    let r = fmt_num(*radius);
                    // SVG arc: A rx ry x-axis-rotation large-arc-flag sweep-flag x y
                    d.push_str(&format!(
                        "A{} {} 0 {} {} {} {}",
                        r,
                        r,
                        u8::from(*large_arc),
                        u8::from(*sweep),
                        fmt_num(end.x),
                        fmt_num(end.y)
                    ));
                }
                PathSegment::Close => d.push('Z'),
            }
        }

        d
    }
}

/// Incremental builder that drops zero-length lines
struct ContourBuilder {
    segments: Vec<PathSegment>,
    current: Point,
}

impl ContourBuilder {
    fn start(at: Point) -> Self {
        Self {
            segments: vec![PathSegment::MoveTo(at)],
            current: at,
        }
    }

    fn line_to(&mut self, to: Point) {
        if !self.current.approx_eq(to) {
            self.segments.push(PathSegment::LineTo(to));
            self.current = to;
        }
    }

    fn arc_to(&mut self, to: Point, radius: f64) {
        self.segments.push(PathSegment::ArcTo {
            end: to,
            radius,
            large_arc: false,
            sweep: true,
        });
        self.current = to;
    }

    fn close(mut self) -> ResolvedPath {
        self.segments.push(PathSegment::Close);
        ResolvedPath {
            segments: self.segments,
        }
    }
}

/// Clockwise contour of `block` with every corner whose flag is false
/// replaced by a quarter-circle fillet of `radius`
///
/// A `true` flag keeps the corner square. With all flags true this is a
/// plain rectangle; with all false and a block one unit high it is a pill.
pub fn filleted_rect(block: Block, corners: CornerFlags, radius: f64) -> ResolvedPath {
    let (x1, y1, x2, y2) = (block.x, block.y, block.right(), block.bottom());
    let r = radius;

    let mut path = if corners.up_left {
        ContourBuilder::start(Point::new(x1, y1))
    } else {
        ContourBuilder::start(Point::new(x1 + r, y1))
    };

    // Top edge, then the top-right corner
    if corners.up_right {
        path.line_to(Point::new(x2, y1));
    } else {
        path.line_to(Point::new(x2 - r, y1));
        path.arc_to(Point::new(x2, y1 + r), r);
    }

    // Right edge, then the bottom-right corner
    if corners.down_right {
        path.line_to(Point::new(x2, y2));
    } else {
        path.line_to(Point::new(x2, y2 - r));
        path.arc_to(Point::new(x2 - r, y2), r);
    }

    // Bottom edge, then the bottom-left corner
    if corners.down_left {
        path.line_to(Point::new(x1, y2));
    } else {
        path.line_to(Point::new(x1 + r, y2));
        path.arc_to(Point::new(x1, y2 - r), r);
    }

    // Left edge back up; a square top-left corner is closed by `Z`
    if !corners.up_left {
        path.line_to(Point::new(x1, y1 + r));
        path.arc_to(Point::new(x1 + r, y1), r);
    }

    path.close()
}

/// Clockwise full circle of [`MODULE_RADIUS`] around `(cx, cy)`
pub fn circle(cx: f64, cy: f64) -> ResolvedPath {
    let r = MODULE_RADIUS;
    let left = Point::new(cx - r, cy);
    let right = Point::new(cx + r, cy);
    ResolvedPath {
        segments: vec![
            PathSegment::MoveTo(left),
            PathSegment::ArcTo {
                end: right,
                radius: r,
                large_arc: true,
                sweep: true,
            },
            PathSegment::ArcTo {
                end: left,
                radius: r,
                large_arc: true,
                sweep: true,
            },
            PathSegment::Close,
        ],
    }
}

/// Format a coordinate with at most three decimals and no trailing zeros
///
/// Output must be byte-identical for identical input, so every number in
/// the document goes through here.
pub fn fmt_num(value: f64) -> String {
    let mut s = format!("{:.3}", value);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(x: f64, y: f64, width: f64) -> Block {
        Block::new(x, y, width, 1.0)
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(0.0), "0");
        assert_eq!(fmt_num(-0.0), "0");
        assert_eq!(fmt_num(21.0), "21");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(3.0 + 1.0 + ROW_OVERLAP), "4.005");
        assert_eq!(fmt_num(128.0 / 255.0), "0.502");
        assert_eq!(fmt_num(-2.25), "-2.25");
    }

    #[test]
    fn test_plain_rectangle() {
        let d = filleted_rect(unit(2.0, 3.0, 4.0), CornerFlags::ALL, MODULE_RADIUS).to_svg_d();
        assert_eq!(d, "M2 3 L6 3 L6 4 L2 4 Z");
    }

    #[test]
    fn test_pill() {
        let d = filleted_rect(unit(0.0, 0.0, 3.0), CornerFlags::NONE, MODULE_RADIUS).to_svg_d();
        assert_eq!(
            d,
            "M0.5 0 L2.5 0 A0.5 0.5 0 0 1 3 0.5 A0.5 0.5 0 0 1 2.5 1 L0.5 1 A0.5 0.5 0 0 1 0 0.5 A0.5 0.5 0 0 1 0.5 0 Z"
        );
    }

    #[test]
    fn test_single_fillet() {
        // Only the top-left corner is free
        let corners = CornerFlags {
            up_left: false,
            ..CornerFlags::ALL
        };
        let d = filleted_rect(unit(1.0, 1.0, 2.0), corners, MODULE_RADIUS).to_svg_d();
        assert_eq!(d, "M1.5 1 L3 1 L3 2 L1 2 L1 1.5 A0.5 0.5 0 0 1 1.5 1 Z");
    }

    #[test]
    fn test_overlap_keeps_fillets_on_bottom_edge() {
        let block = Block::new(0.0, 0.0, 2.0, 1.0 + ROW_OVERLAP);
        let corners = CornerFlags {
            down_right: false,
            ..CornerFlags::ALL
        };
        let d = filleted_rect(block, corners, MODULE_RADIUS).to_svg_d();
        assert_eq!(d, "M0 0 L2 0 L2 0.505 A0.5 0.5 0 0 1 1.5 1.005 L0 1.005 Z");
    }

    /// Shoelace sum over segment endpoints; positive means clockwise
    /// on screen (y grows downwards)
    fn signed_area(path: &ResolvedPath) -> f64 {
        let points: Vec<Point> = path
            .segments
            .iter()
            .filter_map(|seg| match seg {
                PathSegment::MoveTo(p) | PathSegment::LineTo(p) => Some(*p),
                PathSegment::ArcTo { end, .. } => Some(*end),
                PathSegment::Close => None,
            })
            .collect();
        let n = points.len();
        (0..n)
            .map(|i| {
                let (a, b) = (points[i], points[(i + 1) % n]);
                a.x * b.y - b.x * a.y
            })
            .sum::<f64>()
            / 2.0
    }

    #[test]
    fn test_every_pattern_is_closed_and_clockwise() {
        for bits in 0u8..16 {
            let corners = CornerFlags {
                up_left: bits & 8 != 0,
                up_right: bits & 4 != 0,
                down_left: bits & 2 != 0,
                down_right: bits & 1 != 0,
            };
            let path = filleted_rect(unit(0.0, 0.0, 2.0), corners, MODULE_RADIUS);
            assert!(matches!(path.segments.first(), Some(PathSegment::MoveTo(_))));
            assert_eq!(path.segments.last(), Some(&PathSegment::Close));
            for seg in &path.segments {
                if let PathSegment::ArcTo { sweep, radius, .. } = seg {
                    assert!(*sweep);
                    assert_eq!(*radius, MODULE_RADIUS);
                }
            }
            let arcs = path
                .segments
                .iter()
                .filter(|s| matches!(s, PathSegment::ArcTo { .. }))
                .count();
            assert_eq!(arcs, 4 - bits.count_ones() as usize);
            assert!(
                signed_area(&path) > 0.0,
                "pattern {:04b} winds counter-clockwise",
                bits
            );
        }
    }

    #[test]
    fn test_signed_area_of_plain_block() {
        let path = filleted_rect(unit(0.0, 0.0, 3.0), CornerFlags::ALL, MODULE_RADIUS);
        assert!((signed_area(&path) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_circle() {
        assert_eq!(
            circle(0.5, 0.5).to_svg_d(),
            "M0 0.5 A0.5 0.5 0 1 1 1 0.5 A0.5 0.5 0 1 1 0 0.5 Z"
        );
    }

    #[test]
    fn test_block_from_run() {
        let run = Run {
            row: 2,
            col_start: 1,
            col_end: 4,
        };
        assert_eq!(
            Block::from_run(&run, 8.0, 0.0),
            Block::new(9.0, 10.0, 3.0, 1.0)
        );
        assert_eq!(fmt_num(Block::from_run(&run, 0.0, ROW_OVERLAP).bottom()), "3.005");
    }
}
