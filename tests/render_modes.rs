//! Merged and per-element output must rasterize to the same image
//!
//! Each case is rendered both ways, rasterized with resvg and compared pixel
//! by pixel. Anti-aliasing along edges may differ slightly, so the images
//! are compared by mean channel difference.

use qrsvg::{render, ModuleGrid, ModuleSource, RenderMode, RenderOptions, SvgConfig, Variation};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

/// Pixels per module; an integer keeps module edges on pixel boundaries
const SCALE: u32 = 10;

const MAX_MEAN_DIFF: f64 = 0.5;

fn sample_grid() -> ModuleGrid {
    let n = 21;
    let mut state: u32 = 0x9e37_79b9;
    ModuleGrid::from_fn(n, |row, col| {
        for (top, left) in [(0, 0), (0, n - 7), (n - 7, 0)] {
            if (top..top + 7).contains(&row) && (left..left + 7).contains(&col) {
                let (r, c) = (row - top, col - left);
                let ring = r.min(c).min(6 - r).min(6 - c);
                return ring != 1;
            }
        }
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state % 3 != 0
    })
}

fn rasterize(svg: &str) -> Pixmap {
    let tree = Tree::from_str(svg, &Options::default()).expect("generated SVG should parse");
    let size = tree.size().to_int_size();
    let mut pixmap = Pixmap::new(size.width(), size.height()).expect("pixmap");
    resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());
    pixmap
}

fn mean_diff(a: &Pixmap, b: &Pixmap) -> f64 {
    assert_eq!((a.width(), a.height()), (b.width(), b.height()));
    let total: u64 = a
        .data()
        .iter()
        .zip(b.data())
        .map(|(x, y)| u64::from(x.abs_diff(*y)))
        .sum();
    total as f64 / a.data().len() as f64
}

fn assert_modes_match(grid: &ModuleGrid, options: RenderOptions) {
    let merged = render(grid, &options.clone().with_render_mode(RenderMode::PathMerged));
    let per_element = render(grid, &options.clone().with_render_mode(RenderMode::PerElement));

    let a = rasterize(&merged);
    let b = rasterize(&per_element);

    let painted = a.data().chunks(4).filter(|px| px[3] > 0).count();
    assert!(painted > 0, "nothing drawn for {:?}", options);

    let diff = mean_diff(&a, &b);
    assert!(
        diff < MAX_MEAN_DIFF,
        "mean difference {} for {:?}\nmerged: {}\nper element: {}",
        diff,
        options,
        merged,
        per_element
    );
}

fn variations() -> [Variation; 3] {
    [Variation::Normal, Variation::Dotted, Variation::Rounded]
}

fn base(grid: &ModuleGrid) -> RenderOptions {
    RenderOptions::new().with_width(grid.module_count() as u32 * SCALE)
}

#[test]
fn test_background_and_foreground() {
    let grid = sample_grid();
    for variation in variations() {
        let options = base(&grid)
            .with_foreground("#000")
            .with_background("#fff")
            .with_variation(variation);
        assert_modes_match(&grid, options);
    }
}

#[test]
fn test_foreground_only() {
    let grid = sample_grid();
    for variation in variations() {
        let options = base(&grid)
            .with_foreground("#700096")
            .with_background("#ffffff00")
            .with_variation(variation);
        assert_modes_match(&grid, options);
    }
}

#[test]
fn test_translucent_foreground() {
    let grid = sample_grid();
    for variation in variations() {
        let options = base(&grid)
            .with_foreground("rgba(0, 0, 255, 0.4)")
            .with_background("rgba(255, 255, 0, 0.5)")
            .with_variation(variation);
        assert_modes_match(&grid, options);
    }
}

#[test]
fn test_frame() {
    let grid = sample_grid();
    for variation in variations() {
        for (border, radius) in [(0, 0.0), (4, 50.0), (8, 25.0)] {
            let view = grid.module_count() as u32 + 2 * border;
            let options = RenderOptions::new()
                .with_width(view * SCALE)
                .with_foreground("#00000000")
                .with_background("#123456")
                .with_variation(variation)
                .with_border(border, radius);
            assert_modes_match(&grid, options);
        }
    }
}

#[test]
fn test_frame_holes_are_transparent() {
    let mut grid = ModuleGrid::new(21);
    grid.set(10, 10, true);
    let options = RenderOptions::new()
        .with_width(25 * SCALE)
        .with_foreground("#ffffff00")
        .with_background("#000")
        .with_border(2, 0.0);

    for mode in [RenderMode::PathMerged, RenderMode::PerElement] {
        let pixmap = rasterize(&render(&grid, &options.clone().with_render_mode(mode)));
        let at = |x: u32, y: u32| pixmap.pixel(x, y).map(|px| px.alpha());
        // Centre of module (10, 10) shifted by the border
        let hole = (12 * SCALE + SCALE / 2, 12 * SCALE + SCALE / 2);
        assert_eq!(at(hole.0, hole.1), Some(0), "{:?}", mode);
        assert_eq!(at(5, 5), Some(255), "{:?}", mode);
    }
}

#[test]
fn test_frame_at_fractional_scale() {
    // 5-unit view at 10.6 px per module puts row boundaries inside pixels
    let grid = ModuleGrid::from_rows(&[".#.", ".#.", ".#."]).unwrap();
    for variation in [Variation::Normal, Variation::Rounded] {
        let options = RenderOptions::new()
            .with_width(53)
            .with_foreground("#ffffff00")
            .with_background("#000")
            .with_variation(variation)
            .with_border(1, 0.0);
        assert_modes_match(&grid, options.clone());

        for mode in [RenderMode::PathMerged, RenderMode::PerElement] {
            let pixmap = rasterize(&render(&grid, &options.clone().with_render_mode(mode)));
            for y in [21, 31] {
                let alpha = pixmap.pixel(26, y).map(|px| px.alpha());
                assert_eq!(alpha, Some(0), "{} {:?} at y={}", variation, mode, y);
            }
        }
    }
}

#[test]
fn test_id_prefix_keeps_document_valid() {
    let grid = sample_grid();
    let config = SvgConfig::new().with_id_prefix("a\"b<");
    let options = RenderOptions::new()
        .with_foreground("#ffffff00")
        .with_background("#000")
        .with_border(2, 0.0)
        .with_render_mode(RenderMode::PerElement);

    let svg = qrsvg::render_svg(&grid, &options, &config);
    assert!(svg.contains(r#"<rect id="a_b_p""#), "{}", svg);
    assert!(svg.contains(r#"mask="url(#a_b_holes)""#), "{}", svg);
    assert!(Tree::from_str(&svg, &Options::default()).is_ok());
}
