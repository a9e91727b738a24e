//! Dotted variation: one circle per dark module, never merged

use crate::grid::ModuleSource;

use super::path::MODULE_RADIUS;
use super::shape::Shape;

/// A circle centred on every dark module, row-major
pub fn dot_shapes<S: ModuleSource + ?Sized>(source: &S, offset: f64) -> Vec<Shape> {
    let count = source.module_count();
    (0..count)
        .flat_map(|row| (0..count).map(move |col| (row, col)))
        .filter(|&(row, col)| source.is_dark(row, col))
        .map(|(row, col)| Shape::Circle {
            cx: col as f64 + offset + MODULE_RADIUS,
            cy: row as f64 + offset + MODULE_RADIUS,
        })
        .collect()
}
