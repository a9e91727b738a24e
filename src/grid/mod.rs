//! Module grids and the scans the renderer runs over them
//!
//! The renderer never encodes QR symbols itself. It reads a square matrix of
//! dark/light modules through the [`ModuleSource`] trait, which any encoder
//! can implement. [`ModuleGrid`] is a plain owned implementation.

pub mod corners;
pub mod runs;

use std::str::FromStr;

use crate::error::GridError;

pub use corners::CornerFlags;
pub use runs::{runs, Run, Runs};

/// Read-only view of a square module matrix
///
/// Coordinates are 0-indexed with `row, col` in `0..module_count()`.
pub trait ModuleSource {
    /// Number of modules per side
    fn module_count(&self) -> usize;

    /// Whether the module at `(row, col)` is dark
    fn is_dark(&self, row: usize, col: usize) -> bool;
}

impl<T: ModuleSource + ?Sized> ModuleSource for &T {
    fn module_count(&self) -> usize {
        (**self).module_count()
    }

    fn is_dark(&self, row: usize, col: usize) -> bool {
        (**self).is_dark(row, col)
    }
}

/// An owned, row-major module matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGrid {
    size: usize,
    modules: Vec<bool>,
}

/// Number of modules in a `size` × `size` grid
///
/// # Panics
///
/// Panics if the count does not fit in `usize`, like `Vec` does on
/// capacity overflow.
fn module_total(size: usize) -> usize {
    match size.checked_mul(size) {
        Some(total) => total,
        None => panic!("module grid of size {} is too large", size),
    }
}

impl ModuleGrid {
    /// Create an all-light grid
    ///
    /// # Panics
    ///
    /// Panics if `size * size` overflows `usize`.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            modules: vec![false; module_total(size)],
        }
    }

    /// Build a grid by asking `f(row, col)` for every module
    ///
    /// # Panics
    ///
    /// Panics if `size * size` overflows `usize`.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let modules = (0..module_total(size))
            .map(|i| f(i / size, i % size))
            .collect();
        Self { size, modules }
    }

    /// Wrap a row-major buffer of `size * size` modules
    pub fn from_bools(size: usize, modules: Vec<bool>) -> Result<Self, GridError> {
        let expected = size
            .checked_mul(size)
            .ok_or(GridError::TooLarge { size })?;
        if modules.len() != expected {
            return Err(GridError::BufferLength {
                expected,
                found: modules.len(),
            });
        }
        Ok(Self { size, modules })
    }

    /// Build a grid from text rows
    ///
    /// `#`, `X`, `x` and `1` are dark; `.`, `0`, `-`, `_` and space are light.
    /// Every row must be as long as there are rows.
    ///
    /// ```rust
    /// use qrsvg::{ModuleGrid, ModuleSource};
    ///
    /// let grid = ModuleGrid::from_rows(&["#.", ".#"]).unwrap();
    /// assert_eq!(grid.module_count(), 2);
    /// assert!(grid.is_dark(1, 1));
    /// ```
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let size = rows.len();
        if size == 0 {
            return Err(GridError::Empty);
        }

        let mut modules = Vec::with_capacity(size * size);
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != size {
                return Err(GridError::NotSquare {
                    row,
                    expected: size,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let dark = match ch {
                    '#' | 'X' | 'x' | '1' => true,
                    '.' | '0' | '-' | '_' | ' ' => false,
                    _ => return Err(GridError::InvalidModule { ch, row, col }),
                };
                modules.push(dark);
            }
        }
        Ok(Self { size, modules })
    }

    /// Set a single module
    ///
    /// Out-of-range coordinates are ignored.
    pub fn set(&mut self, row: usize, col: usize, dark: bool) {
        if row < self.size && col < self.size {
            self.modules[row * self.size + col] = dark;
        }
    }

    /// Number of dark modules
    pub fn dark_count(&self) -> usize {
        self.modules.iter().filter(|&&m| m).count()
    }
}

impl ModuleSource for ModuleGrid {
    fn module_count(&self) -> usize {
        self.size
    }

    fn is_dark(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.modules[row * self.size + col]
    }
}

impl FromStr for ModuleGrid {
    type Err = GridError;

    /// Parse newline-separated rows; surrounding blank lines and
    /// indentation are ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        Self::from_rows(&rows)
    }
}
