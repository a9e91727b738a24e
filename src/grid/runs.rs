//! Horizontal run detection
//!
//! A run is a maximal sequence of dark modules within one row. Runs are
//! produced by a single left-to-right scan and never overlap or touch.

use std::iter::FusedIterator;

use super::ModuleSource;

/// A maximal horizontal run of dark modules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub row: usize,
    pub col_start: usize,
    /// Exclusive
    pub col_end: usize,
}

impl Run {
    /// Number of modules in the run (always at least one)
    pub fn len(&self) -> usize {
        self.col_end - self.col_start
    }

    pub fn is_empty(&self) -> bool {
        self.col_end == self.col_start
    }

    /// Column of the rightmost module
    pub fn last_col(&self) -> usize {
        self.col_end - 1
    }
}

/// Iterator over the runs of one row, see [`runs`]
#[derive(Debug)]
pub struct Runs<'a, S: ?Sized> {
    source: &'a S,
    row: usize,
    col: usize,
    count: usize,
}

impl<S: ModuleSource + ?Sized> Iterator for Runs<'_, S> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        while self.col < self.count && !self.source.is_dark(self.row, self.col) {
            self.col += 1;
        }
        if self.col >= self.count {
            return None;
        }

        let col_start = self.col;
        while self.col < self.count && self.source.is_dark(self.row, self.col) {
            self.col += 1;
        }
        Some(Run {
            row: self.row,
            col_start,
            col_end: self.col,
        })
    }
}

impl<S: ModuleSource + ?Sized> FusedIterator for Runs<'_, S> {}

/// Scan `row` of `source` into its runs, left to right
///
/// A run still open at the end of the row closes at the row boundary.
pub fn runs<S: ModuleSource + ?Sized>(source: &S, row: usize) -> Runs<'_, S> {
    Runs {
        source,
        row,
        col: 0,
        count: source.module_count(),
    }
}
