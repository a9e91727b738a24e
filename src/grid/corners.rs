//! Corner classification for runs
//!
//! A corner of a run is "joined" when the module diagonally adjacent across
//! that corner's horizontal edge (directly above or below the run's end
//! module) is dark. Joined corners stay square so the run visually merges
//! with its neighbour; free corners get rounded.

use super::{ModuleSource, Run};

/// Adjacency of a run's four bounding-box corners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CornerFlags {
    pub up_left: bool,
    pub up_right: bool,
    pub down_left: bool,
    pub down_right: bool,
}

impl CornerFlags {
    /// Every corner joined: a plain rectangle
    pub const ALL: Self = Self {
        up_left: true,
        up_right: true,
        down_left: true,
        down_right: true,
    };

    /// No corner joined: an isolated block
    pub const NONE: Self = Self {
        up_left: false,
        up_right: false,
        down_left: false,
        down_right: false,
    };

    /// Classify the corners of `run` against its row neighbours
    ///
    /// The first row has no upper neighbours and the last row no lower
    /// ones, so those pairs are always false there.
    pub fn classify<S: ModuleSource + ?Sized>(source: &S, run: &Run) -> Self {
        let count = source.module_count();
        let first = run.col_start;
        let last = run.last_col();

        let (up_left, up_right) = if run.row > 0 {
            (
                source.is_dark(run.row - 1, first),
                source.is_dark(run.row - 1, last),
            )
        } else {
            (false, false)
        };

        let (down_left, down_right) = if run.row + 1 < count {
            (
                source.is_dark(run.row + 1, first),
                source.is_dark(run.row + 1, last),
            )
        } else {
            (false, false)
        };

        Self {
            up_left,
            up_right,
            down_left,
            down_right,
        }
    }

    pub fn is_all(&self) -> bool {
        *self == Self::ALL
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}
