//! Error types for color parsing, grid construction and profile loading
//!
//! Rendering itself never fails. These errors surface only from the strict
//! entry points (`Color::parse`, `ModuleGrid::from_rows`,
//! `RenderOptions::from_toml_str`) for callers that want to validate input
//! before handing it to the renderer.

use thiserror::Error;

/// Byte range in a color string
pub type Span = std::ops::Range<usize>;

/// Reasons a color string is rejected by the strict parser
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    #[error("empty color string")]
    Empty,

    #[error("unexpected character at {span:?}")]
    UnexpectedCharacter { span: Span },

    #[error("unrecognized color notation '{found}'")]
    UnknownNotation { found: String },

    #[error("hex color must have 3, 6 or 8 digits, found {digits}")]
    HexLength { digits: usize },

    #[error("expected {expected}, found {found}")]
    Expected { expected: &'static str, found: String },

    #[error("color channel '{value}' is not an integer in 0..=255")]
    Channel { value: String },

    #[error("alpha '{value}' is not a number in [0, 1]")]
    Alpha { value: String },

    #[error("trailing input after color: {found}")]
    Trailing { found: String },
}

impl ColorError {
    /// Create an "expected X, found Y" error
    pub fn expected(expected: &'static str, found: impl Into<String>) -> Self {
        Self::Expected {
            expected,
            found: found.into(),
        }
    }
}

/// Errors from building a [`crate::ModuleGrid`] out of caller data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("module grid has no rows")]
    Empty,

    #[error("row {row} has {found} modules, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("module buffer holds {found} entries, expected {expected}")]
    BufferLength { expected: usize, found: usize },

    #[error("module grid of size {size} has more modules than fit in memory")]
    TooLarge { size: usize },

    #[error("invalid module character '{ch}' at row {row}, column {col}")]
    InvalidModule { ch: char, row: usize, col: usize },
}

/// Errors that can occur when loading a render profile
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Failed to parse render profile TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}
