//! Path segmentation for model lookups and writes.
//!
//! Paths address nested values with `.` or `/` delimiters, so
//! `lists.GoT.Starks` and `lists/GoT/Starks` name the same location. A string
//! without any delimiter is a literal key and is kept verbatim.
//!
//! # Usage
//!
//! ```rust
//! use scoped_model::path::ModelPath;
//!
//! let path = ModelPath::parse("lists.GoT.Starks.killed")?;
//! assert_eq!(path.leaf(), "killed");
//! assert_eq!(path.ancestors(), ["lists", "GoT", "Starks"]);
//! assert_eq!(path.prefix(1), ["lists", "GoT"]);
//! # Ok::<(), scoped_model::path::PathError>(())
//! ```

use std::fmt;

use thiserror::Error;

use crate::constants::{ATTRIBUTE_PREFIX, PATH_DELIMITERS};

/// Error type for path validation failures.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// The path is empty or contains nothing but delimiters.
    #[error("Invalid path '{path}': no segments")]
    InvalidPath { path: String },
}

impl PathError {
    /// Check if this error is an invalid path
    pub fn is_invalid_path(&self) -> bool {
        matches!(self, PathError::InvalidPath { .. })
    }

    /// Get the offending path
    pub fn path(&self) -> &str {
        match self {
            PathError::InvalidPath { path } => path,
        }
    }
}

impl From<PathError> for crate::Error {
    fn from(err: PathError) -> Self {
        crate::Error::Path(err)
    }
}

/// Split `path` into segments.
///
/// - No delimiter present: one segment equal to the whole input.
/// - Otherwise: the non-empty tokens between delimiters, in order.
/// - The empty string yields no segments.
pub fn segments(path: &str) -> Vec<String> {
    if path.is_empty() {
        return Vec::new();
    }
    if !path.contains(PATH_DELIMITERS) {
        return vec![path.to_string()];
    }
    path.split(PATH_DELIMITERS)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns the attribute name if `path` uses the reserved `@` prefix.
///
/// ```rust
/// # use scoped_model::path::attribute_name;
/// assert_eq!(attribute_name("@secret"), Some("secret"));
/// assert_eq!(attribute_name("secret"), None);
/// ```
pub fn attribute_name(path: &str) -> Option<&str> {
    path.strip_prefix(ATTRIBUTE_PREFIX)
}

/// A parsed, non-empty path.
///
/// Holds at least one segment, so [`ModelPath::leaf`] is always defined.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelPath {
    segments: Vec<String>,
}

impl ModelPath {
    /// Parse a path string.
    ///
    /// # Errors
    /// Returns [`PathError::InvalidPath`] if the path has no segments.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        Self::from_segments(segments(path)).ok_or_else(|| PathError::InvalidPath {
            path: path.to_string(),
        })
    }

    /// Build a path from already split segments; `None` if there are none.
    pub fn from_segments(segments: Vec<String>) -> Option<Self> {
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    /// All segments in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// All segments except the last; empty for single-segment paths.
    pub fn ancestors(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }

    /// The last segment.
    pub fn leaf(&self) -> &str {
        // Non-empty by construction
        &self.segments[self.segments.len() - 1]
    }

    /// Segments `0..=index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn prefix(&self, index: usize) -> &[String] {
        &self.segments[..=index]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns true if this path has exactly one segment.
    pub fn is_single(&self) -> bool {
        self.segments.len() == 1
    }
}

impl fmt::Display for ModelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl std::str::FromStr for ModelPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
