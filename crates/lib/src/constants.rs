//! Shared constants for path handling and rendering.

/// Characters that separate path segments.
pub const PATH_DELIMITERS: [char; 2] = ['.', '/'];

/// Reserved prefix routing a `get` to the attribute namespace.
pub const ATTRIBUTE_PREFIX: char = '@';

/// Returned by string lookups when nothing is stored at the path.
pub const BLANK: &str = "";
