use crate::constants::INVISIBLE_CHARS;

/// Text cleaning utilities for display and comparison
pub struct StringUtils;

impl StringUtils {
    /// Whether `c` is one of the zero-width/invisible characters that get stripped
    pub fn is_invisible(c: char) -> bool {
        INVISIBLE_CHARS.contains(&c)
    }

    /// Remove every invisible character, leaving all other whitespace untouched
    pub fn strip_invisible(s: &str) -> String {
        s.chars().filter(|c| !Self::is_invisible(*c)).collect()
    }

    /// Strip invisible characters, then collapse every whitespace run to a
    /// single ASCII space and trim both ends.
    ///
    /// Stripping happens first so a zero-width character inside a word never
    /// turns into a word boundary.
    pub fn remove_duplicate_spaces(s: &str) -> String {
        Self::strip_invisible(s)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Strip invisible characters and drop all whitespace
    pub fn remove_all_spaces(s: &str) -> String {
        Self::strip_invisible(s).split_whitespace().collect()
    }
}
