//! Cheap textual pre-check run before any parsing.

/// Whether `code` may contain a call to `macro_name`.
///
/// Never misses a real call. Comments and strings mentioning the name pass
/// too; the parser sorts those out.
pub fn has_marker(code: &str, macro_name: &str) -> bool {
    !macro_name.is_empty() && code.contains(macro_name)
}
