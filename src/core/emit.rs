//! Code regeneration. Output is assembled from slices of the input, so
//! everything outside the touched ranges stays byte-identical.

use crate::core::imports::ImportStatement;

/// Module emitted when there is nothing valid to extract.
pub const EMPTY_MODULE: &str = "export default {}";

/// `code` with every range in `ranges` cut out. Ranges are sorted and
/// disjoint.
pub fn remove_ranges(code: &str, ranges: &[(usize, usize)]) -> String {
    let mut out = String::with_capacity(code.len());
    let mut cursor = 0;
    for &(start, end) in ranges {
        out.push_str(&code[cursor..start]);
        cursor = end;
    }
    out.push_str(&code[cursor..]);
    out
}

/// Standalone module: pruned imports, one per line, then the default export.
pub fn render_module(imports: &[ImportStatement<'_>], config_text: &str) -> String {
    let mut out = String::new();
    for import in imports {
        out.push_str(&import.to_string());
        out.push('\n');
    }
    out.push_str("export default ");
    out.push_str(config_text);
    out
}
