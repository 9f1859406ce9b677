//! Parser adapter.
//!
//! - `sfc`: locates script blocks inside single-file components
//! - `script`: parses a script body with swc, surfacing every error as a value

pub mod script;
pub mod sfc;

use crate::core::error::MacroResult;
use crate::core::source::{FileKind, ScriptLang};

pub use script::{ParsedScript, parse_script};
pub use sfc::{ScriptBlock, find_script_blocks, select_script_block};

/// Parse the script portion of `code` according to `kind`.
///
/// Returns `Ok(None)` for a component without any script block.
pub fn parse<'a>(
    code: &'a str,
    file_path: &str,
    kind: FileKind,
) -> MacroResult<Option<ParsedScript<'a>>> {
    match kind {
        FileKind::Script(lang) => parse_script(code, 0, file_path, lang).map(Some),
        FileKind::Component => {
            let blocks = find_script_blocks(code);
            let Some(block) = select_script_block(&blocks) else {
                return Ok(None);
            };
            let lang = block
                .lang
                .and_then(ScriptLang::from_lang)
                .unwrap_or(ScriptLang::Js);
            parse_script(block.content, block.offset, file_path, lang).map(Some)
        }
    }
}
