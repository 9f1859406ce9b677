//! Script block discovery for single-file components.

use std::sync::LazyLock;

use regex::Regex;

static SCRIPT_OPEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<script((?:\s+[^\s=>/"']+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>"']+))?)*)\s*>"#,
    )
    .unwrap()
});
static SCRIPT_CLOSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</script\s*>").unwrap());
static ATTR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s=>/"']+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>"']+)))?"#).unwrap()
});

/// A `<script>` element body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptBlock<'a> {
    pub content: &'a str,
    /// Byte offset of `content` in the component text.
    pub offset: usize,
    pub lang: Option<&'a str>,
    pub setup: bool,
}

/// All script blocks in document order. An unterminated block is ignored.
pub fn find_script_blocks(code: &str) -> Vec<ScriptBlock<'_>> {
    let mut blocks = Vec::new();
    let mut search_pos = 0;

    while let Some(open) = SCRIPT_OPEN_REGEX.captures_at(code, search_pos) {
        let Some(tag) = open.get(0) else {
            break;
        };
        let attrs = open.get(1).map(|m| m.as_str()).unwrap_or_default();
        let Some(close) = SCRIPT_CLOSE_REGEX.find_at(code, tag.end()) else {
            break;
        };

        let mut block = ScriptBlock {
            content: &code[tag.end()..close.start()],
            offset: tag.end(),
            lang: None,
            setup: false,
        };
        for attr in ATTR_REGEX.captures_iter(attrs) {
            let value = attr.get(2).or(attr.get(3)).or(attr.get(4));
            match &attr[1] {
                "setup" => block.setup = true,
                "lang" => block.lang = value.map(|m| m.as_str()),
                _ => {}
            }
        }
        blocks.push(block);

        search_pos = close.end();
    }

    blocks
}

/// `<script setup>` wins over a plain `<script>`.
pub fn select_script_block<'b, 'a>(blocks: &'b [ScriptBlock<'a>]) -> Option<&'b ScriptBlock<'a>> {
    blocks
        .iter()
        .find(|b| b.setup)
        .or_else(|| blocks.first())
}
