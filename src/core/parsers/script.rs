use swc_common::{BytePos, FileName, SourceMap, Span};
use swc_ecma_ast::Module;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};
use tracing::trace;

use crate::core::error::{MacroError, MacroResult};
use crate::core::source::ScriptLang;

/// A parsed script body together with what is needed to map swc spans back
/// onto the text of the whole file.
pub struct ParsedScript<'a> {
    pub module: Module,
    /// Script body text.
    pub text: &'a str,
    /// Byte offset of `text` inside the full file.
    pub offset: usize,
    start_pos: BytePos,
}

impl<'a> ParsedScript<'a> {
    /// Source text covered by `span`.
    pub fn snippet(&self, span: Span) -> &'a str {
        let (lo, hi) = self.local_range(span);
        self.text.get(lo..hi).unwrap_or_default()
    }

    /// Byte range of `span` in the full file text.
    pub fn file_range(&self, span: Span) -> (usize, usize) {
        let (lo, hi) = self.local_range(span);
        (self.offset + lo, self.offset + hi)
    }

    fn local_range(&self, span: Span) -> (usize, usize) {
        let lo = (span.lo.0.saturating_sub(self.start_pos.0)) as usize;
        let hi = (span.hi.0.saturating_sub(self.start_pos.0)) as usize;
        (lo.min(self.text.len()), hi.min(self.text.len()))
    }
}

const BOM: char = '\u{FEFF}';

fn syntax_for(lang: ScriptLang) -> Syntax {
    match lang {
        ScriptLang::Ts => Syntax::Typescript(TsSyntax::default()),
        ScriptLang::Tsx => Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        }),
        ScriptLang::Js | ScriptLang::Jsx => Syntax::Es(EsSyntax {
            jsx: true,
            ..Default::default()
        }),
    }
}

/// Parse a script body into a module.
///
/// Uses its own `SourceMap`, so concurrent calls share nothing. Errors the
/// parser recovered from are failures too: a partially understood file is
/// never rewritten.
pub fn parse_script<'a>(
    text: &'a str,
    offset: usize,
    file_path: &str,
    lang: ScriptLang,
) -> MacroResult<ParsedScript<'a>> {
    // swc drops a leading BOM, so spans start after it.
    let (text, offset) = match text.strip_prefix(BOM) {
        Some(rest) => (rest, offset + BOM.len_utf8()),
        None => (text, offset),
    };

    let source_map = SourceMap::default();
    let source_file =
        source_map.new_source_file(FileName::Real(file_path.into()).into(), text.to_string());

    let mut parser = Parser::new(syntax_for(lang), StringInput::from(&*source_file), None);
    let module = parser
        .parse_module()
        .map_err(|e| MacroError::syntax(format!("{:?}", e.kind())))?;

    if let Some(error) = parser.take_errors().into_iter().next() {
        return Err(MacroError::syntax(format!("{:?}", error.kind())));
    }

    trace!(file_path, items = module.body.len(), "parsed script");

    Ok(ParsedScript {
        module,
        text,
        offset,
        start_pos: source_file.start_pos,
    })
}
