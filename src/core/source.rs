//! Input model: the source unit handed over by the host and the request it
//! encodes.

use std::path::Path;

use regex::Regex;

/// Name of the marker call when none is configured.
pub const DEFAULT_MACRO_NAME: &str = "definePage";

/// Engine-facing options.
#[derive(Debug, Clone)]
pub struct MacroOptions {
    macro_name: String,
    /// `[?&]<macro_name>\b`; `None` for an empty name.
    query_marker: Option<Regex>,
}

impl MacroOptions {
    pub fn new(macro_name: impl Into<String>) -> Self {
        let macro_name = macro_name.into();
        let query_marker = if macro_name.is_empty() {
            None
        } else {
            Regex::new(&format!(r"[?&]{}\b", regex::escape(&macro_name))).ok()
        };
        Self {
            macro_name,
            query_marker,
        }
    }

    pub fn macro_name(&self) -> &str {
        &self.macro_name
    }

    /// Byte index of the `?` or `&` introducing the marker as a query
    /// parameter. A file merely named after the macro does not match.
    fn find_query_marker(&self, id: &str) -> Option<usize> {
        self.query_marker
            .as_ref()
            .and_then(|regex| regex.find(id))
            .map(|m| m.start())
    }
}

impl PartialEq for MacroOptions {
    fn eq(&self, other: &Self) -> bool {
        self.macro_name == other.macro_name
    }
}

impl Eq for MacroOptions {}

impl Default for MacroOptions {
    fn default() -> Self {
        Self::new(DEFAULT_MACRO_NAME)
    }
}

/// What the host asks the engine to produce for one identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestVariant {
    /// Full source with the marker call removed, or nothing.
    PlainFile,
    /// A standalone module default-exporting the configuration object.
    ExtractOnly,
}

/// Script dialect used to parse a script body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptLang {
    Js,
    Jsx,
    Ts,
    Tsx,
}

impl ScriptLang {
    /// Map a `lang` attribute or file extension (without the dot).
    pub fn from_lang(lang: &str) -> Option<Self> {
        match lang {
            "js" | "mjs" | "cjs" => Some(Self::Js),
            "jsx" => Some(Self::Jsx),
            "ts" | "mts" | "cts" => Some(Self::Ts),
            "tsx" => Some(Self::Tsx),
            _ => None,
        }
    }
}

/// How the text of a source unit is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Single-file component: only its `<script>` blocks are parsed.
    Component,
    /// Plain script parsed as a whole.
    Script(ScriptLang),
}

impl FileKind {
    pub fn from_path(path: &str) -> Option<Self> {
        let extension = Path::new(path).extension()?.to_str()?;
        if extension == "vue" {
            return Some(Self::Component);
        }
        ScriptLang::from_lang(extension).map(Self::Script)
    }
}

/// One file as seen by the host: identifier plus text.
#[derive(Debug, Clone, Copy)]
pub struct SourceUnit<'a> {
    pub id: &'a str,
    pub code: &'a str,
}

impl<'a> SourceUnit<'a> {
    pub fn new(id: &'a str, code: &'a str) -> Self {
        Self { id, code }
    }

    pub fn variant(&self, options: &MacroOptions) -> RequestVariant {
        if options.find_query_marker(self.id).is_some() {
            RequestVariant::ExtractOnly
        } else {
            RequestVariant::PlainFile
        }
    }

    /// The file path with any request query stripped.
    pub fn path(&self, options: &MacroOptions) -> &'a str {
        let id = self.id;
        let end = match (id.find('?'), options.find_query_marker(id)) {
            (Some(q), Some(m)) => q.min(m),
            (Some(q), None) => q,
            (None, Some(m)) => m,
            (None, None) => id.len(),
        };
        &id[..end]
    }

    pub fn kind(&self, options: &MacroOptions) -> Option<FileKind> {
        FileKind::from_path(self.path(options))
    }
}
