//! Outcome dispatcher: the two host-facing entry points of the engine.
//!
//! Per invocation the pipeline is
//! scan → parse → locate → validate → prune → emit,
//! and any failure ends it with the conservative result for the request plus
//! exactly one warning. Nothing here raises to the caller.

use std::collections::HashSet;

use serde::Serialize;
use swc_ecma_ast::{Expr, Lit, ObjectLit, Prop, PropName, PropOrSpread};
use tracing::debug;

use crate::core::emit::{EMPTY_MODULE, remove_ranges, render_module};
use crate::core::error::{MacroResult, Stage};
use crate::core::imports::{collect_imports, prune_imports};
use crate::core::locate::{find_call_site, find_call_sites};
use crate::core::parsers::{ParsedScript, parse};
use crate::core::scanner::has_marker;
use crate::core::scope::{ScriptBindings, collect_references, validate};
use crate::core::source::{FileKind, MacroOptions, RequestVariant, SourceUnit};
use crate::core::warnings::WarningSink;

/// Result of one `transform` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to do; the host keeps the file as is.
    NoTransform,
    /// The full source with the marker call removed.
    RewrittenSource(String),
    /// A standalone module default-exporting the configuration.
    ExtractedModule(String),
}

impl Outcome {
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::NoTransform => None,
            Self::RewrittenSource(code) | Self::ExtractedModule(code) => Some(code),
        }
    }
}

/// The statically known route fields of a configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Configuration of the first call, after it passed scope validation.
struct ValidatedCall<'m> {
    config: &'m ObjectLit,
    references: HashSet<String>,
}

/// Run scan, parse, locate and validate, then hand the result to `then`.
///
/// `Ok(None)` is the absence path: no marker, unsupported file, no script
/// block or no top-level call.
fn with_validated_call<R>(
    code: &str,
    file_path: &str,
    options: &MacroOptions,
    then: impl FnOnce(&ParsedScript<'_>, ValidatedCall<'_>) -> MacroResult<R>,
) -> MacroResult<Option<R>> {
    let macro_name = options.macro_name();
    if !has_marker(code, macro_name) {
        return Ok(None);
    }
    let Some(kind) = FileKind::from_path(file_path) else {
        debug!(file_path, "unsupported file kind");
        return Ok(None);
    };
    let Some(parsed) = parse(code, file_path, kind)? else {
        debug!(file_path, "no script block");
        return Ok(None);
    };
    let Some(site) = find_call_site(&parsed.module.body, macro_name) else {
        debug!(file_path, macro_name, "no top-level call");
        return Ok(None);
    };

    let config = site.config(macro_name)?;
    let references = collect_references(config);
    validate(
        &references,
        &ScriptBindings::collect(&parsed.module.body),
        macro_name,
    )?;

    let call = ValidatedCall {
        config,
        references,
    };
    then(&parsed, call).map(Some)
}

/// Dispatch on the request variant encoded in the identifier.
pub fn transform(source: SourceUnit<'_>, options: &MacroOptions, sink: &dyn WarningSink) -> Outcome {
    let file_path = source.path(options);
    let variant = source.variant(options);
    debug!(id = source.id, ?variant, "transform");

    let result = match variant {
        RequestVariant::PlainFile => {
            with_validated_call(source.code, file_path, options, |parsed, _| {
                let ranges: Vec<_> = find_call_sites(&parsed.module.body, options.macro_name())
                    .map(|site| parsed.file_range(site.stmt_span))
                    .collect();
                Ok(remove_ranges(source.code, &ranges))
            })
        }
        RequestVariant::ExtractOnly => {
            with_validated_call(source.code, file_path, options, |parsed, call| {
                let imports = prune_imports(collect_imports(parsed), &call.references);
                Ok(render_module(&imports, parsed.snippet(call.config.span)))
            })
        }
    };

    let code = match result {
        Ok(code) => code,
        Err(error) => {
            sink.report(&Stage::Transform.warning(options.macro_name(), &error));
            None
        }
    };

    match (variant, code) {
        (RequestVariant::PlainFile, Some(code)) => Outcome::RewrittenSource(code),
        (RequestVariant::PlainFile, None) => Outcome::NoTransform,
        (RequestVariant::ExtractOnly, code) => {
            Outcome::ExtractedModule(code.unwrap_or_else(|| EMPTY_MODULE.to_string()))
        }
    }
}

fn prop_key(key: &PropName) -> Option<&str> {
    match key {
        PropName::Ident(ident) => Some(&*ident.sym),
        PropName::Str(s) => s.value.as_str(),
        _ => None,
    }
}

fn read_page_config(config: &ObjectLit, file_path: &str, sink: &dyn WarningSink) -> PageConfig {
    let mut page = PageConfig::default();
    for prop in &config.props {
        let PropOrSpread::Prop(prop) = prop else {
            continue;
        };
        let Prop::KeyValue(kv) = &**prop else {
            continue;
        };
        let field = match prop_key(&kv.key) {
            Some("name") => &mut page.name,
            Some("path") => &mut page.path,
            _ => continue,
        };
        match &*kv.value {
            Expr::Lit(Lit::Str(s)) if s.value.as_str().is_some() => {
                *field = s.value.as_str().map(str::to_string);
            }
            _ => sink.report(&format!(
                "route {} must be a string literal. Found in \"{}\".",
                prop_key(&kv.key).unwrap_or_default(),
                file_path
            )),
        }
    }
    page
}

/// Read `name` and `path` from the configuration without generating code.
///
/// `None` both when there is no call and when anything fails; failures are
/// only visible through the warning sink.
pub fn extract_config(
    code: &str,
    path: &str,
    options: &MacroOptions,
    sink: &dyn WarningSink,
) -> Option<PageConfig> {
    let file_path = SourceUnit::new(path, code).path(options);
    let result = with_validated_call(code, file_path, options, |_, call| {
        Ok(read_page_config(call.config, file_path, sink))
    });
    match result {
        Ok(page) => page,
        Err(error) => {
            sink.report(&Stage::Extract.warning(options.macro_name(), &error));
            None
        }
    }
}
