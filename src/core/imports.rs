//! Import liveness: which import bindings the configuration object needs.
//!
//! The synthetic module only carries the bindings it references. A statement
//! left without bindings disappears, side-effect imports included.

use std::collections::HashSet;
use std::fmt;

use swc_ecma_ast::{ImportDecl, ImportSpecifier, ModuleDecl, ModuleItem};

use crate::core::parsers::ParsedScript;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Default,
    Named,
    Namespace,
}

/// One identifier introduced by an import statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding<'a> {
    pub kind: BindingKind,
    pub local: String,
    /// Specifier as written, e.g. `foo as bar` for a renamed named import.
    pub text: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement<'a> {
    /// Module specifier including its quotes.
    pub source: &'a str,
    pub bindings: Vec<ImportBinding<'a>>,
    /// Import attributes object, if any.
    pub attributes: Option<&'a str>,
}

impl<'a> ImportStatement<'a> {
    fn from_decl(decl: &ImportDecl, parsed: &ParsedScript<'a>) -> Self {
        let bindings = decl
            .specifiers
            .iter()
            .filter_map(|specifier| match specifier {
                ImportSpecifier::Named(named) if named.is_type_only => None,
                ImportSpecifier::Named(named) => Some(ImportBinding {
                    kind: BindingKind::Named,
                    local: named.local.sym.to_string(),
                    text: parsed.snippet(named.span),
                }),
                ImportSpecifier::Default(default) => Some(ImportBinding {
                    kind: BindingKind::Default,
                    local: default.local.sym.to_string(),
                    text: parsed.snippet(default.local.span),
                }),
                ImportSpecifier::Namespace(ns) => Some(ImportBinding {
                    kind: BindingKind::Namespace,
                    local: ns.local.sym.to_string(),
                    text: parsed.snippet(ns.span),
                }),
            })
            .collect();

        Self {
            source: parsed.snippet(decl.src.span),
            bindings,
            attributes: decl.with.as_ref().map(|with| parsed.snippet(with.span)),
        }
    }
}

impl fmt::Display for ImportStatement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut clauses = Vec::new();
        if let Some(default) = self.bindings.iter().find(|b| b.kind == BindingKind::Default) {
            clauses.push(default.local.clone());
        }
        if let Some(ns) = self.bindings.iter().find(|b| b.kind == BindingKind::Namespace) {
            clauses.push(format!("* as {}", ns.local));
        }
        let named: Vec<_> = self
            .bindings
            .iter()
            .filter(|b| b.kind == BindingKind::Named)
            .map(|b| b.text)
            .collect();
        if !named.is_empty() {
            clauses.push(format!("{{ {} }}", named.join(", ")));
        }

        write!(f, "import {} from {}", clauses.join(", "), self.source)?;
        if let Some(attributes) = self.attributes {
            write!(f, " with {}", attributes)?;
        }
        Ok(())
    }
}

/// Value import statements of a script in source order.
pub fn collect_imports<'a>(parsed: &ParsedScript<'a>) -> Vec<ImportStatement<'a>> {
    parsed
        .module
        .body
        .iter()
        .filter_map(|item| match item {
            ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) if !decl.type_only => {
                Some(ImportStatement::from_decl(decl, parsed))
            }
            _ => None,
        })
        .collect()
}

/// Keep only the bindings found in `references`, dropping emptied statements.
pub fn prune_imports<'a>(
    imports: Vec<ImportStatement<'a>>,
    references: &HashSet<String>,
) -> Vec<ImportStatement<'a>> {
    imports
        .into_iter()
        .filter_map(|mut statement| {
            statement.bindings.retain(|b| references.contains(&b.local));
            (!statement.bindings.is_empty()).then_some(statement)
        })
        .collect()
}
