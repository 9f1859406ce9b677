//! Scope validation for the configuration object.
//!
//! The object is lifted out of the script into its own module, so it may only
//! refer to globals and to import bindings (which are re-imported). Anything
//! declared locally in the script no longer exists once lifted.

use std::collections::HashSet;

use swc_ecma_ast::{
    ArrowExpr, BindingIdent, BlockStmt, BlockStmtOrExpr, BreakStmt, CatchClause, Class, ClassDecl, ClassExpr,
    Constructor, ContinueStmt, Decl, DefaultDecl, FnDecl, FnExpr, ForHead, ForInStmt,
    ForOfStmt, ForStmt, Function, Ident, ImportSpecifier, JSXElementName, LabeledStmt,
    ModuleDecl, ModuleItem, ObjectLit, ObjectPatProp, ParamOrTsParamProp, Pat, SetterProp,
    SimpleAssignTarget, Stmt, TsEnumDecl, TsInterfaceDecl, TsParamPropParam, TsType,
    TsTypeAliasDecl, TsTypeAnn, TsTypeParamDecl, TsTypeParamInstantiation, VarDecl,
    VarDeclKind, VarDeclOrExpr,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::core::error::{MacroError, MacroResult};

/// Extract all identifier names from a pattern (handles destructuring).
/// Supports: simple ident, object destructuring, array destructuring,
/// default values, rest patterns, and renamed destructuring.
pub fn extract_binding_names(pat: &Pat) -> Vec<String> {
    match pat {
        Pat::Ident(ident) => vec![ident.id.sym.to_string()],
        Pat::Object(obj) => obj
            .props
            .iter()
            .flat_map(|prop| match prop {
                ObjectPatProp::KeyValue(kv) => extract_binding_names(&kv.value),
                ObjectPatProp::Assign(assign) => vec![assign.key.sym.to_string()],
                ObjectPatProp::Rest(rest) => extract_binding_names(&rest.arg),
            })
            .collect(),
        Pat::Array(arr) => arr
            .elems
            .iter()
            .flatten()
            .flat_map(extract_binding_names)
            .collect(),
        Pat::Assign(assign) => extract_binding_names(&assign.left),
        Pat::Rest(rest) => extract_binding_names(&rest.arg),
        _ => vec![],
    }
}

fn var_decl_names(var: &VarDecl) -> impl Iterator<Item = String> + '_ {
    var.decls.iter().flat_map(|d| extract_binding_names(&d.name))
}

/// Names a declaration introduces in its enclosing scope.
fn decl_names(decl: &Decl) -> Vec<String> {
    match decl {
        Decl::Var(var) => var_decl_names(var).collect(),
        Decl::Fn(f) => vec![f.ident.sym.to_string()],
        Decl::Class(c) => vec![c.ident.sym.to_string()],
        Decl::TsEnum(e) => vec![e.id.sym.to_string()],
        _ => vec![],
    }
}

fn block_names(stmts: &[Stmt]) -> HashSet<String> {
    stmts
        .iter()
        .filter_map(|stmt| match stmt {
            Stmt::Decl(decl) => Some(decl_names(decl)),
            _ => None,
        })
        .flatten()
        .collect()
}

/// `var` declarations of one function body, wherever they are nested.
/// Nested functions and classes have their own.
#[derive(Debug, Default)]
struct HoistedVars {
    names: HashSet<String>,
}

impl Visit for HoistedVars {
    fn visit_var_decl(&mut self, node: &VarDecl) {
        if node.kind == VarDeclKind::Var {
            self.names.extend(var_decl_names(node));
        }
        node.visit_children_with(self);
    }

    fn visit_function(&mut self, _node: &Function) {}

    fn visit_arrow_expr(&mut self, _node: &ArrowExpr) {}

    fn visit_class(&mut self, _node: &Class) {}
}

fn hoisted_vars(body: Option<&BlockStmt>) -> HashSet<String> {
    let mut hoisted = HoistedVars::default();
    if let Some(body) = body {
        body.visit_with(&mut hoisted);
    }
    hoisted.names
}

fn constructor_param_names(param: &ParamOrTsParamProp) -> Vec<String> {
    match param {
        ParamOrTsParamProp::Param(param) => extract_binding_names(&param.pat),
        ParamOrTsParamProp::TsParamProp(prop) => match &prop.param {
            TsParamPropParam::Ident(ident) => vec![ident.id.sym.to_string()],
            TsParamPropParam::Assign(assign) => extract_binding_names(&assign.left),
        },
    }
}

/// Top-level bindings of a script, split by origin.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScriptBindings {
    /// Declared by `const`/`let`/`var`/function/class/enum in the script.
    pub locals: HashSet<String>,
    /// Introduced by import statements.
    pub imports: HashSet<String>,
}

impl ScriptBindings {
    pub fn collect(items: &[ModuleItem]) -> Self {
        let mut bindings = Self::default();
        for item in items {
            match item {
                ModuleItem::Stmt(Stmt::Decl(decl)) => bindings.locals.extend(decl_names(decl)),
                ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => {
                    bindings.locals.extend(decl_names(&export.decl))
                }
                ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(export)) => {
                    let ident = match &export.decl {
                        DefaultDecl::Fn(f) => f.ident.as_ref(),
                        DefaultDecl::Class(c) => c.ident.as_ref(),
                        DefaultDecl::TsInterfaceDecl(_) => None,
                    };
                    bindings.locals.extend(ident.map(|i| i.sym.to_string()));
                }
                ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => {
                    bindings
                        .imports
                        .extend(import.specifiers.iter().map(|s| match s {
                            ImportSpecifier::Named(named) => named.local.sym.to_string(),
                            ImportSpecifier::Default(default) => default.local.sym.to_string(),
                            ImportSpecifier::Namespace(ns) => ns.local.sym.to_string(),
                        }));
                }
                _ => {}
            }
        }
        bindings
    }
}

/// Collects the free identifier references of a subtree.
///
/// Identifiers bound inside the subtree (function params, nested
/// declarations, catch params, loop heads) shadow outer bindings and are not
/// reported. Type positions are skipped entirely.
#[derive(Debug, Default)]
pub struct ReferenceCollector {
    scopes: Vec<HashSet<String>>,
    pub references: HashSet<String>,
}

impl ReferenceCollector {
    fn with_scope(&mut self, names: HashSet<String>, f: impl FnOnce(&mut Self)) {
        self.scopes.push(names);
        f(self);
        self.scopes.pop();
    }

    fn reference(&mut self, ident: &Ident) {
        let name = &*ident.sym;
        if !self.scopes.iter().any(|scope| scope.contains(name)) {
            self.references.insert(name.to_string());
        }
    }
}

impl Visit for ReferenceCollector {
    fn visit_ident(&mut self, node: &Ident) {
        self.reference(node);
    }

    // Declarations, not references.
    fn visit_binding_ident(&mut self, _node: &BindingIdent) {}

    fn visit_simple_assign_target(&mut self, node: &SimpleAssignTarget) {
        match node {
            SimpleAssignTarget::Ident(binding) => self.reference(&binding.id),
            _ => node.visit_children_with(self),
        }
    }

    fn visit_function(&mut self, node: &Function) {
        let mut names = hoisted_vars(node.body.as_ref());
        names.extend(node.params.iter().flat_map(|p| extract_binding_names(&p.pat)));
        self.with_scope(names, |this| node.visit_children_with(this));
    }

    fn visit_constructor(&mut self, node: &Constructor) {
        let mut names = hoisted_vars(node.body.as_ref());
        names.extend(node.params.iter().flat_map(constructor_param_names));
        self.with_scope(names, |this| node.visit_children_with(this));
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        let body = match &*node.body {
            BlockStmtOrExpr::BlockStmt(block) => Some(block),
            BlockStmtOrExpr::Expr(_) => None,
        };
        let mut names = hoisted_vars(body);
        names.extend(node.params.iter().flat_map(extract_binding_names));
        self.with_scope(names, |this| node.visit_children_with(this));
    }

    fn visit_setter_prop(&mut self, node: &SetterProp) {
        let params = extract_binding_names(&node.param).into_iter().collect();
        self.with_scope(params, |this| node.visit_children_with(this));
    }

    fn visit_block_stmt(&mut self, node: &BlockStmt) {
        let names = block_names(&node.stmts);
        self.with_scope(names, |this| node.visit_children_with(this));
    }

    fn visit_catch_clause(&mut self, node: &CatchClause) {
        let names = node
            .param
            .iter()
            .flat_map(extract_binding_names)
            .collect();
        self.with_scope(names, |this| node.visit_children_with(this));
    }

    fn visit_for_stmt(&mut self, node: &ForStmt) {
        let names = match &node.init {
            Some(VarDeclOrExpr::VarDecl(var)) => var_decl_names(var).collect(),
            _ => HashSet::new(),
        };
        self.with_scope(names, |this| node.visit_children_with(this));
    }

    fn visit_for_in_stmt(&mut self, node: &ForInStmt) {
        let names = for_head_names(&node.left);
        self.with_scope(names, |this| node.visit_children_with(this));
    }

    fn visit_for_of_stmt(&mut self, node: &ForOfStmt) {
        let names = for_head_names(&node.left);
        self.with_scope(names, |this| node.visit_children_with(this));
    }

    fn visit_fn_expr(&mut self, node: &FnExpr) {
        let names = node.ident.iter().map(|i| i.sym.to_string()).collect();
        self.with_scope(names, |this| node.function.visit_with(this));
    }

    fn visit_fn_decl(&mut self, node: &FnDecl) {
        node.function.visit_with(self);
    }

    fn visit_class_expr(&mut self, node: &ClassExpr) {
        let names = node.ident.iter().map(|i| i.sym.to_string()).collect();
        self.with_scope(names, |this| node.class.visit_with(this));
    }

    fn visit_class_decl(&mut self, node: &ClassDecl) {
        node.class.visit_with(self);
    }

    fn visit_labeled_stmt(&mut self, node: &LabeledStmt) {
        node.body.visit_with(self);
    }

    fn visit_break_stmt(&mut self, _node: &BreakStmt) {}

    fn visit_continue_stmt(&mut self, _node: &ContinueStmt) {}

    // Lowercase tags are intrinsic elements, not bindings.
    fn visit_jsx_element_name(&mut self, node: &JSXElementName) {
        match node {
            JSXElementName::Ident(ident) if ident.sym.starts_with(|c: char| c.is_lowercase()) => {}
            _ => node.visit_children_with(self),
        }
    }

    fn visit_ts_type(&mut self, _node: &TsType) {}

    fn visit_ts_type_ann(&mut self, _node: &TsTypeAnn) {}

    fn visit_ts_type_param_decl(&mut self, _node: &TsTypeParamDecl) {}

    fn visit_ts_type_param_instantiation(&mut self, _node: &TsTypeParamInstantiation) {}

    fn visit_ts_interface_decl(&mut self, _node: &TsInterfaceDecl) {}

    fn visit_ts_type_alias_decl(&mut self, _node: &TsTypeAliasDecl) {}

    fn visit_ts_enum_decl(&mut self, _node: &TsEnumDecl) {}
}

fn for_head_names(head: &ForHead) -> HashSet<String> {
    match head {
        ForHead::VarDecl(var) => var_decl_names(var).collect(),
        _ => HashSet::new(),
    }
}

/// Free identifiers referenced anywhere inside the configuration object.
pub fn collect_references(config: &ObjectLit) -> HashSet<String> {
    let mut collector = ReferenceCollector::default();
    config.visit_with(&mut collector);
    collector.references
}

/// Reject a configuration referencing a binding local to the script.
pub fn validate(
    references: &HashSet<String>,
    bindings: &ScriptBindings,
    macro_name: &str,
) -> MacroResult<()> {
    let violation = references
        .iter()
        .any(|name| bindings.locals.contains(name) && !bindings.imports.contains(name));
    if violation {
        return Err(MacroError::ScopeViolation {
            macro_name: macro_name.to_string(),
        });
    }
    Ok(())
}
