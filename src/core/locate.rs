//! Call-site discovery.

use swc_common::Span;
use swc_ecma_ast::{CallExpr, Callee, Expr, ExprOrSpread, ModuleItem, ObjectLit, Stmt};

use crate::core::error::{MacroError, MacroResult};

/// The marker invocation found at the top level of a script.
#[derive(Debug, Clone, Copy)]
pub struct CallSite<'m> {
    /// Span of the whole expression statement, terminator included.
    pub stmt_span: Span,
    pub call: &'m CallExpr,
}

impl<'m> CallSite<'m> {
    /// The object literal passed as the configuration.
    ///
    /// Parentheses and TypeScript assertions around the literal are looked
    /// through; anything else is rejected.
    pub fn config(&self, macro_name: &str) -> MacroResult<&'m ObjectLit> {
        let invalid = || MacroError::InvalidArgument {
            macro_name: macro_name.to_string(),
        };
        let Some(ExprOrSpread { spread: None, expr }) = self.call.args.first() else {
            return Err(invalid());
        };
        unwrap_object(expr).ok_or_else(invalid)
    }
}

fn unwrap_object(expr: &Expr) -> Option<&ObjectLit> {
    match expr {
        Expr::Object(obj) => Some(obj),
        Expr::Paren(paren) => unwrap_object(&paren.expr),
        Expr::TsAs(ts_as) => unwrap_object(&ts_as.expr),
        Expr::TsSatisfies(sat) => unwrap_object(&sat.expr),
        Expr::TsConstAssertion(assertion) => unwrap_object(&assertion.expr),
        _ => None,
    }
}

fn is_call_of(call: &CallExpr, macro_name: &str) -> bool {
    matches!(&call.callee, Callee::Expr(callee) if matches!(&**callee, Expr::Ident(ident) if &*ident.sym == macro_name))
}

/// Every top-level expression statement calling `macro_name`, in source order.
///
/// Calls nested inside functions, conditionals, declarations or other
/// expressions are not considered.
pub fn find_call_sites<'m>(
    items: &'m [ModuleItem],
    macro_name: &str,
) -> impl Iterator<Item = CallSite<'m>> {
    items.iter().filter_map(move |item| {
        let ModuleItem::Stmt(Stmt::Expr(stmt)) = item else {
            return None;
        };
        let Expr::Call(call) = &*stmt.expr else {
            return None;
        };
        is_call_of(call, macro_name).then_some(CallSite {
            stmt_span: stmt.span,
            call,
        })
    })
}

/// First top-level call. Later calls never contribute configuration.
pub fn find_call_site<'m>(items: &'m [ModuleItem], macro_name: &str) -> Option<CallSite<'m>> {
    find_call_sites(items, macro_name).next()
}
