//! Pre-order expression traversal with explicit flow control.
//!
//! The visitor returns a [`VisitFlow`] per node, keeping "stop descending
//! into this subtree" and "abort the whole walk" as distinct signals instead
//! of overloading a boolean with both meanings.

use std::ops::ControlFlow;

use crate::ir::expr::{Callee, ExprKind};
use crate::ir::program::{ExprId, FunctionId, Program};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitFlow {
    /// Keep going, children included.
    Descend,
    /// Skip this node's children but continue the walk elsewhere.
    SkipChildren,
    /// Abort the entire walk.
    Halt,
}

/// Walks `root` and its subexpressions in pre-order.
///
/// Returns `ControlFlow::Break(())` when the visitor halted the walk.
pub fn walk_expr<F>(program: &Program, root: ExprId, visit: &mut F) -> ControlFlow<()>
where
    F: FnMut(ExprId) -> VisitFlow,
{
    match visit(root) {
        VisitFlow::Halt => return ControlFlow::Break(()),
        VisitFlow::SkipChildren => return ControlFlow::Continue(()),
        VisitFlow::Descend => {}
    }
    for child in child_exprs(program, root) {
        walk_expr(program, child, visit)?;
    }
    ControlFlow::Continue(())
}

/// Walks every full expression of a function body in statement order.
pub fn walk_function<F>(program: &Program, function: FunctionId, visit: &mut F) -> ControlFlow<()>
where
    F: FnMut(ExprId) -> VisitFlow,
{
    if let Some(body) = program.function(function).body() {
        for &stmt in body {
            walk_expr(program, stmt, visit)?;
        }
    }
    ControlFlow::Continue(())
}

/// Direct children of an expression node, in evaluation-source order.
pub fn child_exprs(program: &Program, id: ExprId) -> Vec<ExprId> {
    match &program.expr(id).kind {
        ExprKind::VarRef { .. } => Vec::new(),
        ExprKind::FieldAccess { base, .. } => vec![*base],
        ExprKind::Cast { operand, .. } => vec![*operand],
        ExprKind::Call { callee, args } => {
            let mut children = Vec::with_capacity(args.len() + 1);
            if let Callee::Indirect(callee_expr) = callee {
                children.push(*callee_expr);
            }
            children.extend_from_slice(args);
            children
        }
        ExprKind::Binary { lhs, rhs, .. } => vec![*lhs, *rhs],
        ExprKind::Other { children } => children.clone(),
    }
}
