//! Expression nodes.
//!
//! The expression kinds form a closed sum type: the set is fixed by the
//! analyzed language, so every consumer dispatches with an exhaustive match.
//! Kinds the sequencing analysis does not distinguish are folded into
//! [`ExprKind::Other`], which still exposes its children for traversal.

use serde::Serialize;

use crate::ir::program::{ExprId, FunctionId};
use crate::ir::types::QualType;

/// Source position of an expression, as reported by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub line: u32,
    pub column: u32,
}

impl Span {
    /// Placeholder for synthesized nodes with no source position.
    pub const NONE: Span = Span { line: 0, column: 0 };

    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    LogicalAnd,
    LogicalOr,
    Comma,
}

impl BinOp {
    /// Operators that fully sequence their left operand before the right one.
    pub fn is_sequencing(self) -> bool {
        matches!(self, BinOp::Comma | BinOp::LogicalAnd | BinOp::LogicalOr)
    }

    pub fn token(self) -> &'static str {
        match self {
            BinOp::Assign => "=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
            BinOp::BitAnd => "&",
            BinOp::BitOr => "|",
            BinOp::BitXor => "^",
            BinOp::Shl => "<<",
            BinOp::Shr => ">>",
            BinOp::LogicalAnd => "&&",
            BinOp::LogicalOr => "||",
            BinOp::Comma => ",",
        }
    }
}

/// Call target as resolved by the front-end.
///
/// Indirect calls (through a function pointer or any other computed callee)
/// carry the callee expression; they contribute no call-graph edge and are
/// treated conservatively by the sequencing analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Callee {
    Resolved(FunctionId),
    Indirect(ExprId),
}

#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    /// A read of a named variable with its declared type.
    VarRef { name: String, ty: QualType },
    /// `base.field` (or `base->field`, the distinction does not matter here).
    FieldAccess {
        base: ExprId,
        field: String,
        field_ty: QualType,
    },
    /// An explicit cast with the type as written in the source.
    Cast { target: QualType, operand: ExprId },
    Call { callee: Callee, args: Vec<ExprId> },
    Binary {
        op: BinOp,
        lhs: ExprId,
        rhs: ExprId,
    },
    /// Any other expression kind; children are still traversed.
    Other { children: Vec<ExprId> },
}
