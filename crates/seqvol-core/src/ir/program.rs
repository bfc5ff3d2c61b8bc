//! Whole-program container: arenas for aggregates, functions and expressions.
//!
//! Arena IDs are the canonical identities of the data model: one
//! [`AggregateId`] per distinct declared aggregate and one [`FunctionId`] per
//! function, no matter how many declarations the source carried. The
//! declare/define split lets a front-end build self-referential aggregates
//! and forward calls: declare first, wire the ID into field or call sites,
//! define later. An aggregate that is declared but never defined models a
//! forward declaration without a visible definition.

use id_arena::{Arena, Id};

use crate::ir::expr::{BinOp, Callee, Expr, ExprKind, Span};
use crate::ir::types::QualType;

pub type AggregateId = Id<AggregateDef>;
pub type FunctionId = Id<Function>;
pub type ExprId = Id<Expr>;

#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub ty: QualType,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: QualType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Debug)]
pub struct AggregateDef {
    pub name: String,
    fields: Option<Vec<Field>>,
}

impl AggregateDef {
    /// Ordered field list, or `None` for a forward declaration.
    pub fn fields(&self) -> Option<&[Field]> {
        self.fields.as_deref()
    }

    pub fn has_definition(&self) -> bool {
        self.fields.is_some()
    }
}

#[derive(Debug)]
pub struct Function {
    pub name: String,
    body: Option<Vec<ExprId>>,
}

impl Function {
    /// Full expressions of the body in statement order, or `None` for a
    /// prototype without a definition.
    pub fn body(&self) -> Option<&[ExprId]> {
        self.body.as_deref()
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

#[derive(Debug, Default)]
pub struct Program {
    aggregates: Arena<AggregateDef>,
    functions: Arena<Function>,
    exprs: Arena<Expr>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare_aggregate(&mut self, name: impl Into<String>) -> AggregateId {
        self.aggregates.alloc(AggregateDef {
            name: name.into(),
            fields: None,
        })
    }

    pub fn define_aggregate(&mut self, id: AggregateId, fields: Vec<Field>) {
        self.aggregates[id].fields = Some(fields);
    }

    pub fn add_aggregate(&mut self, name: impl Into<String>, fields: Vec<Field>) -> AggregateId {
        let id = self.declare_aggregate(name);
        self.define_aggregate(id, fields);
        id
    }

    pub fn declare_function(&mut self, name: impl Into<String>) -> FunctionId {
        self.functions.alloc(Function {
            name: name.into(),
            body: None,
        })
    }

    pub fn define_function(&mut self, id: FunctionId, body: Vec<ExprId>) {
        self.functions[id].body = Some(body);
    }

    pub fn add_function(&mut self, name: impl Into<String>, body: Vec<ExprId>) -> FunctionId {
        let id = self.declare_function(name);
        self.define_function(id, body);
        id
    }

    pub fn aggregate(&self, id: AggregateId) -> &AggregateDef {
        &self.aggregates[id]
    }

    pub fn function(&self, id: FunctionId) -> &Function {
        &self.functions[id]
    }

    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id]
    }

    /// Aggregates in declaration order.
    pub fn aggregates(&self) -> impl Iterator<Item = (AggregateId, &AggregateDef)> {
        self.aggregates.iter()
    }

    /// Functions in declaration order.
    pub fn functions(&self) -> impl Iterator<Item = (FunctionId, &Function)> {
        self.functions.iter()
    }

    pub fn alloc_expr(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.exprs.alloc(Expr { kind, span })
    }

    pub fn var_ref(&mut self, name: impl Into<String>, ty: QualType, span: Span) -> ExprId {
        self.alloc_expr(
            ExprKind::VarRef {
                name: name.into(),
                ty,
            },
            span,
        )
    }

    pub fn field_access(
        &mut self,
        base: ExprId,
        field: impl Into<String>,
        field_ty: QualType,
        span: Span,
    ) -> ExprId {
        self.alloc_expr(
            ExprKind::FieldAccess {
                base,
                field: field.into(),
                field_ty,
            },
            span,
        )
    }

    pub fn cast(&mut self, target: QualType, operand: ExprId, span: Span) -> ExprId {
        self.alloc_expr(ExprKind::Cast { target, operand }, span)
    }

    pub fn call(&mut self, callee: FunctionId, args: Vec<ExprId>, span: Span) -> ExprId {
        self.alloc_expr(
            ExprKind::Call {
                callee: Callee::Resolved(callee),
                args,
            },
            span,
        )
    }

    pub fn call_indirect(&mut self, callee: ExprId, args: Vec<ExprId>, span: Span) -> ExprId {
        self.alloc_expr(
            ExprKind::Call {
                callee: Callee::Indirect(callee),
                args,
            },
            span,
        )
    }

    pub fn binary(&mut self, op: BinOp, lhs: ExprId, rhs: ExprId, span: Span) -> ExprId {
        self.alloc_expr(ExprKind::Binary { op, lhs, rhs }, span)
    }

    pub fn other(&mut self, children: Vec<ExprId>, span: Span) -> ExprId {
        self.alloc_expr(ExprKind::Other { children }, span)
    }
}
