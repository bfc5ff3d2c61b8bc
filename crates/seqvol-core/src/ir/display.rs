//! Structural rendering of expressions and types for diagnostics.
//!
//! This is a best-effort reconstruction from the tree; exact source text is
//! the front-end's concern (it has the source map), but the analysis needs a
//! readable form for the offending expression and each counted access.

use crate::ir::expr::{BinOp, Callee, ExprKind};
use crate::ir::program::{ExprId, Program};
use crate::ir::types::{QualType, TypeKind};

pub fn expr_text(program: &Program, id: ExprId) -> String {
    match &program.expr(id).kind {
        ExprKind::VarRef { name, .. } => name.clone(),
        ExprKind::FieldAccess { base, field, .. } => {
            format!("{}.{}", expr_text(program, *base), field)
        }
        ExprKind::Cast { target, operand } => {
            format!(
                "({}){}",
                type_text(program, target),
                expr_text(program, *operand)
            )
        }
        ExprKind::Call { callee, args } => {
            let callee_text = match callee {
                Callee::Resolved(f) => program.function(*f).name.clone(),
                Callee::Indirect(e) => format!("(*{})", expr_text(program, *e)),
            };
            let args: Vec<_> = args.iter().map(|&a| expr_text(program, a)).collect();
            format!("{}({})", callee_text, args.join(", "))
        }
        ExprKind::Binary { op, lhs, rhs } => {
            let l = expr_text(program, *lhs);
            let r = expr_text(program, *rhs);
            match op {
                BinOp::Comma => format!("{l}, {r}"),
                _ => format!("{} {} {}", l, op.token(), r),
            }
        }
        ExprKind::Other { children } => {
            if children.is_empty() {
                "<expr>".to_string()
            } else {
                let parts: Vec<_> = children.iter().map(|&c| expr_text(program, c)).collect();
                parts.join(" ")
            }
        }
    }
}

pub fn type_text(program: &Program, ty: &QualType) -> String {
    let base = match &ty.kind {
        TypeKind::Scalar(name) => name.clone(),
        TypeKind::Pointer(pointee) => format!("{} *", type_text(program, pointee)),
        TypeKind::Array(element) => format!("{}[]", type_text(program, element)),
        TypeKind::Aggregate(id) => format!("struct {}", program.aggregate(*id).name),
        TypeKind::Other => "<type>".to_string(),
    };
    if ty.volatile {
        match ty.kind {
            // `T *volatile`: the qualifier applies to the pointer itself.
            TypeKind::Pointer(_) => format!("{base}volatile"),
            _ => format!("volatile {base}"),
        }
    } else {
        base
    }
}
