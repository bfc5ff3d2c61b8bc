//! Direct (intra-procedural) function summaries.
//!
//! For each function body this is a pure existence check: does any
//! subexpression perform a volatile access? Sequencing is irrelevant here;
//! the first hit marks the function and the rest of its body is skipped.
//!
//! A field access suppresses classification of its base spine. Without this,
//! `g.f` on a volatile-qualified `g` with a non-volatile field `f` would be
//! misclassified through the base variable, and vice versa.

use std::collections::HashSet;

use crate::analysis::volatility::VolatilityFacts;
use crate::ir::expr::{Callee, ExprKind};
use crate::ir::program::{ExprId, FunctionId, Program};

/// Functions whose bodies directly touch a volatile location.
pub fn direct_volatile_functions(
    program: &Program,
    facts: &VolatilityFacts,
) -> HashSet<FunctionId> {
    let mut out = HashSet::new();
    for (id, function) in program.functions() {
        let Some(body) = function.body() else {
            continue;
        };
        if body
            .iter()
            .any(|&stmt| touches_volatile(program, facts, stmt, false))
        {
            out.insert(id);
        }
    }
    out
}

fn touches_volatile(
    program: &Program,
    facts: &VolatilityFacts,
    id: ExprId,
    on_member_spine: bool,
) -> bool {
    match &program.expr(id).kind {
        ExprKind::VarRef { ty, .. } => !on_member_spine && facts.type_is_volatile(ty),
        ExprKind::FieldAccess { base, field_ty, .. } => {
            if !on_member_spine && facts.type_is_volatile(field_ty) {
                return true;
            }
            touches_volatile(program, facts, *base, true)
        }
        ExprKind::Cast { target, operand } => {
            facts.type_is_volatile(target) || touches_volatile(program, facts, *operand, false)
        }
        ExprKind::Call { callee, args } => {
            let callee_touches = match callee {
                Callee::Indirect(e) => touches_volatile(program, facts, *e, false),
                Callee::Resolved(_) => false,
            };
            callee_touches
                || args
                    .iter()
                    .any(|&a| touches_volatile(program, facts, a, false))
        }
        ExprKind::Binary { lhs, rhs, .. } => {
            touches_volatile(program, facts, *lhs, false)
                || touches_volatile(program, facts, *rhs, false)
        }
        ExprKind::Other { children } => children
            .iter()
            .any(|&c| touches_volatile(program, facts, c, false)),
    }
}
