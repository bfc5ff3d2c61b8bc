//! Sequencing-aware counting of volatile accesses.
//!
//! One invocation analyzes one expression as a scope: the region whose
//! subexpressions are mutually unsequenced. Two accesses within one scope
//! are a violation. Sequencing operators (`,`, `&&`, `||`) and call
//! arguments open nested scopes, each analyzed exactly once; a nested scope
//! that violates on its own propagates immediately with its root as the
//! offending expression.
//!
//! Counting rules:
//! - a volatile variable read counts once, unless it is the base spine of a
//!   field access (the field access decides instead);
//! - a field access counts once when the field's type is volatile;
//! - an explicit cast counts once when the written target type is volatile;
//! - a call counts once, as a single aggregate access, when the callee is
//!   unresolved or in the volatile-touching set; the callee's own body has
//!   internal sequence points, so only the call as a whole competes with the
//!   caller's other accesses. Argument accesses then merge into the caller's
//!   scope in argument order, since sibling arguments are unsequenced;
//! - the operands of a sequencing operator never merge into the enclosing
//!   scope (the operator is a sequencing boundary);
//! - everything else contributes nothing but is traversed.
//!
//! A scope halts as soon as its record reaches two entries, so the record of
//! a reported violation always has exactly two accesses, in discovery order.

use crate::analysis::callgraph::FunctionVolatility;
use crate::analysis::volatility::VolatilityFacts;
use crate::ir::expr::{Callee, ExprKind};
use crate::ir::program::{ExprId, Program};

/// A scope with two unsequenced volatile accesses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Root of the smallest scope in which the two accesses are unsequenced.
    pub offending: ExprId,
    /// The counted accesses, in discovery order. Length equals the access
    /// count by construction.
    pub accesses: Vec<ExprId>,
}

/// Result of analyzing one expression scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeOutcome {
    /// No violation; carries the ordered accesses of this scope (fewer than
    /// two, or the scope would have been a violation).
    Clean(Vec<ExprId>),
    Violation(Violation),
}

impl ScopeOutcome {
    pub fn is_clean(&self) -> bool {
        matches!(self, ScopeOutcome::Clean(_))
    }

    pub fn access_count(&self) -> usize {
        match self {
            ScopeOutcome::Clean(accesses) => accesses.len(),
            ScopeOutcome::Violation(v) => v.accesses.len(),
        }
    }
}

pub struct SequenceAnalyzer<'a> {
    program: &'a Program,
    facts: &'a VolatilityFacts,
    functions: &'a FunctionVolatility,
}

impl<'a> SequenceAnalyzer<'a> {
    pub fn new(
        program: &'a Program,
        facts: &'a VolatilityFacts,
        functions: &'a FunctionVolatility,
    ) -> Self {
        Self {
            program,
            facts,
            functions,
        }
    }

    pub fn analyze(&self, root: ExprId) -> ScopeOutcome {
        match self.scope(root) {
            Ok(accesses) => ScopeOutcome::Clean(accesses),
            Err(violation) => ScopeOutcome::Violation(violation),
        }
    }

    fn scope(&self, root: ExprId) -> Result<Vec<ExprId>, Violation> {
        let mut accesses = Vec::new();
        self.visit(root, root, &mut accesses, false)?;
        Ok(accesses)
    }

    fn note(
        &self,
        access: ExprId,
        scope_root: ExprId,
        accesses: &mut Vec<ExprId>,
    ) -> Result<(), Violation> {
        accesses.push(access);
        if accesses.len() > 1 {
            return Err(Violation {
                offending: scope_root,
                accesses: std::mem::take(accesses),
            });
        }
        Ok(())
    }

    fn visit(
        &self,
        id: ExprId,
        scope_root: ExprId,
        accesses: &mut Vec<ExprId>,
        on_member_spine: bool,
    ) -> Result<(), Violation> {
        match &self.program.expr(id).kind {
            ExprKind::VarRef { ty, .. } => {
                if !on_member_spine && self.facts.type_is_volatile(ty) {
                    self.note(id, scope_root, accesses)?;
                }
                Ok(())
            }
            ExprKind::FieldAccess { base, field_ty, .. } => {
                if !on_member_spine && self.facts.type_is_volatile(field_ty) {
                    self.note(id, scope_root, accesses)?;
                }
                self.visit(*base, scope_root, accesses, true)
            }
            ExprKind::Cast { target, operand } => {
                if self.facts.type_is_volatile(target) {
                    self.note(id, scope_root, accesses)?;
                }
                self.visit(*operand, scope_root, accesses, false)
            }
            ExprKind::Call { callee, args } => {
                // Each argument is its own scope, analyzed exactly once; an
                // argument-internal violation is real on its own because
                // sibling evaluation within one argument is unsequenced.
                let mut per_arg = Vec::with_capacity(args.len());
                for &arg in args {
                    per_arg.push(self.scope(arg)?);
                }
                let aggregated = match callee {
                    Callee::Indirect(_) => true,
                    Callee::Resolved(f) => self.functions.touches_volatile(*f),
                };
                if aggregated {
                    self.note(id, scope_root, accesses)?;
                }
                if let Callee::Indirect(callee_expr) = callee {
                    self.visit(*callee_expr, scope_root, accesses, false)?;
                }
                // Sibling arguments are unsequenced against each other and
                // against the caller's other accesses: merge their records.
                for found in per_arg {
                    for access in found {
                        self.note(access, scope_root, accesses)?;
                    }
                }
                Ok(())
            }
            ExprKind::Binary { op, lhs, rhs } if op.is_sequencing() => {
                self.scope(*lhs)?;
                self.scope(*rhs)?;
                Ok(())
            }
            ExprKind::Binary { lhs, rhs, .. } => {
                self.visit(*lhs, scope_root, accesses, false)?;
                self.visit(*rhs, scope_root, accesses, false)
            }
            ExprKind::Other { children } => {
                for &child in children {
                    self.visit(child, scope_root, accesses, false)?;
                }
                Ok(())
            }
        }
    }
}
