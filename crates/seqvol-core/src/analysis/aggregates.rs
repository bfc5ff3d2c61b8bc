//! Aggregate volatility resolution.
//!
//! One pass over every distinct aggregate definition, existence-only and
//! short-circuiting: the first volatile field decides. The visited set both
//! memoizes (each definition is processed at most once) and breaks cycles
//! from self- or mutually-referential aggregates. Pointer fields never
//! recurse into their pointee's aggregate-ness; only directly nested
//! aggregate members propagate. A nested aggregate without a visible
//! definition is treated as non-volatile.

use std::collections::HashSet;

use crate::analysis::volatility::VolatilityFacts;
use crate::ir::program::{AggregateId, Program};
use crate::ir::types::TypeKind;

/// Resolves every aggregate in the program and freezes the result.
pub fn resolve_aggregates(program: &Program) -> VolatilityFacts {
    let mut resolver = Resolver {
        program,
        visited: HashSet::new(),
        volatile: HashSet::new(),
    };
    for (id, _) in program.aggregates() {
        resolver.resolve(id);
    }
    VolatilityFacts {
        volatile_aggregates: resolver.volatile,
    }
}

struct Resolver<'p> {
    program: &'p Program,
    visited: HashSet<AggregateId>,
    volatile: HashSet<AggregateId>,
}

impl Resolver<'_> {
    fn resolve(&mut self, id: AggregateId) {
        if !self.visited.insert(id) {
            return;
        }
        let Some(fields) = self.program.aggregate(id).fields() else {
            // Forward declaration only: conservatively non-volatile.
            return;
        };
        for field in fields {
            if field.ty.volatile {
                self.volatile.insert(id);
                return;
            }
            if let TypeKind::Aggregate(nested) = field.ty.kind {
                if !self.visited.contains(&nested) {
                    self.resolve(nested);
                }
                if self.volatile.contains(&nested) {
                    self.volatile.insert(id);
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::program::Field;
    use crate::ir::types::QualType;

    #[test]
    fn direct_volatile_field_marks_the_aggregate() {
        let mut program = Program::new();
        let s = program.add_aggregate(
            "S",
            vec![
                Field::new("a", QualType::scalar("int")),
                Field::new("b", QualType::scalar("int").volatile_qualified()),
            ],
        );

        let facts = resolve_aggregates(&program);
        assert!(facts.aggregate_is_volatile(s));
        assert_eq!(facts.volatile_aggregate_count(), 1);
    }

    #[test]
    fn nested_aggregate_propagates_volatility() {
        let mut program = Program::new();
        let s = program.add_aggregate(
            "S",
            vec![Field::new("b", QualType::scalar("int").volatile_qualified())],
        );
        let t = program.add_aggregate(
            "T",
            vec![
                Field::new("s", QualType::aggregate(s)),
                Field::new("c", QualType::scalar("int")),
            ],
        );

        let facts = resolve_aggregates(&program);
        assert!(facts.aggregate_is_volatile(s));
        assert!(facts.aggregate_is_volatile(t));
    }

    #[test]
    fn nested_definition_is_resolved_before_the_owner_decides() {
        // The owner is declared first, so the plain declaration-order scan
        // reaches it before its member; resolution must recurse.
        let mut program = Program::new();
        let inner = program.declare_aggregate("Inner");
        let outer = program.add_aggregate("Outer", vec![Field::new("i", QualType::aggregate(inner))]);
        program.define_aggregate(
            inner,
            vec![Field::new("v", QualType::scalar("int").volatile_qualified())],
        );

        let facts = resolve_aggregates(&program);
        assert!(facts.aggregate_is_volatile(inner));
        assert!(facts.aggregate_is_volatile(outer));
    }

    #[test]
    fn pointer_fields_do_not_propagate() {
        let mut program = Program::new();
        let s = program.add_aggregate(
            "S",
            vec![Field::new("b", QualType::scalar("int").volatile_qualified())],
        );
        let u = program.add_aggregate(
            "U",
            vec![Field::new(
                "p",
                QualType::pointer_to(QualType::aggregate(s)),
            )],
        );

        let facts = resolve_aggregates(&program);
        assert!(facts.aggregate_is_volatile(s));
        assert!(!facts.aggregate_is_volatile(u));
    }

    #[test]
    fn self_referential_aggregate_terminates() {
        let mut program = Program::new();
        let node = program.declare_aggregate("Node");
        program.define_aggregate(
            node,
            vec![
                Field::new("next", QualType::pointer_to(QualType::aggregate(node))),
                Field::new("flag", QualType::scalar("int").volatile_qualified()),
            ],
        );

        let facts = resolve_aggregates(&program);
        assert!(facts.aggregate_is_volatile(node));
    }

    #[test]
    fn mutually_referential_aggregates_terminate() {
        let mut program = Program::new();
        let a = program.declare_aggregate("A");
        let b = program.declare_aggregate("B");
        program.define_aggregate(
            a,
            vec![Field::new("b", QualType::pointer_to(QualType::aggregate(b)))],
        );
        program.define_aggregate(
            b,
            vec![Field::new("a", QualType::pointer_to(QualType::aggregate(a)))],
        );

        let facts = resolve_aggregates(&program);
        assert!(!facts.aggregate_is_volatile(a));
        assert!(!facts.aggregate_is_volatile(b));
    }

    #[test]
    fn forward_declared_member_is_treated_as_non_volatile() {
        let mut program = Program::new();
        let opaque = program.declare_aggregate("Opaque");
        let holder = program.add_aggregate("Holder", vec![Field::new("o", QualType::aggregate(opaque))]);

        let facts = resolve_aggregates(&program);
        assert!(!facts.aggregate_is_volatile(opaque));
        assert!(!facts.aggregate_is_volatile(holder));
    }

    #[test]
    fn aggregate_without_volatile_fields_is_clean() {
        let mut program = Program::new();
        let s = program.add_aggregate(
            "S",
            vec![
                Field::new("a", QualType::scalar("int")),
                Field::new("b", QualType::scalar("double")),
            ],
        );

        let facts = resolve_aggregates(&program);
        assert!(!facts.aggregate_is_volatile(s));
        assert_eq!(facts.volatile_aggregate_count(), 0);
    }
}
