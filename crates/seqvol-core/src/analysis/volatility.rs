//! Type volatility classification.
//!
//! [`VolatilityFacts`] is the frozen output of the aggregate resolver; the
//! classifier itself is a pure function over it. Note the pointer rule: the
//! classifier recurses into the pointee, so a variable of type
//! `volatile int *` classifies as volatile wherever its declared type is
//! consulted.

use std::collections::HashSet;

use crate::ir::program::AggregateId;
use crate::ir::types::{QualType, TypeKind};

/// Per-aggregate volatility, computed once per distinct definition.
#[derive(Debug, Default)]
pub struct VolatilityFacts {
    pub(crate) volatile_aggregates: HashSet<AggregateId>,
}

impl VolatilityFacts {
    pub fn aggregate_is_volatile(&self, id: AggregateId) -> bool {
        self.volatile_aggregates.contains(&id)
    }

    pub fn volatile_aggregate_count(&self) -> usize {
        self.volatile_aggregates.len()
    }

    /// Does reading or writing a location of this type touch volatile storage?
    pub fn type_is_volatile(&self, ty: &QualType) -> bool {
        if ty.volatile {
            return true;
        }
        match &ty.kind {
            TypeKind::Pointer(pointee) => self.type_is_volatile(pointee),
            TypeKind::Array(element) => self.type_is_volatile(element),
            TypeKind::Aggregate(id) => self.volatile_aggregates.contains(id),
            TypeKind::Scalar(_) | TypeKind::Other => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::program::Program;

    #[test]
    fn direct_qualifier_wins() {
        let facts = VolatilityFacts::default();
        assert!(facts.type_is_volatile(&QualType::scalar("int").volatile_qualified()));
        assert!(!facts.type_is_volatile(&QualType::scalar("int")));
    }

    #[test]
    fn pointer_recurses_into_pointee() {
        let facts = VolatilityFacts::default();
        let ptr = QualType::pointer_to(QualType::scalar("int").volatile_qualified());
        assert!(facts.type_is_volatile(&ptr));

        let plain = QualType::pointer_to(QualType::scalar("int"));
        assert!(!facts.type_is_volatile(&plain));
    }

    #[test]
    fn array_recurses_into_element() {
        let facts = VolatilityFacts::default();
        let arr = QualType::array_of(QualType::scalar("char").volatile_qualified());
        assert!(facts.type_is_volatile(&arr));
    }

    #[test]
    fn aggregate_uses_the_memoized_bit() {
        let mut program = Program::new();
        let s = program.declare_aggregate("S");
        let t = program.declare_aggregate("T");

        let mut facts = VolatilityFacts::default();
        facts.volatile_aggregates.insert(s);

        assert!(facts.type_is_volatile(&QualType::aggregate(s)));
        assert!(!facts.type_is_volatile(&QualType::aggregate(t)));
        assert!(facts.aggregate_is_volatile(s));
        assert!(!facts.aggregate_is_volatile(t));
    }

    #[test]
    fn nested_indirection_is_followed() {
        let facts = VolatilityFacts::default();
        let deep = QualType::pointer_to(QualType::array_of(QualType::pointer_to(
            QualType::scalar("int").volatile_qualified(),
        )));
        assert!(facts.type_is_volatile(&deep));
    }

    #[test]
    fn other_is_never_volatile() {
        let facts = VolatilityFacts::default();
        assert!(!facts.type_is_volatile(&QualType::other()));
    }
}
