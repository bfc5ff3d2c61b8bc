//! Type representation: a volatile qualifier bit plus a structural tag.
//!
//! Aggregate volatility is deliberately not stored here. It is computed once
//! per distinct definition by the aggregate resolver and looked up through
//! `VolatilityFacts`; the type itself only carries the definition identity.

use crate::ir::program::AggregateId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualType {
    /// Direct `volatile` qualification on this type.
    pub volatile: bool,
    pub kind: TypeKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    /// A scalar type, carrying its spelled name for diagnostics.
    Scalar(String),
    Pointer(Box<QualType>),
    Array(Box<QualType>),
    Aggregate(AggregateId),
    /// Function types, vararg placeholders and anything else the analysis
    /// does not need to look inside.
    Other,
}

impl QualType {
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            volatile: false,
            kind: TypeKind::Scalar(name.into()),
        }
    }

    pub fn pointer_to(pointee: QualType) -> Self {
        Self {
            volatile: false,
            kind: TypeKind::Pointer(Box::new(pointee)),
        }
    }

    pub fn array_of(element: QualType) -> Self {
        Self {
            volatile: false,
            kind: TypeKind::Array(Box::new(element)),
        }
    }

    pub fn aggregate(id: AggregateId) -> Self {
        Self {
            volatile: false,
            kind: TypeKind::Aggregate(id),
        }
    }

    pub fn other() -> Self {
        Self {
            volatile: false,
            kind: TypeKind::Other,
        }
    }

    /// Adds a direct `volatile` qualifier.
    pub fn volatile_qualified(mut self) -> Self {
        self.volatile = true;
        self
    }
}
