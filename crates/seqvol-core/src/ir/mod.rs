//! In-memory program representation consumed by the analysis passes.
//!
//! The front-end collaborator (a C/C++ parser) builds a [`Program`] out of
//! aggregate definitions, function definitions and expression trees. The
//! analysis never mutates it; all derived facts (aggregate volatility,
//! function summaries) live in the analysis layer.

pub mod display;
pub mod expr;
pub mod program;
pub mod types;

pub use display::{expr_text, type_text};
pub use expr::{BinOp, Callee, Expr, ExprKind, Span};
pub use program::{AggregateDef, AggregateId, ExprId, Field, Function, FunctionId, Program};
pub use types::{QualType, TypeKind};
