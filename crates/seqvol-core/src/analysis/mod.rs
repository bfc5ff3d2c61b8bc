//! Analysis passes over the program representation.
//!
//! Pass order, as sequenced by the engine: aggregate volatility resolution,
//! then the direct per-function summary, then call-graph propagation, then
//! the sequencing-aware expression analysis. Each pass consumes the frozen
//! output of the previous one; nothing here keeps ambient global state.

pub mod aggregates;
pub mod callgraph;
pub mod direct;
pub mod sequencing;
pub mod volatility;

pub use aggregates::resolve_aggregates;
pub use callgraph::{CallGraph, FunctionVolatility};
pub use direct::direct_volatile_functions;
pub use sequencing::{ScopeOutcome, SequenceAnalyzer, Violation};
pub use volatility::VolatilityFacts;
