//! Core analysis engine for Seqvol.
//!
//! Seqvol detects expressions that perform more than one volatile access
//! between consecutive sequence points in C and C++ programs. The compiler
//! is free to reorder such accesses, which breaks device registers and other
//! memory-mapped state that depends on access order.
//!
//! The crate is organized as a pipeline over an arena-backed program
//! representation ([`ir`]):
//!
//! 1. [`analysis::resolve_aggregates`] classifies every aggregate type as
//!    volatile-containing or not, tolerating recursive definitions.
//! 2. [`analysis::direct_volatile_functions`] summarizes which function
//!    bodies touch volatile storage directly.
//! 3. [`analysis::CallGraph::propagate`] extends that summary to transitive
//!    callers over the static call graph.
//! 4. [`analysis::SequenceAnalyzer`] counts volatile accesses per
//!    unsequenced scope and flags the first scope with two.
//!
//! [`engine::AnalysisEngine`] drives the pipeline and renders the result as
//! a structured [`diagnostic::Diagnostic`].

pub mod analysis;
pub mod config;
pub mod diagnostic;
pub mod engine;
pub mod ir;
pub mod visitor;

pub use config::{find_config_file, load_config, load_config_or_default, Config, ConfigError};
pub use diagnostic::{AccessNote, Diagnostic, Severity};
pub use engine::{AnalysisEngine, AnalysisError, AnalysisOutcome};
