//! Analysis driver and reporter.
//!
//! Sequences the passes over a whole program: aggregate volatility
//! resolution, the direct per-function summary, call-graph propagation, and
//! finally the sequencing analysis at every expression node in a
//! deterministic pre-order. The first violation wins and halts the walk;
//! the run is a single-violation reporter by design.

use crate::analysis::aggregates::resolve_aggregates;
use crate::analysis::callgraph::{CallGraph, FunctionVolatility};
use crate::analysis::direct::direct_volatile_functions;
use crate::analysis::sequencing::{ScopeOutcome, SequenceAnalyzer, Violation};
use crate::config::Config;
use crate::diagnostic::{AccessNote, Diagnostic, Severity};
use crate::ir::display::expr_text;
use crate::ir::program::{FunctionId, Program};
use crate::visitor::{walk_function, VisitFlow};

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The analyzer claimed a violation whose access record is too short to
    /// support it. This is a bug in the analyzer, not in the input program.
    #[error("violation reported with {len} recorded accesses; at least two are required")]
    CorruptAccessRecord { len: usize },
}

/// Result of one whole-program analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Clean,
    Violation(Diagnostic),
}

impl AnalysisOutcome {
    pub fn is_clean(&self) -> bool {
        matches!(self, AnalysisOutcome::Clean)
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            AnalysisOutcome::Clean => None,
            AnalysisOutcome::Violation(diagnostic) => Some(diagnostic),
        }
    }
}

pub struct AnalysisEngine {
    config: Config,
}

impl AnalysisEngine {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub fn analyze(&self, program: &Program) -> Result<AnalysisOutcome, AnalysisError> {
        let facts = resolve_aggregates(program);
        tracing::debug!(
            aggregates = program.aggregates().count(),
            volatile_aggregates = facts.volatile_aggregate_count(),
            "aggregate volatility resolved"
        );

        let direct = direct_volatile_functions(program, &facts);
        let summary = CallGraph::build(program).propagate(&direct);
        self.log_volatile_functions(program, &summary);

        let analyzer = SequenceAnalyzer::new(program, &facts, &summary);
        let mut found: Option<(FunctionId, Violation)> = None;
        for (function, f) in program.functions() {
            if !f.has_body() {
                continue;
            }
            let flow = walk_function(program, function, &mut |expr| {
                match analyzer.analyze(expr) {
                    ScopeOutcome::Violation(violation) => {
                        found = Some((function, violation));
                        VisitFlow::Halt
                    }
                    ScopeOutcome::Clean(_) => VisitFlow::Descend,
                }
            });
            if flow.is_break() {
                break;
            }
        }

        match found {
            None => Ok(AnalysisOutcome::Clean),
            Some((function, violation)) => {
                let diagnostic = self.report(program, function, violation)?;
                tracing::debug!(function = %diagnostic.function, line = diagnostic.line, "violation found");
                Ok(AnalysisOutcome::Violation(diagnostic))
            }
        }
    }

    fn report(
        &self,
        program: &Program,
        function: FunctionId,
        violation: Violation,
    ) -> Result<Diagnostic, AnalysisError> {
        if violation.accesses.len() < 2 {
            return Err(AnalysisError::CorruptAccessRecord {
                len: violation.accesses.len(),
            });
        }
        let span = program.expr(violation.offending).span;
        let accesses = violation
            .accesses
            .iter()
            .map(|&access| {
                let access_span = program.expr(access).span;
                AccessNote {
                    line: access_span.line,
                    column: access_span.column,
                    text: expr_text(program, access),
                }
            })
            .collect();
        Ok(Diagnostic {
            severity: Severity::from(self.config.report.severity),
            message: "multiple volatile accesses between sequence points".to_string(),
            function: program.function(function).name.clone(),
            line: span.line,
            column: span.column,
            expr: expr_text(program, violation.offending),
            accesses,
        })
    }

    fn log_volatile_functions(&self, program: &Program, summary: &FunctionVolatility) {
        let mut names: Vec<&str> = summary
            .iter()
            .map(|f| program.function(f).name.as_str())
            .collect();
        names.sort_unstable();
        if self.config.log.volatile_functions {
            tracing::info!(functions = ?names, "functions with volatile accesses");
        } else {
            tracing::debug!(functions = ?names, "functions with volatile accesses");
        }
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}
