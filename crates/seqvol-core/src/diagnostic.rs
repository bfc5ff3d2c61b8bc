//! Structured diagnostic for a reported violation.
//!
//! The analysis produces one diagnostic per run at most: the first
//! expression found to perform two unsequenced volatile accesses.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

/// One counted volatile access inside the offending expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessNote {
    pub line: u32,
    pub column: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Function containing the offending expression.
    pub function: String,
    pub line: u32,
    pub column: u32,
    /// Textual form of the offending expression.
    pub expr: String,
    /// The counted accesses, in discovery order; always at least two.
    pub accesses: Vec<AccessNote>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} in `{}` at line {}: {}",
            self.message, self.function, self.line, self.expr
        )?;
        writeln!(f, "  volatile accesses:")?;
        for access in &self.accesses {
            writeln!(f, "    {}", access.text)?;
        }
        Ok(())
    }
}
