use super::shapes::{PropertyPath, Severity};
use crate::consts::sh;
use oxigraph::model::Term;
use std::fmt;

/// One failed constraint for one focus node.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub focus_node: Term,
    pub path: Option<PropertyPath>,
    pub value: Option<Term>,
    pub source_shape: Term,
    /// Local name of the constraint component, e.g. "MinCountConstraintComponent".
    pub component: &'static str,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self.severity {
            Severity::Violation => "Constraint Violation",
            Severity::Warning => "Validation Warning",
            Severity::Info => "Validation Info",
        };
        writeln!(
            f,
            "{} in {} ({}{}):",
            kind,
            self.component,
            sh::NAMESPACE,
            self.component
        )?;
        writeln!(f, "\tSeverity: {}", self.severity)?;
        writeln!(f, "\tSource Shape: {}", self.source_shape)?;
        writeln!(f, "\tFocus Node: {}", self.focus_node)?;
        if let Some(value) = &self.value {
            writeln!(f, "\tValue Node: {value}")?;
        }
        if let Some(path) = &self.path {
            writeln!(f, "\tResult Path: {path}")?;
        }
        writeln!(f, "\tMessage: {}", self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub conforms: bool,
    pub results: Vec<ValidationResult>,
}

impl ValidationReport {
    pub fn new(results: Vec<ValidationResult>) -> Self {
        Self {
            conforms: results.is_empty(),
            results,
        }
    }

    /// Results whose severity rank is at most `rank` (1 = violations only).
    pub fn results_up_to(&self, rank: u8) -> impl Iterator<Item = &ValidationResult> {
        self.results
            .iter()
            .filter(move |r| r.severity.rank() <= rank)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.results.iter().filter(|r| r.severity == severity).count()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Validation Report")?;
        writeln!(
            f,
            "Conforms: {}",
            if self.conforms { "True" } else { "False" }
        )?;
        if self.results.is_empty() {
            return Ok(());
        }
        writeln!(f, "Results ({}):", self.results.len())?;
        for result in &self.results {
            write!(f, "{result}")?;
        }
        Ok(())
    }
}
