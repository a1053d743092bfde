//! Shared diagnostic model for every compiler phase.
//!
//! The lexer, parser, semantic analyzer, and emitter all append into one
//! [`DiagnosticBag`] rather than returning their own error types for
//! recoverable problems. Only a handful of truly structural failures (see
//! each phase's `Error` type) bypass the bag.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

pub mod error_codes;
pub mod fuzzy;

/// A 1-based (line, column) location in a source file, plus how many bytes
/// the offending text spans (defaults to 1; used only for pretty-printing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub file: Option<String>,
    pub line: usize,
    pub column: usize,
    pub length: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            file: None,
            line,
            column,
            length: 1,
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length.max(1);
        self
    }

    pub fn unknown() -> Self {
        Self {
            file: None,
            line: 0,
            column: 0,
            length: 0,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:{}:{}", file, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Diagnostic severity. Ordered info < warning < error only for display
/// grouping; the bag's canonical ordering is by source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "{}", "error".red().bold()),
            Severity::Warning => write!(f, "{}", "warning".yellow().bold()),
            Severity::Info => write!(f, "{}", "info".blue().bold()),
        }
    }
}

use colored::Colorize;

/// A single severity-tagged, position-tagged message.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: String,
    pub message: String,
    pub position: Position,
    pub notes: Vec<String>,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, code: &str, message: impl Into<String>, position: Position) -> Self {
        Self {
            severity,
            code: code.to_string(),
            message: message.into(),
            position,
            notes: Vec::new(),
            help: None,
        }
    }

    pub fn error(code: &str, message: impl Into<String>, position: Position) -> Self {
        Self::new(Severity::Error, code, message, position)
    }

    pub fn warning(code: &str, message: impl Into<String>, position: Position) -> Self {
        Self::new(Severity::Warning, code, message, position)
    }

    pub fn info(code: &str, message: impl Into<String>, position: Position) -> Self {
        Self::new(Severity::Info, code, message, position)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Plain, uncolored one-line rendering: `(line:col): message`.
    pub fn render_plain(&self) -> String {
        format!("({}:{}): {}", self.position.line, self.position.column, self.message)
    }

    /// Rust-style colored rendering for terminals, not used by the core
    /// itself, which has no opinion on presentation.
    pub fn render_colored(&self) -> String {
        let mut out = format!(
            "{}[{}]: {}\n  {} {}\n",
            self.severity,
            self.code,
            self.message.bold(),
            "-->".cyan().bold(),
            self.position
        );
        for note in &self.notes {
            out.push_str(&format!("  {} {}\n", "=".cyan().bold(), note.cyan()));
        }
        if let Some(help) = &self.help {
            out.push_str(&format!("  {} {}\n", "help:".green().bold(), help));
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_plain())
    }
}

/// Append-only diagnostic collection, shared by every phase of a single
/// compilation. Never cleared across passes within one run.
#[derive(Debug, Default)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    warning_count: usize,
    info_count: usize,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
            Severity::Info => self.info_count += 1,
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn error(&mut self, code: &str, message: impl Into<String>, position: Position) {
        self.push(Diagnostic::error(code, message, position));
    }

    pub fn warning(&mut self, code: &str, message: impl Into<String>, position: Position) {
        self.push(Diagnostic::warning(code, message, position));
    }

    pub fn info(&mut self, code: &str, message: impl Into<String>, position: Position) {
        self.push(Diagnostic::info(code, message, position));
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn info_count(&self) -> usize {
        self.info_count
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Stable sort by (line, column); insertion order (and thus pass order)
    /// breaks ties, since `Vec::sort_by` is stable.
    pub fn sorted(&self) -> Vec<&Diagnostic> {
        let mut sorted: Vec<&Diagnostic> = self.diagnostics.iter().collect();
        sorted.sort_by(|a, b| {
            match a.position.line.cmp(&b.position.line) {
                Ordering::Equal => a.position.column.cmp(&b.position.column),
                other => other,
            }
        });
        sorted
    }

    pub fn extend(&mut self, other: DiagnosticBag) {
        for diag in other.diagnostics {
            self.push(diag);
        }
    }

    /// Minimal JSON export for a future LSP/driver integration.
    pub fn to_json(&self) -> String {
        let mut json = String::from("{\"diagnostics\":[");
        for (i, diag) in self.sorted().into_iter().enumerate() {
            if i > 0 {
                json.push(',');
            }
            let level = match diag.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
                Severity::Info => "info",
            };
            json.push_str(&format!(
                "{{\"severity\":\"{}\",\"code\":\"{}\",\"message\":\"{}\",\"line\":{},\"column\":{}}}",
                level,
                diag.code,
                diag.message.replace('"', "\\\""),
                diag.position.line,
                diag.position.column,
            ));
        }
        json.push_str("]}");
        json
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_sort_by_line_then_column() {
        let mut bag = DiagnosticBag::new();
        bag.error("E0001", "second line", Position::new(2, 1));
        bag.error("E0002", "first line, second col", Position::new(1, 5));
        bag.error("E0003", "first line, first col", Position::new(1, 1));

        let sorted = bag.sorted();
        assert_eq!(sorted[0].position.line, 1);
        assert_eq!(sorted[0].position.column, 1);
        assert_eq!(sorted[1].position.line, 1);
        assert_eq!(sorted[1].position.column, 5);
        assert_eq!(sorted[2].position.line, 2);
    }

    #[test]
    fn has_errors_reflects_severity_only() {
        let mut bag = DiagnosticBag::new();
        bag.warning("W0001", "unused", Position::new(1, 1));
        assert!(!bag.has_errors());
        bag.error("E0001", "boom", Position::new(1, 1));
        assert!(bag.has_errors());
    }

    #[test]
    fn bag_is_monotone_across_extend() {
        let mut bag = DiagnosticBag::new();
        bag.error("E0001", "from pass one", Position::new(1, 1));
        let mut pass_two = DiagnosticBag::new();
        pass_two.warning("W0001", "from pass two", Position::new(2, 1));
        bag.extend(pass_two);
        assert_eq!(bag.diagnostics().len(), 2);
    }
}
