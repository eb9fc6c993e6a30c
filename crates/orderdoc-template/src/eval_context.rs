//! Diagnostics and the evaluation context for template rendering.
//!
//! [`EvalContext`] is threaded through all evaluation functions to support:
//!
//! 1. **Diagnostics**: Collect errors and warnings with source spans
//! 2. **Configuration**: Strict mode for treating warnings as errors

use crate::ast::Span;
use crate::context::TemplateContext;
use serde::Serialize;

/// `{{#key}}` without a matching `{{/key}}`.
pub const UNCLOSED_BLOCK: &str = "T-1-1";
/// `{{/key}}` with no open block.
pub const STRAY_CLOSE: &str = "T-1-2";
/// A closing tag that matches an outer block rather than the innermost one.
pub const OVERLAPPING_BLOCKS: &str = "T-1-3";
/// `{{}}`, `{{#}}` or `{{/}}`.
pub const EMPTY_TAG: &str = "T-1-4";
/// A placeholder that resolved to nothing.
pub const UNRESOLVED_PLACEHOLDER: &str = "T-2-1";

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    Warning,
    Error,
}

/// A problem found while parsing or rendering a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub code: &'static str,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn warning(code: &'static str, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: DiagnosticKind::Warning,
            code,
            message: message.into(),
            span,
        }
    }

    pub fn error(code: &'static str, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: DiagnosticKind::Error,
            code,
            message: message.into(),
            span,
        }
    }

    /// The same diagnostic raised to an error.
    pub fn into_error(self) -> Self {
        Self {
            kind: DiagnosticKind::Error,
            ..self
        }
    }

    /// Format as `line:col: [code] message` against the template source.
    pub fn to_text(&self, source: &str) -> String {
        let (line, col) = self.span.line_col(source);
        let kind = match self.kind {
            DiagnosticKind::Warning => "warning",
            DiagnosticKind::Error => "error",
        };
        format!("{line}:{col}: {kind} [{}] {}", self.code, self.message)
    }
}

/// Collector for diagnostic messages during parsing and evaluation.
#[derive(Debug, Default, Clone)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty diagnostic collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic message.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(
            code = diagnostic.code,
            start = diagnostic.span.start,
            "{}",
            diagnostic.message
        );
        self.diagnostics.push(diagnostic);
    }

    /// Add an error message with code and span.
    pub fn error_with_code(&mut self, code: &'static str, message: impl Into<String>, span: Span) {
        self.add(Diagnostic::error(code, message, span));
    }

    /// Add a warning message with code and span.
    pub fn warn_with_code(&mut self, code: &'static str, message: impl Into<String>, span: Span) {
        self.add(Diagnostic::warning(code, message, span));
    }

    /// Check if any errors were collected (warnings don't count).
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::Error)
    }

    /// Get a reference to the collected diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consume the collector and return the diagnostics, sorted by source offset.
    pub fn into_diagnostics(mut self) -> Vec<Diagnostic> {
        self.diagnostics.sort_by_key(|diag| diag.span.start);
        self.diagnostics
    }

    /// Check if the collector is empty.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl Extend<Diagnostic> for DiagnosticCollector {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        for diagnostic in iter {
            self.add(diagnostic);
        }
    }
}

/// Context for template evaluation.
pub struct EvalContext<'a> {
    /// Order-level variable bindings.
    pub variables: &'a TemplateContext,

    /// Diagnostic collector for errors and warnings.
    pub diagnostics: DiagnosticCollector,

    /// Strict mode: treat warnings (e.g., malformed blocks) as errors.
    pub strict_mode: bool,

    /// Report placeholders that resolve to nothing.
    pub report_unresolved: bool,
}

impl<'a> EvalContext<'a> {
    /// Create a new evaluation context with the given variable bindings.
    pub fn new(variables: &'a TemplateContext) -> Self {
        Self {
            variables,
            diagnostics: DiagnosticCollector::new(),
            strict_mode: false,
            report_unresolved: false,
        }
    }

    /// Enable or disable strict mode.
    pub fn with_strict_mode(mut self, strict: bool) -> Self {
        self.strict_mode = strict;
        self
    }

    /// Enable or disable reporting of unresolved placeholders.
    pub fn with_report_unresolved(mut self, report: bool) -> Self {
        self.report_unresolved = report;
        self
    }

    /// Add an error or warning depending on strict mode.
    pub fn warn_or_error_with_code(
        &mut self,
        code: &'static str,
        message: impl Into<String>,
        span: Span,
    ) {
        if self.strict_mode {
            self.diagnostics.error_with_code(code, message, span);
        } else {
            self.diagnostics.warn_with_code(code, message, span);
        }
    }

    /// Carry parse diagnostics into this context, raising them in strict mode.
    pub fn absorb(&mut self, parsed: &[Diagnostic]) {
        let strict = self.strict_mode;
        self.diagnostics.extend(parsed.iter().cloned().map(|d| {
            if strict { d.into_error() } else { d }
        }));
    }
}
