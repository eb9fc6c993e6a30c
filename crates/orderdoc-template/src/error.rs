//! Error types for template compilation and strict rendering.

use crate::eval_context::Diagnostic;
use thiserror::Error;

/// Errors that can occur during template operations.
///
/// Non-strict parsing and rendering never fail; these only come out of the
/// strict entry points.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template's block structure is malformed.
    #[error("Template has {} error(s), first: {}", .diagnostics.len(), first_message(.diagnostics))]
    Malformed { diagnostics: Vec<Diagnostic> },

    /// Evaluation produced error diagnostics in strict mode.
    #[error("Strict rendering failed with {} error(s), first: {}", .diagnostics.len(), first_message(.diagnostics))]
    Strict { diagnostics: Vec<Diagnostic> },
}

impl TemplateError {
    /// The diagnostics that caused this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            TemplateError::Malformed { diagnostics } | TemplateError::Strict { diagnostics } => {
                diagnostics
            }
        }
    }
}

fn first_message(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .first()
        .map(|d| format!("[{}] {}", d.code, d.message))
        .unwrap_or_default()
}

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;
