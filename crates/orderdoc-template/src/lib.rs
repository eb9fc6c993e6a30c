//! Template engine for printed and exported order documents.
//!
//! Templates are plain text (usually HTML) with three kinds of tags:
//!
//! - Placeholders: `{{name}}`, `{{dim.width}}`, `{{customer.name}}`
//! - The item loop: `{{#items}}...{{/items}}`, with `{{@index}}` giving the
//!   1-based position of the current item
//! - Conditional blocks: `{{#notes}}...{{/notes}}`, kept only when `notes`
//!   resolves to something other than null or the empty string
//!
//! # Architecture
//!
//! Source text is split into tokens by [`lexer`], assembled into an AST by a
//! stack parser ([`Template::parse`]) and rendered by the [`evaluator`]. Block
//! tags are matched by comparing key names, never by building patterns from
//! them, so keys may contain any character except `}`.
//!
//! Malformed block structure (unclosed, stray or overlapping tags) never makes
//! parsing fail. It is reported as a [`Diagnostic`] and the template renders
//! as much as it can. [`RenderOptions::strict`] turns those diagnostics into
//! errors.
//!
//! The engine knows nothing about catalogs or order lines; callers convert
//! their data into [`TemplateValue`]s first.
//!
//! # Example
//!
//! ```rust
//! use orderdoc_template::{Template, TemplateContext, TemplateValue};
//!
//! let template = Template::parse("{{#items}}{{@index}}:{{optionName}} {{/items}}");
//!
//! let mut ctx = TemplateContext::new();
//! ctx.insert(
//!     "items",
//!     TemplateValue::List(vec![
//!         TemplateValue::map([("optionName", TemplateValue::from("A"))]),
//!         TemplateValue::map([("optionName", TemplateValue::from("B"))]),
//!     ]),
//! );
//!
//! assert_eq!(template.render(&ctx), "1:A 2:B ");
//! ```

pub mod ast;
pub mod context;
pub mod error;
pub mod eval_context;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod resolve;

pub use ast::{Block, Literal, Span, TemplateNode, VariableRef};
pub use context::{TemplateContext, TemplateValue};
pub use error::{TemplateError, TemplateResult};
pub use eval_context::{Diagnostic, DiagnosticCollector, DiagnosticKind, EvalContext};
pub use evaluator::{Escape, RenderOptions, Rendered, escape_html};
pub use parser::{ITEMS_KEY, Template};

/// Render `source` against `context` in one step.
///
/// Never fails: unresolved placeholders become empty strings and malformed
/// blocks are rendered as well as possible.
pub fn render(source: &str, context: &TemplateContext) -> String {
    Template::parse(source).render(context)
}
