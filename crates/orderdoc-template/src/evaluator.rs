//! Template evaluation.
//!
//! Output is produced in a single pass over the AST, so a substituted value is
//! never scanned for tags again.

use crate::ast::TemplateNode;
use crate::context::TemplateContext;
use crate::error::{TemplateError, TemplateResult};
use crate::eval_context::{Diagnostic, EvalContext, UNRESOLVED_PLACEHOLDER};
use crate::parser::{ITEMS_KEY, Template};
use crate::resolve::{Scope, resolve};

/// How substituted values are written into the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Escape {
    /// Insert values verbatim.
    #[default]
    None,
    /// Escape `& < > " '` in values. Literal template text is untouched.
    Html,
}

/// Options for [`Template::render_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Fail if any diagnostic is recorded.
    pub strict: bool,
    pub escape: Escape,
    /// Record a diagnostic for every placeholder that resolves to nothing.
    pub report_unresolved: bool,
}

impl RenderOptions {
    pub fn strict() -> Self {
        Self {
            strict: true,
            report_unresolved: true,
            ..Self::default()
        }
    }

    pub fn with_escape(mut self, escape: Escape) -> Self {
        self.escape = escape;
        self
    }
}

/// Rendered output together with any diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub output: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl Template {
    /// Render against `context`. Unresolved placeholders render empty.
    pub fn render(&self, context: &TemplateContext) -> String {
        let mut ctx = EvalContext::new(context);
        let mut output = String::new();
        evaluate_nodes(&self.nodes, Scope::Order, &mut ctx, Escape::None, &mut output);
        output
    }

    /// Render with explicit options.
    ///
    /// Parse diagnostics are included in the result. In strict mode they,
    /// and any evaluation diagnostics, become a [`TemplateError::Strict`].
    pub fn render_with(
        &self,
        context: &TemplateContext,
        options: &RenderOptions,
    ) -> TemplateResult<Rendered> {
        let mut ctx = EvalContext::new(context)
            .with_strict_mode(options.strict)
            .with_report_unresolved(options.report_unresolved);
        ctx.absorb(&self.diagnostics);

        let mut output = String::new();
        evaluate_nodes(&self.nodes, Scope::Order, &mut ctx, options.escape, &mut output);

        if ctx.diagnostics.has_errors() {
            return Err(TemplateError::Strict {
                diagnostics: ctx.diagnostics.into_diagnostics(),
            });
        }
        Ok(Rendered {
            output,
            diagnostics: ctx.diagnostics.into_diagnostics(),
        })
    }
}

fn evaluate_nodes<'a>(
    nodes: &[TemplateNode],
    scope: Scope<'a>,
    ctx: &mut EvalContext<'a>,
    escape: Escape,
    output: &mut String,
) {
    for node in nodes {
        match node {
            TemplateNode::Literal(literal) => output.push_str(&literal.text),

            TemplateNode::Placeholder(var) => match resolve(&var.name, scope, ctx.variables) {
                Some(value) => {
                    let text = value.render();
                    match escape {
                        Escape::None => output.push_str(&text),
                        Escape::Html => output.push_str(&escape_html(&text)),
                    }
                }
                None if ctx.report_unresolved => ctx.warn_or_error_with_code(
                    UNRESOLVED_PLACEHOLDER,
                    format!("Placeholder '{}' did not resolve to a value", var.name),
                    var.span,
                ),
                None => {}
            },

            TemplateNode::Index(_) => {
                if let Some(position) = scope.position() {
                    output.push_str(&position.to_string());
                }
            }

            TemplateNode::Loop(block) => {
                let variables = ctx.variables;
                let Some(items) = variables.list(ITEMS_KEY) else {
                    tracing::trace!("No item list to iterate");
                    continue;
                };
                for (index, item) in items.iter().enumerate() {
                    evaluate_nodes(&block.body, Scope::Item { item, index }, ctx, escape, output);
                }
            }

            TemplateNode::Conditional(block) => {
                let present = resolve(&block.key.name, scope, ctx.variables)
                    .is_some_and(|value| value.is_present());
                if present {
                    evaluate_nodes(&block.body, scope, ctx, escape, output);
                }
            }
        }
    }
}

/// Escape text for inclusion in HTML content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TemplateValue;
    use crate::eval_context::{DiagnosticKind, UNCLOSED_BLOCK};
    use pretty_assertions::assert_eq;

    fn ctx_with(entries: &[(&str, &str)]) -> TemplateContext {
        let mut ctx = TemplateContext::new();
        for (key, value) in entries {
            ctx.insert(*key, TemplateValue::from(*value));
        }
        ctx
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_index_outside_loop_is_empty() {
        let template = Template::parse("[{{@index}}]");
        assert_eq!(template.render(&TemplateContext::new()), "[]");
    }

    #[test]
    fn test_escape_applies_to_values_only() {
        let template = Template::parse("<b>{{name}}</b>");
        let ctx = ctx_with(&[("name", "A & B")]);
        let rendered = template
            .render_with(&ctx, &RenderOptions::default().with_escape(Escape::Html))
            .unwrap();
        assert_eq!(rendered.output, "<b>A &amp; B</b>");
    }

    #[test]
    fn test_report_unresolved_warning() {
        let template = Template::parse("{{missing}}");
        let options = RenderOptions {
            report_unresolved: true,
            ..RenderOptions::default()
        };
        let rendered = template
            .render_with(&TemplateContext::new(), &options)
            .unwrap();
        assert_eq!(rendered.output, "");
        assert_eq!(rendered.diagnostics[0].code, UNRESOLVED_PLACEHOLDER);
        assert_eq!(rendered.diagnostics[0].kind, DiagnosticKind::Warning);
    }

    #[test]
    fn test_strict_fails_on_unresolved() {
        let template = Template::parse("{{missing}}");
        let err = template
            .render_with(&TemplateContext::new(), &RenderOptions::strict())
            .unwrap_err();
        assert!(matches!(err, TemplateError::Strict { .. }));
    }

    #[test]
    fn test_parse_diagnostics_carried_into_render() {
        let template = Template::parse("{{#notes}}x");
        let ctx = ctx_with(&[("notes", "ok")]);

        let rendered = template
            .render_with(&ctx, &RenderOptions::default())
            .unwrap();
        assert_eq!(rendered.output, "x");
        assert_eq!(rendered.diagnostics[0].code, UNCLOSED_BLOCK);

        let strict = RenderOptions {
            strict: true,
            ..RenderOptions::default()
        };
        assert!(template.render_with(&ctx, &strict).is_err());
    }
}
