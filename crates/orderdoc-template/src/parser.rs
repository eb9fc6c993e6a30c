//! Stack parser from tokens to the template AST.
//!
//! Blocks are matched by comparing the closing key with the keys of open
//! blocks. Malformed structure is recovered from, never rejected:
//!
//! - an opener that is never closed is dropped and its content kept in place
//! - a closer with no open block is dropped
//! - a closer that matches an outer block closes it, and every block opened
//!   inside it is treated as unclosed
//!
//! Each recovery records a [`Diagnostic`].

use crate::ast::{Block, Literal, Span, TemplateNode, VariableRef};
use crate::error::{TemplateError, TemplateResult};
use crate::eval_context::{
    Diagnostic, DiagnosticCollector, EMPTY_TAG, OVERLAPPING_BLOCKS, STRAY_CLOSE, UNCLOSED_BLOCK,
};
use crate::lexer::{Token, tokenize};

/// The block key that iterates order items. Every other block key is a
/// conditional.
pub const ITEMS_KEY: &str = "items";

/// A parsed template.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub(crate) source: String,
    pub(crate) nodes: Vec<TemplateNode>,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl Template {
    /// Parse template source. Never fails; structural problems are kept as
    /// diagnostics.
    pub fn parse(source: &str) -> Self {
        let mut collector = DiagnosticCollector::new();
        let nodes = Parser::new(&mut collector).run(source);
        Template {
            source: source.to_string(),
            nodes,
            diagnostics: collector.into_diagnostics(),
        }
    }

    /// Parse template source, failing if it has any structural problem.
    pub fn compile_strict(source: &str) -> TemplateResult<Self> {
        let template = Self::parse(source);
        if template.diagnostics.is_empty() {
            Ok(template)
        } else {
            Err(TemplateError::Malformed {
                diagnostics: template
                    .diagnostics
                    .into_iter()
                    .map(Diagnostic::into_error)
                    .collect(),
            })
        }
    }

    /// The source this template was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed nodes.
    pub fn nodes(&self) -> &[TemplateNode] {
        &self.nodes
    }

    /// Diagnostics recorded while parsing.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

struct Frame {
    key: VariableRef,
    nodes: Vec<TemplateNode>,
}

struct Parser<'c> {
    diagnostics: &'c mut DiagnosticCollector,
    root: Vec<TemplateNode>,
    stack: Vec<Frame>,
}

impl<'c> Parser<'c> {
    fn new(diagnostics: &'c mut DiagnosticCollector) -> Self {
        Self {
            diagnostics,
            root: Vec::new(),
            stack: Vec::new(),
        }
    }

    fn run(mut self, source: &str) -> Vec<TemplateNode> {
        for spanned in tokenize(source) {
            let span = spanned.span;
            match spanned.token {
                Token::Text(text) => self.push(TemplateNode::Literal(Literal {
                    text: text.to_string(),
                    span,
                })),
                Token::Placeholder(name) => {
                    self.push(TemplateNode::Placeholder(VariableRef::new(name, span)))
                }
                Token::Index => self.push(TemplateNode::Index(span)),
                Token::Open(key) => self.stack.push(Frame {
                    key: VariableRef::new(key, span),
                    nodes: Vec::new(),
                }),
                Token::Close(key) => self.close(key, span),
                Token::Empty => {
                    self.diagnostics
                        .warn_with_code(EMPTY_TAG, "Empty template tag ignored", span)
                }
            }
        }

        while let Some(frame) = self.stack.pop() {
            self.unclosed(frame);
        }
        self.root
    }

    fn push(&mut self, node: TemplateNode) {
        match self.stack.last_mut() {
            Some(frame) => frame.nodes.push(node),
            None => self.root.push(node),
        }
    }

    fn close(&mut self, key: &str, span: Span) {
        let Some(depth) = self.stack.iter().rposition(|f| f.key.name == key) else {
            self.diagnostics.warn_with_code(
                STRAY_CLOSE,
                format!("Closing tag '{key}' has no open block"),
                span,
            );
            return;
        };

        while self.stack.len() > depth + 1 {
            if let Some(inner) = self.stack.pop() {
                self.diagnostics.warn_with_code(
                    OVERLAPPING_BLOCKS,
                    format!(
                        "Block '{}' overlaps block '{key}' and is left unclosed",
                        inner.key.name
                    ),
                    inner.key.span,
                );
                self.flatten(inner);
            }
        }

        if let Some(frame) = self.stack.pop() {
            let block = Block {
                span: Span::new(frame.key.span.start, span.end),
                key: frame.key,
                body: frame.nodes,
            };
            let node = if block.key.name == ITEMS_KEY {
                TemplateNode::Loop(block)
            } else {
                TemplateNode::Conditional(block)
            };
            self.push(node);
        }
    }

    fn unclosed(&mut self, frame: Frame) {
        self.diagnostics.warn_with_code(
            UNCLOSED_BLOCK,
            format!("Block '{}' is never closed", frame.key.name),
            frame.key.span,
        );
        self.flatten(frame);
    }

    /// Drop the opener of `frame` and keep its content in the enclosing scope.
    fn flatten(&mut self, frame: Frame) {
        for node in frame.nodes {
            self.push(node);
        }
    }
}
