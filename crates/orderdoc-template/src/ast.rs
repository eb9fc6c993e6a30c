//! Template AST types.
//!
//! Each node keeps the byte span it was parsed from so diagnostics can point
//! back into the template source.

use serde::Serialize;

/// Byte range in the template source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// 1-based line and column of the span start within `source`.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let mut line = 1;
        let mut column = 1;
        for (offset, ch) in source.char_indices() {
            if offset >= self.start {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        (line, column)
    }
}

/// A node in the template AST.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateNode {
    /// Literal text to be output as-is.
    Literal(Literal),

    /// Placeholder: `{{name}}` or `{{dim.key}}`
    Placeholder(VariableRef),

    /// Position of the current loop item: `{{@index}}`
    Index(Span),

    /// The item loop: `{{#items}}...{{/items}}`
    Loop(Block),

    /// Conditional block: `{{#key}}...{{/key}}`
    Conditional(Block),
}

/// Literal text node.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub text: String,
    pub span: Span,
}

/// A reference to a value by name, as written between the braces.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableRef {
    /// The trimmed name, e.g. `optionName` or `dim.width`.
    pub name: String,
    pub span: Span,
}

impl VariableRef {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// A block opened by `{{#key}}` and closed by `{{/key}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub key: VariableRef,
    pub body: Vec<TemplateNode>,
    /// From the start of the opening tag to the end of the closing tag.
    pub span: Span,
}
