//! Printable HTML for an order.
//!
//! The configured header, body and footer templates are rendered against the
//! order context, then placed into a self-contained page by rendering
//! [`PAGE_TEMPLATE`] with the engine. Without a body template the body is a
//! set of per-group tables built from the same rows as the export, using the
//! print conventions (`N/A` for missing values, `Total` for the total row).

use crate::cell::Cell;
use crate::context::OrderDocument;
use crate::error::{ExportError, Result};
use crate::rows::{GroupRows, GroupedOrder, RowBuilder};
use crate::settings::DocumentSettings;
use orderdoc_template::{
    Diagnostic, Escape, RenderOptions, Template, TemplateContext, TemplateValue, escape_html,
};
use orderdoc_types::SpecCatalog;

/// Page wrapper. `header`, `body` and `footer` are already rendered HTML.
pub const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{{title}}</title>
<style>
body { font-family: Arial, Helvetica, sans-serif; font-size: 12px; color: #222; margin: 24px; }
h1 { font-size: 18px; margin: 0 0 12px 0; }
h2 { font-size: 14px; margin: 18px 0 6px 0; }
table { border-collapse: collapse; width: 100%; margin-bottom: 12px; }
th, td { border: 1px solid #999; padding: 4px 6px; text-align: left; }
th { background: #eee; }
tfoot td { font-weight: bold; }
header, footer { margin: 12px 0; }
</style>
</head>
<body>
{{#header}}<header>{{header}}</header>
{{/header}}<main>
{{body}}
</main>
{{#footer}}<footer>{{footer}}</footer>
{{/footer}}</body>
</html>
"#;

/// Rendered page with the diagnostics of each template section.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintOutput {
    pub html: String,
    pub diagnostics: Vec<(&'static str, Diagnostic)>,
}

/// Renders order documents to HTML.
#[derive(Debug, Clone, Default)]
pub struct PrintDocument {
    settings: DocumentSettings,
}

impl PrintDocument {
    pub fn new(settings: DocumentSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &DocumentSettings {
        &self.settings
    }

    pub fn render(&self, document: &OrderDocument, catalog: &SpecCatalog) -> Result<PrintOutput> {
        let print = &self.settings.print;
        let ctx = document.to_template_context(&self.settings.export.file_marker);
        let options = RenderOptions {
            strict: print.strict,
            report_unresolved: print.strict,
            escape: if print.escape_values {
                Escape::Html
            } else {
                Escape::None
            },
        };

        let mut diagnostics = Vec::new();
        let mut section = |name: &'static str, source: Option<&str>| -> Result<String> {
            let Some(source) = source else {
                return Ok(String::new());
            };
            let rendered = Template::parse(source)
                .render_with(&ctx, &options)
                .map_err(|source| ExportError::Template {
                    section: name,
                    source,
                })?;
            for diagnostic in rendered.diagnostics {
                tracing::warn!(
                    section = name,
                    code = diagnostic.code,
                    "{}",
                    diagnostic.to_text(source)
                );
                diagnostics.push((name, diagnostic));
            }
            Ok(rendered.output)
        };

        let header = section("header", print.header.as_deref())?;
        let footer = section("footer", print.footer.as_deref())?;
        let body = match print.body.as_deref() {
            Some(body) => section("body", Some(body))?,
            None => self.default_body(document, catalog),
        };

        let mut page = TemplateContext::new();
        page.insert("title", TemplateValue::from(escape_html(&self.title(document))));
        page.insert("header", TemplateValue::from(header));
        page.insert("body", TemplateValue::from(body));
        page.insert("footer", TemplateValue::from(footer));

        Ok(PrintOutput {
            html: Template::parse(PAGE_TEMPLATE).render(&page),
            diagnostics,
        })
    }

    /// Configured title, else one built from the order id.
    pub fn title(&self, document: &OrderDocument) -> String {
        if let Some(title) = &self.settings.print.title {
            return title.clone();
        }
        match document.meta_text("orderId") {
            Some(id) => format!("Order {id}"),
            None => "Order".to_string(),
        }
    }

    /// Per-group item tables.
    pub fn default_body(&self, document: &OrderDocument, catalog: &SpecCatalog) -> String {
        let export = self.settings.export.for_print();
        let grouped = GroupedOrder::new(&document.items, catalog, &export);
        let builder = RowBuilder::new(&export);

        let mut html = format!("<h1>{}</h1>\n", escape_html(&self.title(document)));
        for group in grouped.group_rows(&builder) {
            html.push_str(&group_table(&group));
        }
        html
    }
}

fn group_table(group: &GroupRows) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        "<section class=\"group\" data-type=\"{}\">\n",
        escape_html(&group.type_id)
    ));
    html.push_str(&format!("<h2>{}</h2>\n", escape_html(&group.header)));
    html.push_str("<table>\n<thead>\n");
    push_row(&mut html, &group.columns, "th");
    html.push_str("</thead>\n<tbody>\n");
    for row in &group.items {
        push_row(&mut html, row, "td");
    }
    html.push_str("</tbody>\n");
    if let Some(total) = &group.total {
        html.push_str("<tfoot>\n");
        push_row(&mut html, total, "td");
        html.push_str("</tfoot>\n");
    }
    html.push_str("</table>\n</section>\n");
    html
}

fn push_row(html: &mut String, row: &[Cell], tag: &str) {
    html.push_str("<tr>");
    for cell in row {
        html.push_str(&format!("<{tag}>{}</{tag}>", escape_html(&cell.to_string())));
    }
    html.push_str("</tr>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::PrintSettings;
    use orderdoc_types::{OptionItem, SpecValue};

    fn document() -> OrderDocument {
        let item = |id: &str, name: &str, width: &str| OptionItem {
            id: id.into(),
            option_type_id: "material".into(),
            option_type_name: "Material".into(),
            option_id: "steel".into(),
            option_name: name.into(),
            specification_values: [("width".to_string(), SpecValue::text(width))]
                .into_iter()
                .collect(),
        };
        OrderDocument::new(vec![item("1", "Steel <A>", "10"), item("2", "Steel B", "")])
            .with_meta("orderId", "SO-1")
            .with_meta("notes", "")
    }

    #[test]
    fn test_default_body_tables() {
        let html = PrintDocument::default().default_body(&document(), &SpecCatalog::default());

        assert!(html.starts_with("<h1>Order SO-1</h1>"));
        assert!(html.contains("<section class=\"group\" data-type=\"material\">\n<h2>"));
        assert!(html.ends_with("</table>\n</section>\n"));
        assert!(html.contains("<tr><th>#</th><th>Option Name</th><th>width</th></tr>"));
        assert!(html.contains("<tr><td>1</td><td>Steel &lt;A&gt;</td><td>10</td></tr>"));
        assert!(html.contains("<tr><td>2</td><td>Steel B</td><td>N/A</td></tr>"));
        assert!(html.contains("<tfoot>\n<tr><td></td><td>Total</td><td>10</td></tr>"));
    }

    #[test]
    fn test_page_with_sections() {
        let settings = DocumentSettings {
            print: PrintSettings {
                header: Some("Order {{orderId}}{{#notes}} ({{notes}}){{/notes}}".into()),
                footer: Some("{{itemCount}} lines".into()),
                ..PrintSettings::default()
            },
            ..DocumentSettings::default()
        };

        let output = PrintDocument::new(settings)
            .render(&document(), &SpecCatalog::default())
            .unwrap();

        assert!(output.html.starts_with("<!DOCTYPE html>"));
        assert!(output.html.contains("<title>Order SO-1</title>"));
        assert!(output.html.contains("<header>Order SO-1</header>"));
        assert!(output.html.contains("<footer>2 lines</footer>"));
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn test_missing_sections_are_left_out() {
        let output = PrintDocument::default()
            .render(&document(), &SpecCatalog::default())
            .unwrap();
        assert!(!output.html.contains("<header>"));
        assert!(!output.html.contains("<footer>"));
        assert!(output.html.contains("<main>\n<h1>Order SO-1</h1>"));
    }

    #[test]
    fn test_strict_section_error() {
        let settings = DocumentSettings {
            print: PrintSettings {
                body: Some("{{#items}}{{unknownField}}".into()),
                strict: true,
                ..PrintSettings::default()
            },
            ..DocumentSettings::default()
        };

        let err = PrintDocument::new(settings)
            .render(&document(), &SpecCatalog::default())
            .unwrap_err();
        assert!(matches!(err, ExportError::Template { section: "body", .. }));
    }

    #[test]
    fn test_lenient_section_diagnostics() {
        let settings = DocumentSettings {
            print: PrintSettings {
                body: Some("{{/stray}}{{#items}}{{optionName}};{{/items}}".into()),
                ..PrintSettings::default()
            },
            ..DocumentSettings::default()
        };

        let output = PrintDocument::new(settings)
            .render(&document(), &SpecCatalog::default())
            .unwrap();
        assert!(output.html.contains("Steel <A>;Steel B;"));
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].0, "body");
    }
}
