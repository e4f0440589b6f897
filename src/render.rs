use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io::Write;

use clap::ValueEnum;
use handlebars::Handlebars;
use serde::Deserialize;

use crate::error;
use crate::view::ViewSnapshot;

const DOCUMENT_LIST: &str = "document_list";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Text,
    Html,
    Json,
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Format::Text => write!(f, "text"),
            Format::Html => write!(f, "html"),
            Format::Json => write!(f, "json"),
        }
    }
}

pub struct Renderer {
    registry: Handlebars<'static>,
}

impl Renderer {
    pub fn new() -> error::Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_template_string(
            DOCUMENT_LIST,
            include_str!("../templates/document_list.hbs")
        )?;

        Ok(Renderer { registry })
    }

    pub fn render<O>(&self, snapshot: &ViewSnapshot<'_>, format: Format, output: &mut O) -> error::Result
    where
        O: Write
    {
        match format {
            Format::Text => write_text(snapshot, output)?,
            Format::Html => {
                self.registry.render_to_write(DOCUMENT_LIST, snapshot, &mut *output)?;
            },
            Format::Json => {
                serde_json::to_writer_pretty(&mut *output, snapshot)?;
                writeln!(output)?;
            }
        }

        output.flush()?;

        Ok(())
    }
}

pub fn write_text<O>(snapshot: &ViewSnapshot<'_>, output: &mut O) -> std::io::Result<()>
where
    O: Write
{
    writeln!(output, "Document List")?;
    writeln!(output, "Showing {} documents", snapshot.count)?;
    writeln!(output, "Showing {} to {} documents", snapshot.skip, snapshot.end)?;
    writeln!(output, "[Previous] [Next]")?;

    for document in snapshot.documents {
        let [concept1, concept2] = document.concepts();

        writeln!(output)?;
        writeln!(output, "  {}", document.title)?;
        writeln!(output, "  {}", document.date)?;
        writeln!(output, "  {}", document.url)?;
        writeln!(output, "  Author: {}", document.author)?;
        writeln!(output, "  Concepts: {}, {}", concept1, concept2)?;
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use docview_lib::document::Document;
    use docview_lib::query::PageQuery;

    use super::*;
    use crate::view::test::doc;

    fn render(snapshot: &ViewSnapshot<'_>, format: Format) -> String {
        let renderer = Renderer::new().unwrap();
        let mut output = Vec::new();

        renderer.render(snapshot, format, &mut output).unwrap();

        String::from_utf8(output).unwrap()
    }

    #[test]
    fn text_page() {
        let docs = vec![doc(1), doc(2)];
        let snapshot = ViewSnapshot::new(&PageQuery::default(), &docs);
        let text = render(&snapshot, Format::Text);

        let expected = "\
Document List
Showing 2 documents
Showing 0 to 2 documents
[Previous] [Next]

  Document 1
  2023-01-01T00:00:00
  https://example.com/doc/1
  Author: Author 1
  Concepts: alpha, beta

  Document 2
  2023-01-02T00:00:00
  https://example.com/doc/2
  Author: Author 2
  Concepts: alpha, beta
";

        assert_eq!(text, expected);
    }

    #[test]
    fn text_range_ignores_returned_count() {
        let docs = vec![doc(9)];
        let snapshot = ViewSnapshot::new(&PageQuery::new(8, 4), &docs);
        let text = render(&snapshot, Format::Text);

        assert!(text.contains("Showing 1 documents\n"));
        assert!(text.contains("Showing 8 to 12 documents\n"));
    }

    #[test]
    fn text_empty_page() {
        let docs: Vec<Document> = Vec::new();
        let snapshot = ViewSnapshot::new(&PageQuery::default(), &docs);
        let text = render(&snapshot, Format::Text);

        assert_eq!(
            text,
            "Document List\nShowing 0 documents\nShowing 0 to 2 documents\n[Previous] [Next]\n"
        );
    }

    #[test]
    fn html_lists_each_document_by_id() {
        let docs = vec![doc(1), doc(2)];
        let snapshot = ViewSnapshot::new(&PageQuery::default(), &docs);
        let html = render(&snapshot, Format::Html);

        assert_eq!(html.matches("<li ").count(), 2);
        assert!(html.contains(r#"<li data-doc-id="1">"#));
        assert!(html.contains(r#"<li data-doc-id="2">"#));
        assert!(html.contains("<h1>Document List</h1>"));
        assert!(html.contains("<p>Showing 2 documents</p>"));
        assert!(html.contains("<p>Showing 0 to 2 documents</p>"));
        assert!(html.contains("<button>Previous</button>"));
        assert!(html.contains("<button>Next</button>"));
        assert!(html.contains(
            r#"<a href="https://example.com/doc/1">https://example.com/doc/1</a>"#
        ));
        assert!(html.contains("<p>Author: Author 2</p>"));
        assert!(html.contains("<p>Concepts: alpha, beta</p>"));
    }

    #[test]
    fn html_empty_page() {
        let docs: Vec<Document> = Vec::new();
        let snapshot = ViewSnapshot::new(&PageQuery::default(), &docs);
        let html = render(&snapshot, Format::Html);

        assert!(html.contains("<p>Showing 0 documents</p>"));
        assert!(!html.contains("<li"));
    }

    #[test]
    fn html_escapes_values() {
        let mut bad = doc(3);
        bad.title = String::from("<script>alert(1)</script>");
        let docs = vec![bad];
        let snapshot = ViewSnapshot::new(&PageQuery::default(), &docs);
        let html = render(&snapshot, Format::Html);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn json_snapshot() {
        let docs = vec![doc(1)];
        let snapshot = ViewSnapshot::new(&PageQuery::new(-2, 2), &docs);
        let json = render(&snapshot, Format::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["count"], 1);
        assert_eq!(value["skip"], -2);
        assert_eq!(value["end"], 0);
        assert_eq!(value["limit"], 2);
        assert_eq!(value["documents"][0]["doc_id"], 1);
    }
}
