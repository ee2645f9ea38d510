use crate::markdown::markdown_to_html;

/// How the body text of a post becomes the `body` field of the record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    /// Markdown document converted with `markdown_to_html` (batch publishing)
    MarkdownRendered,
    /// Text typed in the wizard, kept verbatim with line breaks turned into `<br>`
    PlainTextWithBreaks,
}

impl BodyEncoding {
    pub fn encode(&self, body: &str) -> String {
        match self {
            BodyEncoding::MarkdownRendered => markdown_to_html(body),
            BodyEncoding::PlainTextWithBreaks => body.replace('\n', "<br>"),
        }
    }
}
