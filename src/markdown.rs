use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref H3_REGEX: Regex = Regex::new(r"(?m)^### (.+)$").unwrap();
    static ref H2_REGEX: Regex = Regex::new(r"(?m)^## (.+)$").unwrap();
    static ref H1_REGEX: Regex = Regex::new(r"(?m)^# (.+)$").unwrap();
    static ref BOLD_REGEX: Regex = Regex::new(r"\*\*(.+?)\*\*").unwrap();
    static ref ITALIC_REGEX: Regex = Regex::new(r"\*(.+?)\*").unwrap();
    static ref LIST_ITEM_REGEX: Regex = Regex::new(r"(?m)^\* (.+)$").unwrap();
    static ref CODE_BLOCK_REGEX: Regex = Regex::new(r"(?s)```(\w+)?\n(.+?)\n```").unwrap();
    static ref INLINE_CODE_REGEX: Regex = Regex::new(r"`([^`]+)`").unwrap();
    static ref IMAGE_REGEX: Regex = Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap();
    static ref LINK_REGEX: Regex = Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap();

    /// Applied in order. Images must come before links, as `![a](b)` also matches a link
    static ref SUBSTITUTIONS: Vec<(&'static Regex, &'static str)> = vec![
        (&*H3_REGEX, "<h3>${1}</h3>"),
        (&*H2_REGEX, "<h2>${1}</h2>"),
        (&*H1_REGEX, "<h1>${1}</h1>"),
        (&*BOLD_REGEX, "<strong>${1}</strong>"),
        (&*ITALIC_REGEX, "<em>${1}</em>"),
        (&*LIST_ITEM_REGEX, "<li>${1}</li>"),
        (&*CODE_BLOCK_REGEX, "<pre><code>${2}</code></pre>"),
        (&*INLINE_CODE_REGEX, "<code>${1}</code>"),
        (&*IMAGE_REGEX, r#"<img src="${2}" alt="${1}" style="max-width:100%;">"#),
        (&*LINK_REGEX, r#"<a href="${2}">${1}</a>"#),
    ];
}

/// Block level tags that are never wrapped in a paragraph
const BLOCK_PREFIXES: [&str; 3] = ["<li>", "<pre>", "<h"];

/// Converts the small markdown subset used by the blog into HTML.
///
/// There is no escaping: raw HTML in the input is kept as it is, and unbalanced
/// markers can produce invalid HTML. List items are not wrapped in `<ul>`.
pub fn markdown_to_html(text: &str) -> String {
    let mut buf = text.to_string();
    for (regex, replacement) in SUBSTITUTIONS.iter() {
        buf = regex.replace_all(&buf, *replacement).into_owned();
    }

    wrap_paragraphs(&buf)
}

fn wrap_paragraphs(text: &str) -> String {
    let paragraphs: Vec<String> = text.split("\n\n")
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(|p| {
            if BLOCK_PREFIXES.iter().any(|prefix| p.starts_with(prefix)) {
                p.to_string()
            } else {
                format!("<p>{}</p>", p)
            }
        })
        .collect();

    paragraphs.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings() {
        assert_eq!(markdown_to_html("# 标题\n\n正文"), "<h1>标题</h1>\n<p>正文</p>");
        assert_eq!(markdown_to_html("## Two\n\n### Three"), "<h2>Two</h2>\n<h3>Three</h3>");
        assert_eq!(markdown_to_html("#NoSpace"), "<p>#NoSpace</p>");
    }

    #[test]
    fn test_emphasis() {
        assert_eq!(markdown_to_html("a **bold** and *italic* word"),
                   "<p>a <strong>bold</strong> and <em>italic</em> word</p>");
    }

    #[test]
    fn test_list_items_have_no_container() {
        assert_eq!(markdown_to_html("* one\n* two"), "<li>one</li>\n<li>two</li>");
    }

    #[test]
    fn test_code() {
        let md = "```rust\nlet x = 1;\nlet y = 2;\n```\n\nuse `cargo` here";
        assert_eq!(markdown_to_html(md),
                   "<pre><code>let x = 1;\nlet y = 2;</code></pre>\n<p>use <code>cargo</code> here</p>");

        let md = "```\nplain\n```";
        assert_eq!(markdown_to_html(md), "<pre><code>plain</code></pre>");
    }

    #[test]
    fn test_images_before_links() {
        let md = "![a cat](cat.png) and [home](https://example.com)";
        assert_eq!(markdown_to_html(md),
                   r#"<p><img src="cat.png" alt="a cat" style="max-width:100%;"> and <a href="https://example.com">home</a></p>"#);

        assert_eq!(markdown_to_html("![](empty.png)"),
                   r#"<p><img src="empty.png" alt="" style="max-width:100%;"></p>"#);
    }

    #[test]
    fn test_plain_text_is_only_wrapped() {
        let text = "First paragraph,\nstill the first.\n\n\n\nSecond one. 中文 (ok)";
        assert_eq!(markdown_to_html(text),
                   "<p>First paragraph,\nstill the first.</p>\n<p>Second one. 中文 (ok)</p>");
    }

    #[test]
    fn test_raw_html_is_not_escaped() {
        assert_eq!(markdown_to_html("<div class=\"x\">a & b</div>"), "<p><div class=\"x\">a & b</div></p>");
        assert_eq!(markdown_to_html("<h4>kept</h4>"), "<h4>kept</h4>");
    }

    #[test]
    fn test_empty() {
        assert_eq!(markdown_to_html(""), "");
        assert_eq!(markdown_to_html("\n\n  \n\n"), "");
    }
}
