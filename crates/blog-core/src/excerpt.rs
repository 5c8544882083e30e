//! Excerpt derivation: markdown body -> HTML -> plain text -> first 54 characters.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};
use scraper::Html;

/// Length of a derived excerpt, in characters.
pub const EXCERPT_LEN: usize = 54;

/// Optional markdown features layered over CommonMark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    /// Tables, footnotes, definition lists and heading attributes.
    Extra,
    /// Wrap code blocks in a `codehilite` container carrying the language class.
    CodeHighlight,
}

/// Converts lightweight markup into HTML.
pub trait MarkupRenderer: Send + Sync {
    fn render(&self, source: &str) -> String;
}

/// Markdown renderer backed by pulldown-cmark.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    extensions: Vec<Extension>,
}

impl MarkdownRenderer {
    pub fn new(extensions: impl IntoIterator<Item = Extension>) -> Self {
        Self {
            extensions: extensions.into_iter().collect(),
        }
    }

    /// The renderer used for post bodies.
    pub fn blog() -> Self {
        Self::new([Extension::Extra, Extension::CodeHighlight])
    }

    fn has(&self, extension: Extension) -> bool {
        self.extensions.contains(&extension)
    }

    fn options(&self) -> Options {
        let mut options = Options::empty();
        if self.has(Extension::Extra) {
            options.insert(Options::ENABLE_TABLES);
            options.insert(Options::ENABLE_FOOTNOTES);
            options.insert(Options::ENABLE_DEFINITION_LIST);
            options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        }
        options
    }
}

impl MarkupRenderer for MarkdownRenderer {
    fn render(&self, source: &str) -> String {
        let parser = Parser::new_ext(source, self.options());
        let highlight = self.has(Extension::CodeHighlight);

        let events = parser.flat_map(|event| {
            let mut out = Vec::with_capacity(2);
            match event {
                Event::Start(Tag::CodeBlock(kind)) if highlight => {
                    out.push(Event::Html(CowStr::Borrowed("<div class=\"codehilite\">")));
                    out.push(Event::Start(Tag::CodeBlock(kind)));
                }
                Event::End(TagEnd::CodeBlock) if highlight => {
                    out.push(Event::End(TagEnd::CodeBlock));
                    out.push(Event::Html(CowStr::Borrowed("</div>\n")));
                }
                other => out.push(other),
            }
            out
        });

        let mut output = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut output, events);
        output.trim().to_string()
    }
}

/// Text content of an HTML fragment.
///
/// The fragment goes through the HTML5 tokenizer, so quoted `>` inside
/// attributes, comments (closed or not) and character references all resolve
/// the way a browser would.
pub fn strip_tags(html: &str) -> String {
    Html::parse_fragment(html).root_element().text().collect()
}

/// Keep the first `max` characters. No word-boundary handling.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Build the plain-text excerpt for a markdown `body`.
pub fn derive_excerpt(renderer: &dyn MarkupRenderer, body: &str) -> String {
    let rendered = renderer.render(body);
    truncate_chars(strip_tags(&rendered).trim(), EXCERPT_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn excerpt(body: &str) -> String {
        derive_excerpt(&MarkdownRenderer::blog(), body)
    }

    #[test]
    fn test_heading_and_emphasis_are_stripped() {
        assert_eq!(
            excerpt("# Hello\n\nThis is **markdown**."),
            "Hello\nThis is markdown."
        );
    }

    #[test]
    fn test_empty_body_gives_empty_excerpt() {
        assert_eq!(excerpt(""), "");
    }

    #[test]
    fn test_cut_at_54_characters_mid_word() {
        let body = "abcdefghi ".repeat(10);
        let result = excerpt(&body);
        assert_eq!(result.chars().count(), EXCERPT_LEN);
        assert!(result.ends_with("abcdefghi abcd"));
    }

    #[test]
    fn test_multibyte_characters_are_counted_not_bytes() {
        let body = "文".repeat(80);
        let result = excerpt(&body);
        assert_eq!(result, "文".repeat(EXCERPT_LEN));
    }

    #[test]
    fn test_code_highlight_wrapper() {
        let html = MarkdownRenderer::blog().render("```rust\nfn main() {}\n```");
        assert!(html.starts_with("<div class=\"codehilite\">"));
        assert!(html.contains("<code class=\"language-rust\">"));
        assert!(html.ends_with("</div>"));
        assert_eq!(strip_tags(&html).trim(), "fn main() {}");
    }

    #[test]
    fn test_extra_enables_tables() {
        let source = "| a | b |\n|---|---|\n| 1 | 2 |";
        assert!(MarkdownRenderer::blog().render(source).contains("<table>"));
        assert!(!MarkdownRenderer::default().render(source).contains("<table>"));
    }

    #[test]
    fn test_entities_are_decoded() {
        assert_eq!(strip_tags("<p>a &amp; b &lt;c&gt;</p>"), "a & b <c>");
    }

    #[test]
    fn test_html_comments_are_removed() {
        assert_eq!(strip_tags("<!-- note -->text"), "text");
    }

    #[test]
    fn test_quoted_angle_bracket_in_raw_html_attribute() {
        assert_eq!(excerpt("<p title=\"a>b\">Hi</p>"), "Hi");
    }

    #[test]
    fn test_unterminated_comment_hides_the_rest() {
        assert_eq!(excerpt("Intro\n\n<!-- draft note\n\nMore"), "Intro");
    }

    #[test]
    fn test_extra_enables_definition_lists() {
        let source = "Term\n: Definition";
        assert!(MarkdownRenderer::blog().render(source).contains("<dl>"));
        assert!(!MarkdownRenderer::default().render(source).contains("<dl>"));

        let result = excerpt(source);
        assert!(result.starts_with("Term"));
        assert!(result.ends_with("Definition"));
        assert!(!result.contains(':'));
    }
}
