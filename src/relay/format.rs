//! Convert message bodies into Zoom's native markup.
//!
//! Zoom Team Chat understands a Markdown-like syntax, so `markdown` passes
//! through untouched. `plain` strips emphasis characters and `html` is
//! degraded to the native markup.

use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

/// The format a caller's message is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Markdown,
    Plain,
    Html,
}

impl FromStr for Format {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markdown" => Ok(Format::Markdown),
            "plain" => Ok(Format::Plain),
            "html" => Ok(Format::Html),
            _ => Err(()),
        }
    }
}

/// Characters which Zoom would otherwise render as emphasis.
const MARKUP_CHARS: [char; 4] = ['*', '_', '`', '~'];

/// Conversions from HTML, applied in order. Anything left over is dropped by
/// [ANY_TAG].
// These unwraps are exercised by every test below.
static HTML_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)<br\s*/?>", "\n"),
        (r"(?i)</?p(?:\s[^>]*)?>", "\n"),
        (r"(?i)</?(?:strong|b)(?:\s[^>]*)?>", "*"),
        (r"(?i)</?(?:em|i)(?:\s[^>]*)?>", "_"),
        (r"(?i)</?code(?:\s[^>]*)?>", "`"),
    ]
    .into_iter()
    .map(|(re, rep)| (Regex::new(re).unwrap(), rep))
    .collect()
});

static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Render a message body for Zoom according to its declared format.
pub fn render(message: &str, format: Format) -> String {
    match format {
        Format::Markdown => message.to_owned(),
        Format::Plain => strip_markup(message),
        Format::Html => html_to_markup(message),
    }
}

/// Remove emphasis characters, leaving everything else in place.
///
/// ```
/// assert_eq!(strip_markup("**Bold** text"), "Bold text");
/// ```
fn strip_markup(message: &str) -> String {
    message.chars().filter(|c| !MARKUP_CHARS.contains(c)).collect()
}

/// Convert the supported subset of HTML, deleting any other tags but keeping
/// their content.
fn html_to_markup(message: &str) -> String {
    let converted = HTML_RULES
        .iter()
        .fold(message.to_owned(), |acc, (re, rep)| {
            re.replace_all(&acc, *rep).into_owned()
        });

    ANY_TAG.replace_all(&converted, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    #[test]
    fn test_markdown_passthrough() {
        let x = "*Bold* _italic_ `code` ~strike~ <b>raw</b>";
        assert_eq!(render(x, Format::Markdown), x);
    }

    #[test]
    fn test_plain() {
        assert_eq!(render("**Bold** text", Format::Plain), "Bold text");
        assert_eq!(
            render("_a_ `b` ~c~ #d [e](f) <g>", Format::Plain),
            "a b c #d [e](f) <g>"
        );
    }

    #[test]
    fn test_html_emphasis() {
        assert_eq!(
            render(
                "<strong>Bold</strong> and <em>italic</em> text",
                Format::Html
            ),
            "*Bold* and _italic_ text"
        );
        assert_eq!(
            render("<b>B</b> <i>I</i> <code>x = 1</code>", Format::Html),
            "*B* _I_ `x = 1`"
        );
    }

    #[test]
    fn test_html_breaks() {
        assert_eq!(
            render("one<br>two<br/>three<BR />four", Format::Html),
            "one\ntwo\nthree\nfour"
        );
        assert_eq!(
            render("<p>First</p><p class=\"x\">Second</p>", Format::Html),
            "\nFirst\n\nSecond\n"
        );
    }

    #[test]
    fn test_html_unknown_tags_keep_content() {
        assert_eq!(
            render(
                r#"<div>See <a href="https://example.com">this</a></div>"#,
                Format::Html
            ),
            "See this"
        );
        assert_eq!(
            render("<span><strong>Nested</strong></span>", Format::Html),
            "*Nested*"
        );
    }

    #[test]
    fn test_html_overlapping_tags_degrade() {
        assert_eq!(
            render("<b><i>both</b></i>", Format::Html),
            "*_both*_"
        );
        assert_eq!(render("unclosed <b>bold", Format::Html), "unclosed *bold");
    }

    #[test]
    fn test_html_similar_tag_names_are_dropped() {
        assert_eq!(
            render("<body><pre>x</pre><img src=\"y\"></body>", Format::Html),
            "x"
        );
    }

    quickcheck! {
        fn test_plain_strips_exactly_markup(x: String) -> bool {
            let expected: String = x
                .chars()
                .filter(|c| !['*', '_', '`', '~'].contains(c))
                .collect();

            render(&x, Format::Plain) == expected
        }

        fn test_markdown_is_identity(x: String) -> bool {
            render(&x, Format::Markdown) == x
        }

        fn test_html_leaves_no_tags(x: String) -> bool {
            !ANY_TAG.is_match(&render(&x, Format::Html))
        }
    }
}
