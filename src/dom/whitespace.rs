//! Whitespace collapsing for the serialized document
//!
//! Text inside `<pre>` and `<textarea>` is protected by swapping its
//! whitespace for placeholders before serialization; `collapse_whitespace`
//! then squeezes every whitespace run in the HTML to one space and puts the
//! protected characters back.
//!
//! Limitation: literal placeholder text already present in the page is
//! turned into whitespace as well.

use kuchiki::NodeRef;
use regex::Regex;
use std::sync::LazyLock;

const NEWLINE: &str = "~~nl~~";
const CARRIAGE_RETURN: &str = "~~cr~~";
const TAB: &str = "~~tab~~";
const SPACE: &str = "~~s~~";

/// HTML whitespace only; U+00A0 and friends are content
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[ \t\r\n\x0C]+").expect("BUG: hardcoded whitespace regex is invalid")
});

/// Swap whitespace in `<pre>`/`<textarea>` text for placeholders
///
/// Returns the number of text nodes rewritten.
pub fn protect_preformatted(root: &NodeRef) -> usize {
    let Ok(blocks) = root.select("pre, textarea") else {
        return 0;
    };

    let mut protected = 0;
    for block in blocks {
        for node in block.as_node().descendants() {
            if let Some(text) = node.as_text() {
                let mut text = text.borrow_mut();
                if text.contains(|c: char| c.is_ascii_whitespace()) {
                    let swapped = protect(&text);
                    *text = swapped;
                    protected += 1;
                }
            }
        }
    }
    protected
}

fn protect(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for c in text.chars() {
        match c {
            '\n' => out.push_str(NEWLINE),
            '\r' => out.push_str(CARRIAGE_RETURN),
            '\t' => out.push_str(TAB),
            ' ' => out.push_str(SPACE),
            other => out.push(other),
        }
    }
    out
}

/// Collapse whitespace runs to a single space and restore protected text
#[must_use]
pub fn collapse_whitespace(html: &str) -> String {
    WHITESPACE_RUN
        .replace_all(html, " ")
        .replace(NEWLINE, "\n")
        .replace(CARRIAGE_RETURN, "\r")
        .replace(TAB, "\t")
        .replace(SPACE, " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn runs_collapse_to_one_space() {
        assert_eq!(
            collapse_whitespace("<p>\n  a \t b\n</p>\n\n<p>c</p>"),
            "<p> a b </p> <p>c</p>"
        );
    }

    #[test]
    fn non_breaking_spaces_are_content() {
        assert_eq!(collapse_whitespace("a\u{a0}\u{a0}b"), "a\u{a0}\u{a0}b");
    }

    #[test]
    fn pre_and_textarea_keep_their_whitespace() {
        let doc = Document::parse(
            "<body>\n  <pre>line 1\n    line 2</pre>\n  <textarea>a  b\n\tc</textarea>\n</body>",
        )
        .unwrap();

        assert_eq!(protect_preformatted(doc.root()), 2);
        let html = collapse_whitespace(&doc.to_html().unwrap());

        assert!(html.contains("<pre>line 1\n    line 2</pre>"));
        assert!(html.contains("<textarea>a  b\n\tc</textarea>"));
        assert!(html.contains("<body> <pre>"));
    }
}
