//! Typed query interface over the parsed document
//!
//! The inliners never touch `kuchiki` directly beyond the types re-exported
//! here. `Document` owns the tree and answers selector queries; `ElementExt`
//! gives each selected element the handful of mutations inlining needs
//! (attributes, raw text, replace, remove).

pub mod comments;
pub mod whitespace;

use kuchiki::traits::TendrilSink;
use kuchiki::{ElementData, NodeDataRef, NodeRef};

pub use comments::strip_comments;
pub use whitespace::{collapse_whitespace, protect_preformatted};

use crate::error::{InlineError, InlineResult};
use crate::utils::HTML_DOCTYPE;

/// An element node selected from the document
pub type Element = NodeDataRef<ElementData>;

/// The in-memory page for one inlining run
pub struct Document {
    root: NodeRef,
}

impl Document {
    /// Parse an HTML document
    pub fn parse(html: &str) -> InlineResult<Self> {
        let root = kuchiki::parse_html()
            .from_utf8()
            .read_from(&mut html.as_bytes())
            .map_err(|e| InlineError::Parse(e.to_string()))?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &NodeRef {
        &self.root
    }

    /// Select every element matching `selector`, in document order
    ///
    /// Results are collected up front so callers can detach or replace nodes
    /// while walking them.
    pub fn select(&self, selector: &str) -> InlineResult<Vec<Element>> {
        Ok(self
            .root
            .select(selector)
            .map_err(|()| InlineError::Parse(format!("invalid selector '{selector}'")))?
            .collect())
    }

    /// Serialize the document, always starting with `<!DOCTYPE html>`
    ///
    /// Any doctype node from the source is skipped so the output never carries
    /// two of them.
    pub fn to_html(&self) -> InlineResult<String> {
        let mut html_output = HTML_DOCTYPE.as_bytes().to_vec();
        for child in self.root.children() {
            if child.as_doctype().is_none() {
                child.serialize(&mut html_output)?;
            }
        }

        String::from_utf8(html_output)
            .map_err(|e| InlineError::Parse(format!("serialized HTML is not UTF-8: {e}")))
    }
}

/// Mutations and reads used by the inliners
pub trait ElementExt {
    /// Local tag name, lowercase
    fn tag(&self) -> &str;
    fn attr(&self, name: &str) -> Option<String>;
    fn set_attr(&self, name: &str, value: String);
    fn remove_attr(&self, name: &str) -> bool;
    /// Value of the first text child, exactly as parsed (no entity escaping)
    fn raw_text(&self) -> Option<String>;
    /// Concatenated text of all descendants
    fn text(&self) -> String;
    /// Replace all children with a single text node
    fn set_text(&self, text: &str);
    /// Put `replacement` where this element is and detach this element
    fn replace_with(&self, replacement: NodeRef);
    fn remove(&self);
}

impl ElementExt for Element {
    fn tag(&self) -> &str {
        &self.name.local
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).map(str::to_string)
    }

    fn set_attr(&self, name: &str, value: String) {
        self.attributes.borrow_mut().insert(name, value);
    }

    fn remove_attr(&self, name: &str) -> bool {
        self.attributes.borrow_mut().remove(name).is_some()
    }

    fn raw_text(&self) -> Option<String> {
        let first = self.as_node().first_child()?;
        let text = first.as_text()?.borrow().clone();
        Some(text)
    }

    fn text(&self) -> String {
        self.as_node().text_contents()
    }

    fn set_text(&self, text: &str) {
        let node = self.as_node();

        // Collect before detaching; detaching invalidates the sibling iterator
        let children: Vec<_> = node.children().collect();
        for child in children {
            child.detach();
        }

        node.append(NodeRef::new_text(text));
    }

    fn replace_with(&self, replacement: NodeRef) {
        let node = self.as_node();
        node.insert_before(replacement);
        node.detach();
    }

    fn remove(&self) {
        self.as_node().detach();
    }
}

/// Build a detached `<style>` element holding `css`
pub fn new_style_element(css: &str) -> InlineResult<NodeRef> {
    let scratch = kuchiki::parse_html().one("<style></style>");
    let style = scratch
        .select_first("style")
        .map_err(|()| InlineError::Parse("failed to create <style> element".to_string()))?;

    style.set_text(css);

    let node = style.as_node().clone();
    node.detach();
    Ok(node)
}
