//! View-node tree.
//!
//! Renderers build a small tree of [`Node`]s instead of formatting markup
//! strings. The tree can be inspected in tests, serialized with
//! [`Node::to_html`], or mounted into the live document by the web layer.
//!
//! ```
//! use firewatch::view::{el, text};
//!
//! let node = el("p").class("hint").push(text("a < b"));
//! assert_eq!(node.to_html(), r#"<p class="hint">a &lt; b</p>"#);
//! ```

use std::fmt::Write as _;

/// Elements that never have children or a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "source"];

/// A node in the view tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An element with attributes and children
    Element(ElementNode),
    /// A text node (escaped on serialization)
    Text(String),
}

/// An element node, built with the chaining methods below.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementNode {
    /// Tag name
    pub tag: &'static str,
    /// Class list, in insertion order
    pub classes: Vec<String>,
    /// Attributes other than `class` and `style`
    pub attrs: Vec<(String, String)>,
    /// Inline style declarations
    pub style: Vec<(String, String)>,
    /// Child nodes
    pub children: Vec<Node>,
}

/// Create an element node with the given tag.
pub fn el(tag: &'static str) -> ElementNode {
    ElementNode {
        tag,
        ..Default::default()
    }
}

/// Create a text node.
pub fn text(content: impl Into<String>) -> Node {
    Node::Text(content.into())
}

impl ElementNode {
    /// Add a class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set the `id` attribute.
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Set an attribute, replacing an earlier value with the same name.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    /// Add an inline style declaration.
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.push((property.into(), value.into()));
        self
    }

    /// Append a child node.
    pub fn push(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append a child only when `child` is `Some`.
    pub fn push_maybe(self, child: Option<impl Into<Node>>) -> Self {
        match child {
            Some(child) => self.push(child),
            None => self,
        }
    }

    /// Append every node from an iterator.
    pub fn extend<N: Into<Node>>(mut self, children: impl IntoIterator<Item = N>) -> Self {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Whether the element carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Look up an attribute value.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Look up an inline style value.
    pub fn get_style(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// The `style` attribute value, or `None` if there are no declarations.
    pub fn style_text(&self) -> Option<String> {
        if self.style.is_empty() {
            return None;
        }
        let decls: Vec<String> = self
            .style
            .iter()
            .map(|(p, v)| format!("{p}: {v};"))
            .collect();
        Some(decls.join(" "))
    }

    /// Whether this tag is written without a closing tag.
    pub fn is_void(&self) -> bool {
        VOID_TAGS.contains(&self.tag)
    }

    /// Serialize to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&self.classes.join(" ")));
        }
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        if let Some(style) = self.style_text() {
            let _ = write!(out, " style=\"{}\"", escape(&style));
        }
        out.push('>');
        if self.is_void() {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

impl Node {
    /// Serialize to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(element) => element.write_html(out),
            Node::Text(content) => out.push_str(&escape(content)),
        }
    }

    /// The element, if this is an element node.
    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(content) => out.push_str(content),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// All elements in the subtree (including this one) for which `pred` holds,
    /// in document order.
    pub fn find_all(&self, pred: impl Fn(&ElementNode) -> bool) -> Vec<&ElementNode> {
        let mut found = Vec::new();
        self.walk(&pred, &mut found);
        found
    }

    fn walk<'a>(&'a self, pred: &impl Fn(&ElementNode) -> bool, found: &mut Vec<&'a ElementNode>) {
        if let Node::Element(element) = self {
            if pred(element) {
                found.push(element);
            }
            for child in &element.children {
                child.walk(pred, found);
            }
        }
    }

    /// All elements carrying `class`.
    pub fn find_by_class(&self, class: &str) -> Vec<&ElementNode> {
        self.find_all(|e| e.has_class(class))
    }

    /// All elements with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Vec<&ElementNode> {
        self.find_all(|e| e.tag == tag)
    }
}

impl From<ElementNode> for Node {
    fn from(element: ElementNode) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(content: &str) -> Self {
        Node::Text(content.to_string())
    }
}

impl From<String> for Node {
    fn from(content: String) -> Self {
        Node::Text(content)
    }
}

/// Escape text for use in HTML content or a double-quoted attribute.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
