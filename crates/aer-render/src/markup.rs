use std::fmt::Write as _;

/// A child of an [`Element`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

/// A minimal XML element tree.
///
/// Just enough DOM to assemble the scene and page documents: named
/// elements, ordered attributes, child elements / text / comments, and
/// a pretty-printer. Attribute order is insertion order, so output is
/// deterministic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing any existing value for the name.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(existing) = self.attrs.iter_mut().find(|(n, _)| *n == name) {
            existing.1 = value;
        } else {
            self.attrs.push((name, value));
        }
    }

    /// Builder-style [`set_attr`](Self::set_attr).
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Builder-style [`push`](Self::push).
    #[must_use]
    pub fn child(mut self, child: Element) -> Self {
        self.push(child);
        self
    }

    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    pub fn push_comment(&mut self, text: impl Into<String>) {
        self.children.push(Node::Comment(text.into()));
    }

    /// Pretty-print as a complete document with an XML declaration.
    #[must_use]
    pub fn to_document_string(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\"?>\n");
        self.write_into(&mut out, 0);
        out
    }

    /// Pretty-print this element as a fragment.
    #[must_use]
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_into(&mut out, 0);
        out
    }

    fn write_into(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{indent}<{}", self.name);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {name}=\"{}\"", escape(value));
        }

        if self.children.is_empty() {
            out.push_str("/>\n");
            return;
        }

        // A single text child stays on one line.
        if let [Node::Text(text)] = self.children.as_slice() {
            let _ = writeln!(out, ">{}</{}>", escape(text), self.name);
            return;
        }

        out.push_str(">\n");
        for child in &self.children {
            match child {
                Node::Element(elem) => elem.write_into(out, depth + 1),
                Node::Text(text) => {
                    let _ = writeln!(out, "{indent}  {}", escape(text));
                }
                Node::Comment(text) => {
                    let _ = writeln!(out, "{indent}  <!-- {text} -->");
                }
            }
        }
        let _ = writeln!(out, "{indent}</{}>", self.name);
    }
}

/// Escape markup-significant characters for text and attribute values.
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
