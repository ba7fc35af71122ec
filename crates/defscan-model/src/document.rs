//! In-memory document tree consumed by the scanner.
//!
//! The tree is deliberately small: element tags, ordered attributes, text,
//! and comments. Elements carry a [`NodeId`] so that an origin lookup can be
//! keyed by node identity rather than by position.

use serde::Serialize;

/// Identity of an element within one parser session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(u32);

impl NodeId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }
}

/// A single attribute, kept in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) | Node::Comment(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    id: NodeId,
    name: String,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter, mostly for tests and fixtures.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_attribute(name, value);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.push_child(child);
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Tag name as written in the source.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn push_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push(Attribute {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Appends a child. Adjacent text children are merged so that text split
    /// around entity references reads back as one run.
    pub fn push_child(&mut self, child: Node) {
        if let Node::Text(text) = &child
            && let Some(Node::Text(previous)) = self.children.last_mut()
        {
            previous.push_str(text);
            return;
        }
        self.children.push(child);
    }

    /// Attribute names are matched case-sensitively; the first occurrence wins.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Element children in document order, skipping text and comments.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Concatenated direct text content.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            if let Node::Text(text) = child {
                out.push_str(text);
            }
        }
        out
    }

    /// Moves all children out, leaving the element empty.
    pub fn take_children(&mut self) -> Vec<Node> {
        std::mem::take(&mut self.children)
    }
}

/// A parsed document with a single root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn into_root(self) -> Element {
        self.root
    }

    /// Element children of the root, in document order.
    pub fn top_level_elements(&self) -> impl Iterator<Item = &Element> {
        self.root.child_elements()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(id: u32, name: &str) -> Element {
        Element::new(NodeId::new(id), "ThingDef").with_attribute("Name", name)
    }

    #[test]
    fn attribute_lookup_is_case_sensitive_and_first_wins() {
        let element = Element::new(NodeId::new(1), "ThingDef")
            .with_attribute("Name", "Bed")
            .with_attribute("Name", "Other");
        assert_eq!(element.attribute("Name"), Some("Bed"));
        assert_eq!(element.attribute("name"), None);
        assert!(element.has_attribute("Name"));
        assert!(!element.has_attribute("Abstract"));
    }

    #[test]
    fn child_elements_skip_text_and_comments() {
        let root = Element::new(NodeId::new(0), "Defs")
            .with_child(Node::Comment(" furniture ".to_string()))
            .with_child(Node::Element(def(1, "Bed")))
            .with_child(Node::Text("stray".to_string()))
            .with_child(Node::Element(def(2, "Chair")));
        let document = Document::new(root);

        let names: Vec<_> = document
            .top_level_elements()
            .filter_map(|element| element.attribute("Name"))
            .collect();
        assert_eq!(names, vec!["Bed", "Chair"]);
        assert_eq!(document.root().children().len(), 4);
    }

    #[test]
    fn adjacent_text_is_merged() {
        let mut element = Element::new(NodeId::new(0), "label");
        element.push_child(Node::Text("salt ".to_string()));
        element.push_child(Node::Text("&".to_string()));
        element.push_child(Node::Text(" pepper".to_string()));
        assert_eq!(element.children().len(), 1);
        assert_eq!(element.text(), "salt & pepper");
    }

    #[test]
    fn take_children_empties_element() {
        let mut root = Element::new(NodeId::new(0), "Defs").with_child(Node::Element(def(1, "Bed")));
        let children = root.take_children();
        assert_eq!(children.len(), 1);
        assert!(root.children().is_empty());
    }
}
