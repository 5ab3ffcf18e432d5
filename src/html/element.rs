use std::fmt::{self, Write};

use indexmap::IndexMap;

use super::escape::{escape_attr, escape_text};

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Emitted verbatim; used for script bodies.
    Raw(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attributes: IndexMap<String, String>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.add(child);
        self
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn add(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn add_raw(&mut self, raw: impl Into<String>) {
        self.children.push(Node::Raw(raw.into()));
    }

    /// Append a `tr` and hand it back for filling.
    pub fn add_row(&mut self) -> &mut Element {
        self.push_element(Element::new("tr"))
    }

    /// Append a `td` holding `content` and hand it back for styling.
    pub fn add_cell(&mut self, content: impl Into<Node>) -> &mut Element {
        self.push_element(Element::new("td").with_child(content))
    }

    fn push_element(&mut self, element: Element) -> &mut Element {
        self.children.push(Node::Element(element));
        match self.children.last_mut() {
            Some(Node::Element(element)) => element,
            _ => unreachable!("element was just pushed"),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Depth-first search over descendants (not including `self`).
    pub fn find_all<'a>(&'a self, predicate: &dyn Fn(&Element) -> bool) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_matching(predicate, &mut found);
        found
    }

    pub fn find(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        self.find_all(predicate).into_iter().next()
    }

    fn collect_matching<'a>(
        &'a self,
        predicate: &dyn Fn(&Element) -> bool,
        found: &mut Vec<&'a Element>,
    ) {
        for child in self.child_elements() {
            if predicate(child) {
                found.push(child);
            }
            child.collect_matching(predicate, found);
        }
    }

    pub fn text_content(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            match child {
                Node::Element(element) => text.push_str(&element.text_content()),
                Node::Text(value) | Node::Raw(value) => text.push_str(value),
            }
        }
        text
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    fn write_html(&self, out: &mut impl Write) -> fmt::Result {
        write!(out, "<{}", self.tag)?;
        for (name, value) in &self.attributes {
            write!(out, " {}=\"{}\"", name, escape_attr(value))?;
        }
        if VOID_TAGS.contains(&self.tag.as_str()) {
            return out.write_str(">");
        }
        out.write_str(">")?;
        for child in &self.children {
            match child {
                Node::Element(element) => element.write_html(out)?,
                Node::Text(text) => out.write_str(&escape_text(text))?,
                Node::Raw(raw) => out.write_str(raw)?,
            }
        }
        write!(out, "</{}>", self.tag)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_html(f)
    }
}
