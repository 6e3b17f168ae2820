use ego_tree::NodeRef;
use scraper::{ElementRef, Node};
use std::ops::Deref;

/// A node in an owned markup tree.
///
/// The scraper DOM is read-only once parsed, so the content region is
/// copied into this tree before any cleanup pass mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Markup>,
}

/// What a cleanup pass wants done with an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Keep,
    /// Replace the element with its children.
    Unwrap,
    /// Drop the element and everything under it.
    Remove,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: Markup) -> Self {
        self.children.push(child);
        self
    }

    /// Copy an element subtree out of a parsed scraper document.
    pub fn from_scraper(element: ElementRef<'_>) -> Self {
        let value = element.value();
        Self {
            name: value.name().to_string(),
            attrs: value
                .attrs()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            children: element.children().filter_map(convert_node).collect(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Apply `decide` to every descendant element (never to `self`),
    /// children before parents, and unwrap or remove as instructed.
    pub fn rewrite_descendants<F>(&mut self, decide: &mut F)
    where
        F: FnMut(&mut Element) -> Action,
    {
        let children = std::mem::take(&mut self.children);
        for child in children {
            match child {
                Markup::Element(mut element) => {
                    element.rewrite_descendants(decide);
                    match decide(&mut element) {
                        Action::Keep => self.children.push(Markup::Element(element)),
                        Action::Unwrap => self.children.extend(element.children),
                        Action::Remove => {}
                    }
                }
                other => self.children.push(other),
            }
        }
    }

    /// Drop every comment node in the subtree.
    pub fn strip_comments(&mut self) {
        self.children.retain(|c| !matches!(c, Markup::Comment(_)));
        for child in &mut self.children {
            if let Markup::Element(element) = child {
                element.strip_comments();
            }
        }
    }

    /// Concatenated text of the subtree.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    pub fn descendants_named<'a>(&'a self, name: &'a str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        collect_named(self, name, &mut found);
        found
    }
}

fn convert_node(node: NodeRef<'_, Node>) -> Option<Markup> {
    match node.value() {
        Node::Text(text) => Some(Markup::Text(text.deref().to_string())),
        Node::Comment(comment) => Some(Markup::Comment(comment.deref().to_string())),
        Node::Element(_) => ElementRef::wrap(node).map(|e| Markup::Element(Element::from_scraper(e))),
        _ => None,
    }
}

fn collect_text(element: &Element, out: &mut String) {
    for child in &element.children {
        match child {
            Markup::Text(t) => out.push_str(t),
            Markup::Element(e) => collect_text(e, out),
            Markup::Comment(_) => {}
        }
    }
}

fn collect_named<'a>(element: &'a Element, name: &str, found: &mut Vec<&'a Element>) {
    for child in &element.children {
        if let Markup::Element(e) = child {
            if e.is(name) {
                found.push(e);
            }
            collect_named(e, name, found);
        }
    }
}
