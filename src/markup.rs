//!
//! Minimal page model the role UI operates on.
//!
//! A page is a flat list of elements, each with an optional id, classes, attributes,
//! text, an optional link target, a visibility flag and the actions wired to it.
//! Selectors cover what the clinic markup uses: `#id`, `.class`, `[attr]` and
//! `[attr=value]`.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::SelectorError;

/// Something that happens when an element is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Logout,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub text: String,
    pub href: Option<String>,
    pub hidden: bool,
    actions: Vec<Action>,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_href(mut self, href: &str) -> Self {
        self.href = Some(href.to_string());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Wires an action; an action already wired is not added twice.
    pub fn on_click(&mut self, action: Action) -> bool {
        if self.actions.contains(&action) {
            return false;
        }
        self.actions.push(action);
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Class(String),
    Attribute { name: String, value: Option<String> },
}

impl Selector {
    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Selector::Id(id) => element.id.as_deref() == Some(id.as_str()),
            Selector::Class(class) => element.has_class(class),
            Selector::Attribute { name, value: None } => element.attributes.contains_key(name),
            Selector::Attribute { name, value: Some(value) } => element.attr(name) == Some(value.as_str()),
        }
    }
}

fn is_ident(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let s = raw.trim();
        let err = || SelectorError(raw.to_string());
        if let Some(id) = s.strip_prefix('#') {
            return is_ident(id).then(|| Selector::Id(id.to_string())).ok_or_else(err);
        }
        if let Some(class) = s.strip_prefix('.') {
            return is_ident(class).then(|| Selector::Class(class.to_string())).ok_or_else(err);
        }
        if let Some(inner) = s.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            let (name, value) = match inner.split_once('=') {
                Some((name, value)) => {
                    let value = value.trim().trim_matches(|c: char| c == '"' || c == '\'');
                    (name.trim(), Some(value.to_string()))
                }
                None => (inner.trim(), None),
            };
            return is_ident(name)
                .then(|| Selector::Attribute { name: name.to_string(), value })
                .ok_or_else(err);
        }
        Err(err())
    }
}

/// The structure of one loaded page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMarkup {
    elements: Vec<Element>,
}

impl PageMarkup {
    pub fn new(elements: Vec<Element>) -> Self {
        PageMarkup { elements }
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn select<'a>(&'a self, selector: &'a Selector) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements.iter().filter(move |e| selector.matches(e))
    }

    pub fn select_mut<'a>(&'a mut self, selector: &'a Selector) -> impl Iterator<Item = &'a mut Element> + 'a {
        self.elements.iter_mut().filter(move |e| selector.matches(e))
    }

    pub fn first(&self, selector: &Selector) -> Option<&Element> {
        self.elements.iter().find(|e| selector.matches(e))
    }

    pub fn first_mut(&mut self, selector: &Selector) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| selector.matches(e))
    }

    pub fn by_id(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id.as_deref() == Some(id))
    }

    /// Actions fired by clicking the first element matching `selector`.
    pub fn click(&self, selector: &Selector) -> Vec<Action> {
        self.first(selector).map(|e| e.actions.clone()).unwrap_or_default()
    }
}
