use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;
use crate::types::Display;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

#[derive(Debug, Clone)]
pub struct Element {
    // Identity
    pub id: String,
    pub tag: String,
    pub classes: Vec<String>,

    // Content
    pub content: Content,

    // Form state
    /// Current value of an input, select or hidden field.
    pub value: Option<String>,
    pub checked: bool,

    // Attributes
    /// `data-*` attributes, keyed without the `data-` prefix.
    pub data: HashMap<String, String>,
    /// Any other attribute (`type`, `src`, `srcdoc`, ...).
    pub attrs: HashMap<String, String>,

    // Inline style
    pub display: Display,
    /// Inline style properties other than `display`.
    pub styles: HashMap<String, String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            id: generate_id(&tag),
            tag,
            classes: Vec::new(),
            content: Content::None,
            value: None,
            checked: false,
            data: HashMap::new(),
            attrs: HashMap::new(),
            display: Display::Unset,
            styles: HashMap::new(),
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn ul() -> Self {
        Self::new("ul")
    }

    pub fn li(text: impl Into<String>) -> Self {
        Self::new("li").text(text)
    }

    pub fn span(text: impl Into<String>) -> Self {
        Self::new("span").text(text)
    }

    /// Create an input element with an initial value.
    pub fn input(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::new("input")
        }
    }

    /// Create a hidden form field.
    pub fn hidden(value: impl Into<String>) -> Self {
        Self::input(value).attr("type", "hidden")
    }

    pub fn checkbox(checked: bool) -> Self {
        Self {
            checked,
            ..Self::new("input").attr("type", "checkbox")
        }
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    // Content
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    pub fn markup(mut self, markup: impl Into<String>) -> Self {
        self.content = Content::Markup(markup.into());
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    // Attributes
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get_data(&self, key: &str) -> Option<&String> {
        self.data.get(key)
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn get_attr(&self, key: &str) -> Option<&String> {
        self.attrs.get(key)
    }

    // Style
    pub fn display(mut self, display: Display) -> Self {
        self.display = display;
        self
    }

    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(property.into(), value.into());
        self
    }

    pub fn get_style(&self, property: &str) -> Option<&String> {
        self.styles.get(property)
    }

    // Classes
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        match &mut self.content {
            Content::Children(children) => children.extend(new_children),
            _ => self.content = Content::Children(new_children.into_iter().collect()),
        }
        self
    }

    /// Concatenated text of this element and all its descendants.
    ///
    /// Markup content contributes its raw string.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match &self.content {
            Content::None => {}
            Content::Text(text) | Content::Markup(text) => out.push_str(text),
            Content::Children(children) => {
                for child in children {
                    child.push_text(out);
                }
            }
        }
    }
}
