//! Page descriptions: an element tree plus the controller to attach to it.

use std::collections::HashMap;

use carepage::PageConfig;
use carepage::widgets::SelectConfig;
use pagedom::{Display, Element};
use serde::Deserialize;

use crate::error::CliError;

/// Which controller wires the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    ResidentFile,
    DailyRecap,
    /// No controller; only the listed selects are attached.
    #[default]
    Plain,
}

impl PageKind {
    pub fn name(&self) -> &'static str {
        match self {
            PageKind::ResidentFile => "resident_file",
            PageKind::DailyRecap => "daily_recap",
            PageKind::Plain => "plain",
        }
    }
}

/// A filterable select to attach on any page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectSpec {
    pub input: String,
    pub list: String,
    pub item_class: String,
    #[serde(default)]
    pub hidden: Option<String>,
}

impl From<&SelectSpec> for SelectConfig {
    fn from(spec: &SelectSpec) -> Self {
        let config = SelectConfig::new(&spec.input, &spec.list, &spec.item_class);
        match &spec.hidden {
            Some(hidden) => config.with_hidden(hidden),
            None => config,
        }
    }
}

/// One element of the tree, as written in the page file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NodeSpec {
    pub tag: String,
    pub id: Option<String>,
    pub class: Vec<String>,
    pub text: Option<String>,
    pub markup: Option<String>,
    pub value: Option<String>,
    pub checked: bool,
    pub data: HashMap<String, String>,
    pub attrs: HashMap<String, String>,
    /// CSS keyword: `none`, `block`, `flex`, or empty.
    pub display: Option<String>,
    pub style: HashMap<String, String>,
    pub children: Vec<NodeSpec>,
}

impl Default for NodeSpec {
    fn default() -> Self {
        Self {
            tag: "div".to_string(),
            id: None,
            class: Vec::new(),
            text: None,
            markup: None,
            value: None,
            checked: false,
            data: HashMap::new(),
            attrs: HashMap::new(),
            display: None,
            style: HashMap::new(),
            children: Vec::new(),
        }
    }
}

impl NodeSpec {
    /// Build the element. Children win over `markup`, which wins over `text`.
    pub fn into_element(self) -> Element {
        let mut element = Element::new(self.tag).checked(self.checked);
        if let Some(id) = self.id {
            element = element.id(id);
        }
        for class in self.class {
            element = element.class(class);
        }
        if let Some(text) = self.text {
            element = element.text(text);
        }
        if let Some(markup) = self.markup {
            element = element.markup(markup);
        }
        if let Some(value) = self.value {
            element = element.value(value);
        }
        for (key, value) in self.data {
            element = element.data(key, value);
        }
        for (key, value) in self.attrs {
            element = element.attr(key, value);
        }
        if let Some(display) = self.display {
            element = element.display(Display::from_css(&display));
        }
        for (property, value) in self.style {
            element = element.style(property, value);
        }
        if !self.children.is_empty() {
            element = element.children(self.children.into_iter().map(NodeSpec::into_element));
        }
        element
    }
}

/// A page file.
#[derive(Debug, Clone, Deserialize)]
pub struct PageFile {
    #[serde(default)]
    pub kind: PageKind,
    #[serde(default)]
    pub config: PageConfig,
    /// Reference date for the planning filter, `YYYY-MM-DD`. Defaults to today.
    #[serde(default)]
    pub today: Option<String>,
    #[serde(default)]
    pub selects: Vec<SelectSpec>,
    pub root: NodeSpec,
}

impl PageFile {
    pub fn from_json(raw: &str) -> Result<Self, CliError> {
        serde_json::from_str(raw).map_err(CliError::PageFile)
    }
}
