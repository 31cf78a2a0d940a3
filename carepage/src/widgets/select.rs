//! Filterable select widget - a text input over a list of clickable items.
//!
//! Focus shows the list, each keystroke filters it by case-insensitive
//! substring, and clicking an item copies its label into the input (and its
//! key into an optional hidden field). Blur hides the list after
//! [`HIDE_DELAY`]: the press on an item blurs the input before the item's
//! click fires, so hiding at once would drop the click.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use pagedom::{Display, Document, Element, EventKind, TimerId};

/// Delay between a blur (or a selection) and the list being hidden.
pub const HIDE_DELAY: Duration = Duration::from_millis(200);

/// Data attribute carrying an item's identifier (`data-pk`).
pub const ITEM_KEY: &str = "pk";

/// One selectable entry: a label shown to the user and an opaque key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub key: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
        }
    }

    /// Render as a list item carrying `item_class` and the key as `data-pk`.
    pub fn to_element(&self, item_class: &str) -> Element {
        Element::li(&self.label)
            .class(item_class)
            .data(ITEM_KEY, &self.key)
    }
}

/// Element IDs the widget binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectConfig {
    pub input_id: String,
    pub list_id: String,
    pub item_class: String,
    pub hidden_id: Option<String>,
}

impl SelectConfig {
    pub fn new(
        input_id: impl Into<String>,
        list_id: impl Into<String>,
        item_class: impl Into<String>,
    ) -> Self {
        Self {
            input_id: input_id.into(),
            list_id: list_id.into(),
            item_class: item_class.into(),
            hidden_id: None,
        }
    }

    /// Mirror the selected item's key into a hidden field.
    pub fn with_hidden(mut self, hidden_id: impl Into<String>) -> Self {
        self.hidden_id = Some(hidden_id.into());
        self
    }
}

/// Whether the list is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectState {
    Collapsed,
    Expanded,
}

/// Case-insensitive substring match of `query` against an item's text.
pub fn label_matches(label: &str, query: &str) -> bool {
    label.to_lowercase().contains(&query.to_lowercase())
}

/// A filterable select bound to elements of a document.
///
/// Cheap to clone: clones share the pending-hide timer, so listeners
/// registered on the document and the caller's handle see the same state.
#[derive(Debug, Clone)]
pub struct FilterableSelect {
    config: Arc<SelectConfig>,
    pending_hide: Arc<Mutex<Option<TimerId>>>,
}

impl FilterableSelect {
    /// Bind the widget to `doc`.
    ///
    /// Returns `None`, registering nothing, when the input or the list does not
    /// exist. Items are looked up once here for click binding; an empty list is
    /// fine.
    pub fn attach(doc: &mut Document, config: SelectConfig) -> Option<Self> {
        if !doc.contains(&config.input_id) || !doc.contains(&config.list_id) {
            log::debug!(
                "FilterableSelect::attach skipped input={} list={}: element missing",
                config.input_id,
                config.list_id
            );
            return None;
        }

        let widget = Self {
            config: Arc::new(config),
            pending_hide: Arc::new(Mutex::new(None)),
        };
        let input_id = widget.config.input_id.clone();

        let this = widget.clone();
        doc.add_listener(
            &input_id,
            EventKind::Focus,
            Arc::new(move |doc, _| this.show_list(doc)),
        );

        let this = widget.clone();
        doc.add_listener(
            &input_id,
            EventKind::Input,
            Arc::new(move |doc, _| this.filter_list(doc)),
        );

        let this = widget.clone();
        doc.add_listener(
            &input_id,
            EventKind::Blur,
            Arc::new(move |doc, _| this.hide_list(doc)),
        );

        let items = widget.items(doc);
        for item_id in &items {
            let this = widget.clone();
            let item = item_id.clone();
            doc.add_listener(
                item_id,
                EventKind::Click,
                Arc::new(move |doc, _| this.select_item(doc, &item)),
            );
        }

        log::debug!(
            "FilterableSelect::attach input={} list={} items={} hidden={:?}",
            widget.config.input_id,
            widget.config.list_id,
            items.len(),
            widget.config.hidden_id
        );

        Some(widget)
    }

    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    /// IDs of the list's items, in document order.
    pub fn items(&self, doc: &Document) -> Vec<String> {
        doc.query_class(&self.config.list_id, &self.config.item_class)
    }

    pub fn state(&self, doc: &Document) -> SelectState {
        match doc.display(&self.config.list_id) {
            Some(Display::Block) => SelectState::Expanded,
            _ => SelectState::Collapsed,
        }
    }

    /// Show the list. Also cancels a hide still waiting on its delay, so a
    /// quick blur/refocus leaves the list open.
    pub fn show_list(&self, doc: &mut Document) {
        self.cancel_pending_hide(doc);
        doc.set_display(&self.config.list_id, Display::Block);
    }

    /// Hide the list once [`HIDE_DELAY`] has elapsed.
    ///
    /// A newer call replaces an older pending hide.
    pub fn hide_list(&self, doc: &mut Document) {
        self.cancel_pending_hide(doc);

        let list_id = self.config.list_id.clone();
        let pending = self.pending_hide.clone();
        let timer = doc.set_timeout(HIDE_DELAY, move |doc| {
            if let Ok(mut guard) = pending.lock() {
                *guard = None;
            }
            doc.set_display(&list_id, Display::None);
        });

        if let Ok(mut guard) = self.pending_hide.lock() {
            *guard = Some(timer);
        }
    }

    /// Show items whose text contains the input's value, hide the others.
    pub fn filter_list(&self, doc: &mut Document) {
        let Some(query) = doc.value(&self.config.input_id) else {
            return;
        };

        for item_id in self.items(doc) {
            let text = doc.text_content(&item_id).unwrap_or_default();
            let display = if label_matches(&text, &query) {
                Display::Unset
            } else {
                Display::None
            };
            doc.set_display(&item_id, display);
        }
    }

    /// Copy the item's label into the input and its key into the hidden field,
    /// then hide the list.
    pub fn select_item(&self, doc: &mut Document, item_id: &str) {
        let Some(label) = doc.text_content(item_id) else {
            return;
        };
        doc.set_value(&self.config.input_id, label.trim());

        if let Some(hidden_id) = &self.config.hidden_id {
            let key = doc.data(item_id, ITEM_KEY).unwrap_or_default();
            doc.set_value(hidden_id, key);
        }

        log::debug!(
            "FilterableSelect::select_item input={} item={}",
            self.config.input_id,
            item_id
        );

        self.hide_list(doc);
    }

    /// The input's current text and the hidden field's key, if configured.
    pub fn selection(&self, doc: &Document) -> (Option<String>, Option<String>) {
        let label = doc.value(&self.config.input_id);
        let key = self
            .config
            .hidden_id
            .as_deref()
            .and_then(|hidden_id| doc.value(hidden_id));
        (label, key)
    }

    fn cancel_pending_hide(&self, doc: &mut Document) {
        if let Ok(mut guard) = self.pending_hide.lock()
            && let Some(timer) = guard.take()
        {
            doc.clear_timeout(timer);
        }
    }
}
