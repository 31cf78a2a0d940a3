//! The page document: element tree, listeners, focus and timers.
//!
//! Every accessor takes an element ID and tolerates its absence: getters return
//! `None`, setters return `false`. Nothing here panics on a partially rendered page.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::element::{ancestor_ids, collect_descendants, find_element, find_element_mut, Element};
use crate::event::{Event, EventKind};
use crate::focus::FocusState;
use crate::timer::{TimerCallback, TimerId, TimerQueue};
use crate::types::Display;

/// Event listener. Runs synchronously with exclusive access to the document.
pub type Listener = Arc<dyn Fn(&mut Document, &Event) + Send + Sync>;

pub struct Document {
    root: Element,
    focus: FocusState,
    listeners: HashMap<(String, EventKind), Vec<Listener>>,
    timers: TimerQueue,
    clock: Duration,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self {
            root,
            focus: FocusState::new(),
            listeners: HashMap::new(),
            timers: TimerQueue::new(),
            clock: Duration::ZERO,
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    pub fn get(&self, id: &str) -> Option<&Element> {
        find_element(&self.root, id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        find_element_mut(&mut self.root, id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// IDs of descendants of `scope` matching `pred`, in document order.
    /// Empty when `scope` does not exist.
    pub fn query(&self, scope: &str, pred: impl Fn(&Element) -> bool) -> Vec<String> {
        let Some(scope) = self.get(scope) else {
            return Vec::new();
        };
        let mut found = Vec::new();
        collect_descendants(scope, &pred, &mut found);
        found.into_iter().map(|el| el.id.clone()).collect()
    }

    /// IDs of descendants of `scope` carrying `class`.
    pub fn query_class(&self, scope: &str, class: &str) -> Vec<String> {
        self.query(scope, |el| el.has_class(class))
    }

    /// IDs of the direct children of `id`.
    pub fn children_ids(&self, id: &str) -> Vec<String> {
        self.get(id)
            .map(|el| el.content.children().iter().map(|c| c.id.clone()).collect())
            .unwrap_or_default()
    }

    /// Nearest element, starting with `id` itself and walking up, matching `pred`.
    pub fn closest(&self, id: &str, pred: impl Fn(&Element) -> bool) -> Option<String> {
        let element = self.get(id)?;
        if pred(element) {
            return Some(element.id.clone());
        }
        let ancestors = ancestor_ids(&self.root, id)?;
        ancestors
            .iter()
            .rev()
            .filter_map(|ancestor| self.get(ancestor))
            .find(|el| pred(el))
            .map(|el| el.id.clone())
    }

    pub fn is_descendant_of(&self, id: &str, ancestor: &str) -> bool {
        ancestor_ids(&self.root, id)
            .map(|path| path.iter().any(|a| a == ancestor))
            .unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Reading
    // -------------------------------------------------------------------------

    pub fn text_content(&self, id: &str) -> Option<String> {
        self.get(id).map(Element::text_content)
    }

    /// Form value, empty when the element exists but never had a value.
    pub fn value(&self, id: &str) -> Option<String> {
        self.get(id).map(|el| el.value.clone().unwrap_or_default())
    }

    pub fn is_checked(&self, id: &str) -> Option<bool> {
        self.get(id).map(|el| el.checked)
    }

    pub fn display(&self, id: &str) -> Option<Display> {
        self.get(id).map(|el| el.display)
    }

    pub fn data(&self, id: &str, key: &str) -> Option<String> {
        self.get(id).and_then(|el| el.get_data(key).cloned())
    }

    pub fn attr(&self, id: &str, key: &str) -> Option<String> {
        self.get(id).and_then(|el| el.get_attr(key).cloned())
    }

    pub fn style(&self, id: &str, property: &str) -> Option<String> {
        self.get(id).and_then(|el| el.get_style(property).cloned())
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.get(id).is_some_and(|el| el.has_class(class))
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    fn update(&mut self, id: &str, f: impl FnOnce(&mut Element)) -> bool {
        match self.get_mut(id) {
            Some(el) => {
                f(el);
                true
            }
            None => false,
        }
    }

    pub fn set_display(&mut self, id: &str, display: Display) -> bool {
        self.update(id, |el| el.display = display)
    }

    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> bool {
        let value = value.into();
        self.update(id, |el| el.value = Some(value))
    }

    pub fn set_checked(&mut self, id: &str, checked: bool) -> bool {
        self.update(id, |el| el.checked = checked)
    }

    pub fn set_text(&mut self, id: &str, text: impl Into<String>) -> bool {
        let text = text.into();
        self.update(id, |el| el.content = crate::element::Content::Text(text))
    }

    /// Replace the element's content with raw markup (inner HTML).
    pub fn set_markup(&mut self, id: &str, markup: impl Into<String>) -> bool {
        let markup = markup.into();
        self.update(id, |el| el.content = crate::element::Content::Markup(markup))
    }

    pub fn set_attr(&mut self, id: &str, key: &str, value: impl Into<String>) -> bool {
        let value = value.into();
        self.update(id, |el| {
            el.attrs.insert(key.to_string(), value);
        })
    }

    pub fn remove_attr(&mut self, id: &str, key: &str) -> bool {
        self.update(id, |el| {
            el.attrs.remove(key);
        })
    }

    pub fn set_style(&mut self, id: &str, property: &str, value: impl Into<String>) -> bool {
        let value = value.into();
        self.update(id, |el| {
            el.styles.insert(property.to_string(), value);
        })
    }

    pub fn add_class(&mut self, id: &str, class: &str) -> bool {
        self.update(id, |el| el.add_class(class))
    }

    pub fn remove_class(&mut self, id: &str, class: &str) -> bool {
        self.update(id, |el| el.remove_class(class))
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Register a listener. Returns false (and registers nothing) if `id` is absent.
    pub fn add_listener(&mut self, id: &str, kind: EventKind, listener: Listener) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.listeners
            .entry((id.to_string(), kind))
            .or_default()
            .push(listener);
        true
    }

    pub fn listener_count(&self, id: &str, kind: EventKind) -> usize {
        self.listeners
            .get(&(id.to_string(), kind))
            .map_or(0, Vec::len)
    }

    /// Run every listener registered for the event's target and kind, in order.
    pub fn dispatch(&mut self, event: Event) {
        let key = (event.target().to_string(), event.kind());
        let Some(listeners) = self.listeners.get(&key).cloned() else {
            return;
        };
        log::trace!("dispatch {} -> {} ({} listeners)", key.1, key.0, listeners.len());
        for listener in listeners {
            listener(self, &event);
        }
    }

    pub fn focused(&self) -> Option<&str> {
        self.focus.focused()
    }

    /// Move focus to `id`, blurring the previously focused element first.
    pub fn focus(&mut self, id: &str) -> bool {
        if !self.contains(id) {
            return false;
        }
        match self.focus.focus(id) {
            Some(previous) => {
                if let Some(previous) = previous {
                    self.dispatch(Event::Blur { target: previous });
                }
                self.dispatch(Event::Focus {
                    target: id.to_string(),
                });
                true
            }
            None => false,
        }
    }

    /// Clear focus, dispatching `Blur` to the element that had it.
    pub fn blur(&mut self) -> bool {
        match self.focus.blur() {
            Some(previous) => {
                self.dispatch(Event::Blur { target: previous });
                true
            }
            None => false,
        }
    }

    /// Simulate a pointer click.
    ///
    /// As in a browser, the press takes focus away from whatever else held it, so
    /// its `Blur` is dispatched before the `Click`. Clicking an input focuses it.
    /// A checkbox flips and a radio button checks before the `Click`; either
    /// then dispatches `Change` if its state moved.
    pub fn click(&mut self, id: &str) -> bool {
        let Some((tag, kind, checked)) = self.get(id).map(|el| {
            (
                el.tag.clone(),
                el.get_attr("type").cloned().unwrap_or_default(),
                el.checked,
            )
        }) else {
            return false;
        };
        if tag == "input" {
            self.focus(id);
        } else if self.focused().is_some_and(|f| f != id) {
            self.blur();
        }

        let changed = match (tag.as_str(), kind.as_str()) {
            ("input", "checkbox") => self.set_checked(id, !checked),
            ("input", "radio") => !checked && self.set_checked(id, true),
            _ => false,
        };
        self.dispatch(Event::Click {
            target: id.to_string(),
        });
        if changed {
            self.dispatch(Event::Change {
                target: id.to_string(),
            });
        }
        true
    }

    /// Replace the value of a text field and dispatch `Input`.
    pub fn type_text(&mut self, id: &str, value: impl Into<String>) -> bool {
        if !self.set_value(id, value) {
            return false;
        }
        self.dispatch(Event::Input {
            target: id.to_string(),
        });
        true
    }

    /// Commit a new value on a select and dispatch `Change`.
    pub fn select_value(&mut self, id: &str, value: impl Into<String>) -> bool {
        if !self.set_value(id, value) {
            return false;
        }
        self.dispatch(Event::Change {
            target: id.to_string(),
        });
        true
    }

    /// Set a checkbox and dispatch `Change`.
    pub fn toggle(&mut self, id: &str, checked: bool) -> bool {
        if !self.set_checked(id, checked) {
            return false;
        }
        self.dispatch(Event::Change {
            target: id.to_string(),
        });
        true
    }

    // -------------------------------------------------------------------------
    // Timers
    // -------------------------------------------------------------------------

    /// Current position of the virtual clock.
    pub fn now(&self) -> Duration {
        self.clock
    }

    /// Run `callback` once `delay` has elapsed on the document clock.
    pub fn set_timeout(
        &mut self,
        delay: Duration,
        callback: impl FnOnce(&mut Document) + Send + 'static,
    ) -> TimerId {
        let callback: TimerCallback = Box::new(callback);
        self.timers.schedule(self.clock + delay, callback)
    }

    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        self.timers.cancel(id)
    }

    pub fn is_timer_pending(&self, id: TimerId) -> bool {
        self.timers.is_pending(id)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Advance the clock by `by`, running every timer that falls due.
    ///
    /// Timers run in deadline order with the clock set to their deadline, so
    /// timers they schedule are measured from that point and may run in the
    /// same call.
    pub fn advance(&mut self, by: Duration) {
        let target = self.clock + by;
        while let Some((deadline, callback)) = self.timers.pop_due(target) {
            self.clock = self.clock.max(deadline);
            callback(self);
        }
        self.clock = target;
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("root", &self.root.id)
            .field("focused", &self.focus.focused())
            .field("listeners", &self.listeners.len())
            .field("timers", &self.timers)
            .field("clock", &self.clock)
            .finish()
    }
}
