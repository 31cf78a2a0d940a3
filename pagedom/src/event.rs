/// Page events, each targeted at an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Element gained focus
    Focus { target: String },
    /// Element lost focus
    Blur { target: String },
    /// Value of a text field changed (one keystroke)
    Input { target: String },
    /// Value of a select or checkbox was committed
    Change { target: String },
    /// Element was clicked
    Click { target: String },
}

/// Discriminant of [`Event`], used to key listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Focus,
    Blur,
    Input,
    Change,
    Click,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Focus { .. } => EventKind::Focus,
            Event::Blur { .. } => EventKind::Blur,
            Event::Input { .. } => EventKind::Input,
            Event::Change { .. } => EventKind::Change,
            Event::Click { .. } => EventKind::Click,
        }
    }

    pub fn target(&self) -> &str {
        match self {
            Event::Focus { target }
            | Event::Blur { target }
            | Event::Input { target }
            | Event::Change { target }
            | Event::Click { target } => target,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventKind::Focus => "focus",
            EventKind::Blur => "blur",
            EventKind::Input => "input",
            EventKind::Change => "change",
            EventKind::Click => "click",
        };
        f.write_str(name)
    }
}
