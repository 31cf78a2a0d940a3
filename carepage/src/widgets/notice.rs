//! Transient message box shown after form submissions.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use pagedom::{Display, Document, TimerId};

pub const SUCCESS_BACKGROUND: &str = "#1e7e34";
pub const ERROR_BACKGROUND: &str = "#c82333";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn background(&self) -> &'static str {
        match self {
            NoticeKind::Success => SUCCESS_BACKGROUND,
            NoticeKind::Error => ERROR_BACKGROUND,
        }
    }
}

/// How long a notice stays up, and how long its fade-out lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeTiming {
    /// Default: 3 seconds
    pub visible: Duration,
    /// Default: 300 milliseconds
    pub fade: Duration,
}

impl Default for NoticeTiming {
    fn default() -> Self {
        Self {
            visible: Duration::from_millis(3000),
            fade: Duration::from_millis(300),
        }
    }
}

impl NoticeTiming {
    pub fn with_visible(mut self, visible: Duration) -> Self {
        self.visible = visible;
        self
    }

    pub fn with_fade(mut self, fade: Duration) -> Self {
        self.fade = fade;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Notice {
    element_id: String,
    timing: NoticeTiming,
    pending: Arc<Mutex<Option<TimerId>>>,
}

impl Notice {
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            timing: NoticeTiming::default(),
            pending: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_timing(mut self, timing: NoticeTiming) -> Self {
        self.timing = timing;
        self
    }

    /// The page's single message box.
    pub fn page_message() -> Self {
        Self::new("popupMessage")
    }

    /// Show `message`, then fade it out. Replaces a notice still on screen.
    pub fn show(&self, doc: &mut Document, message: &str, kind: NoticeKind) -> bool {
        if !doc.contains(&self.element_id) {
            return false;
        }
        self.cancel_pending(doc);

        doc.set_text(&self.element_id, message);
        doc.set_style(&self.element_id, "background", kind.background());
        doc.set_display(&self.element_id, Display::Block);
        doc.set_style(&self.element_id, "opacity", "1");

        let id = self.element_id.clone();
        let fade = self.timing.fade;
        let pending = self.pending.clone();
        let timer = doc.set_timeout(self.timing.visible, move |doc| {
            doc.set_style(&id, "opacity", "0");
            let hide_pending = pending.clone();
            let fade_timer = doc.set_timeout(fade, move |doc| {
                if let Ok(mut guard) = hide_pending.lock() {
                    *guard = None;
                }
                doc.set_display(&id, Display::None);
            });
            if let Ok(mut guard) = pending.lock() {
                *guard = Some(fade_timer);
            }
        });

        if let Ok(mut guard) = self.pending.lock() {
            *guard = Some(timer);
        }
        true
    }

    fn cancel_pending(&self, doc: &mut Document) {
        if let Ok(mut guard) = self.pending.lock()
            && let Some(timer) = guard.take()
        {
            doc.clear_timeout(timer);
        }
    }
}
