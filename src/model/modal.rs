//! Modal stack for managing overlays
//!
//! Only the top modal receives input; everything underneath is drawn but inert.

/// Severity of an alert, used for its colour and title
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

/// Represents a modal overlay that can be displayed on top of the main UI
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Confirmation before the irreversible publish of a draft
    PublishConfirm { id: String, name: String },
    /// Blocking notification that must be dismissed
    Alert { kind: AlertKind, message: String },
    /// Help dialog showing all keyboard shortcuts
    Help { scroll_offset: u16 },
}

/// A stack of modal overlays
///
/// Modals are rendered from bottom to top, with only the top modal
/// receiving input events.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Modal> {
        self.stack.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Queue an alert. Alerts raised while another modal is open stack on top
    /// of it and are dismissed first.
    pub fn alert(&mut self, kind: AlertKind, message: impl Into<String>) {
        self.push(Modal::Alert {
            kind,
            message: message.into(),
        });
    }

    /// Drop every modal matching the predicate, keeping the order of the rest
    pub fn remove_where(&mut self, predicate: impl Fn(&Modal) -> bool) {
        self.stack.retain(|m| !predicate(m));
    }
}
