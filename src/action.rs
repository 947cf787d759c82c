//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick: drain finished API requests
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,
    /// Setup wizard saved a configuration
    SetupConfirm,

    // ─────────────────────────────────────────────────────────────────────────
    // Focus
    // ─────────────────────────────────────────────────────────────────────────
    /// Move key focus to the create form
    FocusForm,
    /// Move key focus to the campaign list
    FocusList,

    // ─────────────────────────────────────────────────────────────────────────
    // Campaign list
    // ─────────────────────────────────────────────────────────────────────────
    /// Move cursor to next campaign
    NextItem,
    /// Move cursor to previous campaign
    PrevItem,
    /// Jump to first campaign
    FirstItem,
    /// Jump to last campaign
    LastItem,
    /// Expand or collapse details of the campaign under the cursor
    ToggleDetails,
    /// Ask to publish the campaign under the cursor
    RequestPublish,
    /// Reload the list from the server
    Refresh,

    // ─────────────────────────────────────────────────────────────────────────
    // Create form
    // ─────────────────────────────────────────────────────────────────────────
    /// Validate and submit the draft
    SubmitForm,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Close the current modal
    CloseModal,
    /// Confirm the current modal action
    ConfirmModal,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::SetupConfirm => write!(f, "SetupConfirm"),
            Action::FocusForm => write!(f, "FocusForm"),
            Action::FocusList => write!(f, "FocusList"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::ToggleDetails => write!(f, "ToggleDetails"),
            Action::RequestPublish => write!(f, "RequestPublish"),
            Action::Refresh => write!(f, "Refresh"),
            Action::SubmitForm => write!(f, "SubmitForm"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
        }
    }
}
