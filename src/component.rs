//! Component trait - Interface for UI components
//!
//! Each panel and dialog owns its state, turns key presses into Actions and
//! renders itself. Cross-component effects go through the App.

use crate::action::Action;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// Trait for UI components
///
/// The cycle is:
/// 1. `handle_key_event` - translate a key press into an Action (local
///    edits such as typing into a field may be applied directly)
/// 2. `update` - apply an Action, optionally returning a follow-up
/// 3. `draw` - render into the given area
pub trait Component {
    /// Called once before the first draw
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    /// Render only; no state changes beyond scroll clamping
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
