//! Keyboard shortcut reference

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

type Shortcuts = &'static [(&'static str, &'static str)];

const SHORTCUTS: &[(&str, Shortcuts)] = &[
    (
        "Campaign list",
        &[
            ("j k ↓ ↑", "Move the cursor"),
            ("g G", "First / last campaign"),
            ("Enter d", "Show or hide details"),
            ("p", "Publish the selected draft"),
            ("r", "Reload from the server"),
            ("Tab n", "Go to the create form"),
        ],
    ),
    (
        "Create form",
        &[
            ("Tab ↓ / S-Tab ↑", "Next / previous field"),
            ("← →", "Change objective or type"),
            ("Enter", "Submit (on the button)"),
            ("Ctrl+s", "Create campaign"),
            ("Esc", "Back to the list"),
        ],
    ),
    (
        "Anywhere",
        &[
            ("?", "This help"),
            ("q", "Quit (asks first)"),
            ("Ctrl+c", "Quit now"),
        ],
    ),
];

const KEY_COLUMN: usize = 18;

/// Popup listing every shortcut; scrolls when the terminal is short
#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: u16,
}

fn help_lines() -> Vec<Line<'static>> {
    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();
    for (section, shortcuts) in SHORTCUTS {
        lines.push(Line::from(Span::styled(
            format!(" {}", section),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        lines.extend(shortcuts.iter().map(|(keys, what)| {
            Line::from(vec![
                Span::styled(format!("   {:<width$}", keys, width = KEY_COLUMN), key_style),
                Span::raw(*what),
            ])
        }));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        " Esc / q / ? to close",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
                return Ok(Some(Action::CloseModal))
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1)
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1)
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let lines = help_lines();
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
        let popup = centered_popup(area, 56, height);

        let hidden = height.saturating_sub(popup.height);
        self.scroll_offset = self.scroll_offset.min(hidden);

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Cyan))
                        .title(" Help "),
                )
                .scroll((self.scroll_offset, 0)),
            popup,
        );
        Ok(())
    }
}
