//! Blocking alert dialog
//!
//! Stays on screen until dismissed, like a browser alert.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::modal::AlertKind;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

#[derive(Default)]
pub struct AlertDialog;

/// Rough wrapped height: message lines plus padding and the key hint
fn popup_height(message: &str, width: u16) -> u16 {
    let text_width = usize::from(width.saturating_sub(4)).max(1);
    let message_lines = message.chars().count().div_ceil(text_width).max(1);
    u16::try_from(message_lines)
        .unwrap_or(u16::MAX)
        .saturating_add(6)
}

impl AlertDialog {
    pub fn draw_with_alert(
        &self,
        frame: &mut Frame,
        area: Rect,
        kind: AlertKind,
        message: &str,
    ) -> Result<()> {
        let (title, color) = match kind {
            AlertKind::Success => (" Success ", Color::Green),
            AlertKind::Error => (" Error ", Color::Red),
        };

        let width: u16 = 50;
        let popup_area = centered_popup(area, width, popup_height(message, width));

        frame.render_widget(Clear, popup_area);

        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                message.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " Enter/Esc ",
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw("OK"),
            ]),
        ];

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(title)
                    .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

impl Component for AlertDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('q') => {
                Some(Action::CloseModal)
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.draw_with_alert(frame, area, AlertKind::Success, "")
    }
}
