//! Campaign creation form
//!
//! Owns the draft being edited and the submit state machine. The actual
//! request is issued by the app through the request runner; the form only
//! decides whether a submit may start and how to settle afterwards.

use crate::action::Action;
use crate::component::Component;
use crate::model::draft::{CampaignDraft, FormField};
use crate::model::CreateCampaignPayload;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

/// Width reserved for field labels
const LABEL_WIDTH: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Editing,
    Submitting,
}

/// Creation flow state
pub struct CampaignFormComponent {
    pub draft: CampaignDraft,
    pub focused: FormField,
    pub state: SubmitState,
    /// Validation message shown under the fields
    pub error: Option<String>,
}

impl Default for CampaignFormComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl CampaignFormComponent {
    pub fn new() -> Self {
        Self {
            draft: CampaignDraft::new(),
            focused: FormField::Name,
            state: SubmitState::Editing,
            error: None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmitState::Submitting
    }

    /// Start a submit if none is in flight and the draft is complete.
    ///
    /// Returns the payload to send. A validation failure is kept as the
    /// inline error and leaves the form in `Editing`.
    pub fn begin_submit(&mut self) -> Option<CreateCampaignPayload> {
        if self.is_submitting() {
            return None;
        }
        match self.draft.validate() {
            Ok(payload) => {
                self.error = None;
                self.state = SubmitState::Submitting;
                Some(payload)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// Settle a submit. Success clears the draft; failure keeps the user's
    /// input for correction.
    pub fn finish_submit(&mut self, succeeded: bool) {
        self.state = SubmitState::Editing;
        if succeeded {
            self.draft.reset();
            self.focused = FormField::Name;
            self.error = None;
        }
    }

    fn edit(&mut self, key: KeyEvent) {
        if self.is_submitting() {
            return;
        }
        let changed = match key.code {
            KeyCode::Char(c) => self.draft.push_char(self.focused, c),
            KeyCode::Backspace => self.draft.pop_char(self.focused),
            _ => false,
        };
        if changed {
            self.error = None;
        }
    }

    /// Keep only the trailing part of `text` that fits in `width` columns
    fn visible_tail(text: &str, width: usize) -> String {
        let mut used = 0;
        let mut start = text.len();
        for (idx, c) in text.char_indices().rev() {
            let w = c.width().unwrap_or(0);
            if used + w > width {
                break;
            }
            used += w;
            start = idx;
        }
        text[start..].to_string()
    }

    fn field_line(&self, field: FormField, value_width: usize) -> Line<'static> {
        let focused = self.focused == field;
        let label_style = if focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let marker = if focused { "> " } else { "  " };

        let value = self.draft.value(field);
        let value_span = if field.is_choice() {
            Span::styled(
                format!("◂ {} ▸", value),
                Style::default().fg(if focused { Color::Yellow } else { Color::White }),
            )
        } else if value.is_empty() && !focused {
            Span::styled(
                field.placeholder().to_string(),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            let cursor = if focused && !self.is_submitting() { "_" } else { "" };
            let shown = Self::visible_tail(&value, value_width.saturating_sub(cursor.len()));
            Span::styled(
                format!("{}{}", shown, cursor),
                Style::default().fg(Color::White),
            )
        };

        let label = if field.is_required() && !field.is_choice() {
            format!("{}*", field.label())
        } else {
            field.label().to_string()
        };

        Line::from(vec![
            Span::styled(marker, label_style),
            Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), label_style),
            value_span,
        ])
    }

    fn submit_line(&self) -> Line<'static> {
        let focused = self.focused == FormField::Submit;
        let (text, color) = if self.is_submitting() {
            (" Creating... ".to_string(), Color::Yellow)
        } else {
            (format!(" {} ", FormField::Submit.label()), Color::Green)
        };
        let style = if focused {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        };
        Line::from(vec![Span::raw("  "), Span::styled(text, style)])
    }

    /// Lines of the form body, without the surrounding block
    pub fn form_lines(&self, value_width: usize) -> Vec<Line<'static>> {
        let mut lines: Vec<Line> = FormField::all()
            .into_iter()
            .filter(|f| *f != FormField::Submit)
            .map(|f| self.field_line(f, value_width))
            .collect();

        lines.push(Line::from(""));
        lines.push(self.submit_line());

        if let Some(ref error) = self.error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("  {}", error),
                Style::default().fg(Color::Red),
            )));
        }

        lines
    }

    /// Draw the form panel
    pub fn draw_with_focus(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let border_color = if focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" New Campaign ")
            .border_style(Style::default().fg(border_color));

        // borders, marker and label
        let value_width = (area.width as usize).saturating_sub(2 + 2 + LABEL_WIDTH + 1);
        let paragraph = Paragraph::new(self.form_lines(value_width)).block(block);
        frame.render_widget(paragraph, area);
    }
}

impl Component for CampaignFormComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(match key.code {
                KeyCode::Char('s') => Some(Action::SubmitForm),
                _ => None,
            });
        }

        let action = match key.code {
            KeyCode::Esc => Some(Action::FocusList),
            KeyCode::Tab | KeyCode::Down => {
                self.focused = self.focused.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focused = self.focused.prev();
                None
            }
            KeyCode::Enter if self.focused == FormField::Submit => Some(Action::SubmitForm),
            KeyCode::Enter => {
                self.focused = self.focused.next();
                None
            }
            KeyCode::Left | KeyCode::Right if self.focused.is_choice() => {
                if !self.is_submitting() {
                    self.draft
                        .cycle_choice(self.focused, key.code == KeyCode::Right);
                }
                None
            }
            KeyCode::Char(' ') if self.focused.is_choice() => {
                if !self.is_submitting() {
                    self.draft.cycle_choice(self.focused, true);
                }
                None
            }
            KeyCode::Char(_) | KeyCode::Backspace => {
                self.edit(key);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Focus comes from the app; see draw_with_focus
        Ok(())
    }
}
