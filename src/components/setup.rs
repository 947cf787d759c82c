//! First-run wizard: ask for the campaigns API address and save it

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::config::{normalize_base_url, Config};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStep {
    Welcome,
    ApiUrl,
    Confirm,
}

impl SetupStep {
    fn heading(&self) -> &'static str {
        match self {
            SetupStep::Welcome => "1/3 Welcome",
            SetupStep::ApiUrl => "2/3 API address",
            SetupStep::Confirm => "3/3 Save",
        }
    }

    fn hint(&self) -> &'static str {
        match self {
            SetupStep::Welcome => "Enter start · Esc quit",
            SetupStep::ApiUrl => "Enter check address · Esc back",
            SetupStep::Confirm => "Enter/y save · Esc/n edit address",
        }
    }
}

pub struct SetupComponent {
    pub step: SetupStep,
    /// Values written on completion
    pub config: Config,
    /// Address being typed on the `ApiUrl` step
    pub input: String,
    pub error: Option<String>,
    complete: bool,
    /// Where the config is written; `None` uses the default location
    pub save_path: Option<PathBuf>,
}

impl Default for SetupComponent {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl SetupComponent {
    /// Start from the given values; the address step is prefilled from them
    pub fn new(config: Config) -> Self {
        Self {
            step: SetupStep::Welcome,
            config,
            input: String::new(),
            error: None,
            complete: false,
            save_path: None,
        }
    }

    /// The saved config, once the wizard has finished
    pub fn get_config(&self) -> Option<&Config> {
        self.complete.then_some(&self.config)
    }

    fn edit_address(&mut self) {
        self.step = SetupStep::ApiUrl;
        self.input = self.config.api_base_url.clone();
        self.error = None;
    }

    fn check_address(&mut self) {
        match normalize_base_url(&self.input) {
            Ok(url) => {
                self.config.api_base_url = url;
                self.error = None;
                self.step = SetupStep::Confirm;
            }
            Err(e) => self.error = Some(e),
        }
    }

    fn save(&mut self) -> Option<Action> {
        let saved = match &self.save_path {
            Some(path) => self.config.save_to(path),
            None => self.config.save(),
        };
        match saved {
            Ok(()) => {
                self.complete = true;
                Some(Action::SetupConfirm)
            }
            Err(e) => {
                tracing::error!(error = %e, "could not save config");
                self.error = Some(format!("Could not save config: {}", e));
                None
            }
        }
    }

    fn body(&self) -> Vec<Line<'static>> {
        let accent = Style::default().fg(Color::Cyan);
        let mut lines = match self.step {
            SetupStep::Welcome => vec![
                Line::from("Create ad campaigns and publish them from the terminal."),
                Line::from(""),
                Line::from("First, tell campaign-tui where the campaigns API runs."),
            ],
            SetupStep::ApiUrl => vec![
                Line::from("Scheme, host and port, e.g. http://localhost:5000"),
                Line::from(""),
                Line::from(vec![
                    Span::styled("> ", accent),
                    Span::styled(
                        format!("{}_", self.input),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]),
            ],
            SetupStep::Confirm => {
                let path = Config::config_dir()
                    .map(|dir| dir.join("config.json").display().to_string())
                    .unwrap_or_else(|| "~/.campaign-tui/config.json".to_string());
                vec![
                    Line::from(vec![
                        Span::styled("API  ", accent),
                        Span::raw(self.config.api_base_url.clone()),
                    ]),
                    Line::from(vec![
                        Span::styled("File ", accent),
                        Span::raw(path),
                    ]),
                ]
            }
        };

        if let Some(error) = &self.error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            self.step.hint(),
            Style::default().fg(Color::DarkGray),
        )));
        lines
    }
}

impl Component for SetupComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match (self.step, key.code) {
            (SetupStep::Welcome, KeyCode::Enter) => {
                self.edit_address();
                None
            }
            (SetupStep::Welcome, KeyCode::Esc) => Some(Action::ForceQuit),

            (SetupStep::ApiUrl, KeyCode::Enter) => {
                self.check_address();
                None
            }
            (SetupStep::ApiUrl, KeyCode::Esc) => {
                self.step = SetupStep::Welcome;
                self.error = None;
                None
            }
            (SetupStep::ApiUrl, KeyCode::Backspace) => {
                self.input.pop();
                self.error = None;
                None
            }
            (SetupStep::ApiUrl, KeyCode::Char(c)) => {
                self.input.push(c);
                self.error = None;
                None
            }

            (SetupStep::Confirm, KeyCode::Enter | KeyCode::Char('y' | 'Y')) => self.save(),
            (SetupStep::Confirm, KeyCode::Esc | KeyCode::Char('n' | 'N')) => {
                self.edit_address();
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);
        let popup = centered_popup(area, 64, 12);
        frame.render_widget(
            Paragraph::new(self.body())
                .wrap(Wrap { trim: false })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Cyan))
                        .title(format!(" campaign-tui setup · {} ", self.step.heading())),
                ),
            popup,
        );
        Ok(())
    }
}
