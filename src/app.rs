//! App - Root component that coordinates all child components
//!
//! The App owns the canonical campaign list and decides what every finished
//! request means for the UI. Child components own their own view state.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_home_screen, AlertDialog, CampaignFormComponent, CampaignListComponent, ConfirmDialog,
    HelpDialog, HomeRenderContext, SetupComponent,
};
use crate::config::Config;
use crate::model::modal::{AlertKind, Modal, ModalStack};
use crate::model::{AppMode, DomainState, Focus};
use crate::services::error::PUBLISH_FAILED;
use crate::services::{ApiError, ApiMessage, ApiRunner, CampaignApi, HttpCampaignClient};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use std::sync::Arc;

/// Shown after a create request succeeds
pub const CREATED_MESSAGE: &str = "Campaign created successfully";

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Current application mode
    pub mode: AppMode,

    /// Domain state (business data)
    pub domain: DomainState,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Background request runner
    pub runner: ApiRunner,

    /// Effective configuration
    pub config: Config,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Last list failure, shown until the next successful load
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    /// Panel receiving key input
    pub focus: Focus,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub list: CampaignListComponent,
    pub form: CampaignFormComponent,
    pub setup: SetupComponent,
    pub confirm_dialog: ConfirmDialog,
    pub alert_dialog: AlertDialog,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create the app talking HTTP to the configured server
    pub fn new(config: Config, mode: AppMode) -> App {
        let client = HttpCampaignClient::new(&config.api_base_url, config.request_timeout());
        Self::with_api(config, mode, Arc::new(client))
    }

    /// Create the app on top of any `CampaignApi` implementation
    pub fn with_api(config: Config, mode: AppMode, api: Arc<dyn CampaignApi>) -> App {
        App {
            mode,
            domain: DomainState::new(),
            modals: ModalStack::new(),
            runner: ApiRunner::new(api),
            should_quit: false,
            error: None,
            status_message: None,
            focus: Focus::default(),
            list: CampaignListComponent::new(&config.currency_symbol),
            form: CampaignFormComponent::new(),
            setup: SetupComponent::new(config.clone()),
            confirm_dialog: ConfirmDialog,
            alert_dialog: AlertDialog,
            help_dialog: HelpDialog::default(),
            config,
        }
    }

    /// Ask the server for the full list again
    pub fn request_reload(&mut self) {
        self.domain.begin_load();
        self.runner.load();
    }

    /// Whether any request is still outstanding
    pub fn is_busy(&self) -> bool {
        self.domain.is_loading() || !self.list.publishing.is_empty() || self.form.is_submitting()
    }

    fn selected_campaign_id(&self) -> Option<String> {
        self.list
            .selected(&self.domain.campaigns)
            .map(|c| c.id.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Publish
    // ─────────────────────────────────────────────────────────────────────────

    fn request_publish(&mut self) {
        let Some(campaign) = self.list.selected(&self.domain.campaigns) else {
            return;
        };
        if self.list.is_publishing(&campaign.id) {
            self.status_message = Some(format!("\"{}\" is already being published", campaign.name));
        } else if !self.list.can_publish(campaign) {
            self.status_message = Some(format!("\"{}\" is already published", campaign.name));
        } else {
            self.modals.push(Modal::PublishConfirm {
                id: campaign.id.clone(),
                name: campaign.name.clone(),
            });
        }
    }

    fn start_publish(&mut self, id: &str) {
        let Some(campaign) = self.domain.find(id).cloned() else {
            return;
        };
        if !self.list.begin_publish(&campaign) {
            tracing::debug!(id, "publish refused: not a draft or already in flight");
            return;
        }
        tracing::info!(id, name = %campaign.name, "publishing campaign");
        // the publish job reloads the list before it settles
        self.domain.begin_load();
        self.runner.publish(campaign.id);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Finished requests
    // ─────────────────────────────────────────────────────────────────────────

    fn process_api_messages(&mut self) {
        for message in self.runner.poll() {
            self.handle_api_message(message);
        }
    }

    fn handle_api_message(&mut self, message: ApiMessage) {
        match message {
            ApiMessage::Loaded {
                seq,
                result: Ok(campaigns),
            } => {
                let previous = self.selected_campaign_id();
                if !self.domain.apply_load(seq, campaigns) {
                    tracing::debug!(seq, shown = self.domain.loaded_seq, "ignoring stale campaign list");
                    return;
                }
                tracing::debug!(seq, count = self.domain.campaigns.len(), "campaign list loaded");
                self.list.sync_with(previous.as_deref(), &self.domain.campaigns);
                self.error = None;

                // A pending confirmation for something no longer publishable is stale
                let domain = &self.domain;
                self.modals.remove_where(|modal| match modal {
                    Modal::PublishConfirm { id, .. } => domain
                        .find(id)
                        .map_or(true, |c| !c.status.is_publishable()),
                    _ => false,
                });
            }
            ApiMessage::Loaded {
                seq,
                result: Err(e),
            } => {
                tracing::warn!(seq, status = ?e.status(), error = %e, "campaign list failed to load");
                self.domain.end_load();
                // a newer list already on screen supersedes this failure
                if seq > self.domain.loaded_seq {
                    self.error = Some(e.to_string());
                }
            }
            ApiMessage::Created(Ok(campaign)) => {
                tracing::info!(id = %campaign.id, name = %campaign.name, "campaign created");
                self.form.finish_submit(true);
                self.modals.alert(AlertKind::Success, CREATED_MESSAGE);
                self.request_reload();
            }
            ApiMessage::Created(Err(e)) => {
                tracing::warn!(status = ?e.status(), error = %e, "campaign create failed");
                self.form.finish_submit(false);
                self.modals.alert(AlertKind::Error, e.to_string());
            }
            ApiMessage::Published { id, result } => {
                self.list.finish_publish(&id);
                match result {
                    Ok(()) => {
                        tracing::info!(id = %id, "campaign published");
                        let name = self
                            .domain
                            .find(&id)
                            .map(|c| c.name.clone())
                            .unwrap_or_else(|| id.clone());
                        self.status_message = Some(format!("Published \"{}\"", name));
                    }
                    Err(e) => {
                        tracing::warn!(id = %id, error = %e, "campaign publish failed");
                        // no reload was issued for a failed publish
                        self.domain.end_load();
                        self.modals.alert(AlertKind::Error, publish_failure_message(&e));
                    }
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Setup
    // ─────────────────────────────────────────────────────────────────────────

    fn finish_setup(&mut self) {
        let Some(config) = self.setup.get_config().cloned() else {
            return;
        };
        tracing::info!(api_base_url = %config.api_base_url, "setup complete");
        let client = HttpCampaignClient::new(&config.api_base_url, config.request_timeout());
        self.runner = ApiRunner::new(Arc::new(client));
        // results from the old server's runner are never delivered
        self.domain = DomainState::new();
        self.list = CampaignListComponent::new(&config.currency_symbol);
        self.config = config;
        self.mode = AppMode::Running;
        self.request_reload();
    }
}

fn publish_failure_message(error: &ApiError) -> String {
    if error.is_network() {
        format!("{}: {}", PUBLISH_FAILED, error)
    } else {
        error.to_string()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        if self.mode == AppMode::Running {
            self.request_reload();
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::ForceQuit));
        }

        match self.mode {
            AppMode::Setup => self.setup.handle_key_event(key),
            AppMode::Running => {
                if let Some(modal) = self.modals.top().cloned() {
                    self.handle_modal_key_event(&modal, key)
                } else {
                    match self.focus {
                        Focus::List => self.list.handle_key_event(key),
                        Focus::Form => self.form.handle_key_event(key),
                    }
                }
            }
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => self.process_api_messages(),
            Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::SetupConfirm => self.finish_setup(),

            // ─────────────────────────────────────────────────────────────────
            // Focus
            // ─────────────────────────────────────────────────────────────────
            Action::FocusForm => self.focus = Focus::Form,
            Action::FocusList => self.focus = Focus::List,

            // ─────────────────────────────────────────────────────────────────
            // Campaign list (delegate to CampaignListComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::NextItem => self.list.next(&self.domain.campaigns),
            Action::PrevItem => self.list.previous(&self.domain.campaigns),
            Action::FirstItem => self.list.select_first(&self.domain.campaigns),
            Action::LastItem => self.list.select_last(&self.domain.campaigns),
            Action::ToggleDetails => {
                if let Some(id) = self.selected_campaign_id() {
                    self.list.toggle_details(&id);
                }
            }
            Action::RequestPublish => self.request_publish(),
            Action::Refresh => {
                self.status_message = None;
                self.request_reload();
            }

            // ─────────────────────────────────────────────────────────────────
            // Create form
            // ─────────────────────────────────────────────────────────────────
            Action::SubmitForm => {
                if let Some(payload) = self.form.begin_submit() {
                    tracing::info!(name = %payload.name, "submitting campaign");
                    self.runner.create(payload);
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help { scroll_offset: 0 });
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ConfirmModal => match self.modals.pop() {
                Some(Modal::QuitConfirm) => self.should_quit = true,
                Some(Modal::PublishConfirm { id, .. }) => self.start_publish(&id),
                _ => {}
            },
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        match self.mode {
            AppMode::Setup => self.setup.draw(frame, area)?,
            AppMode::Running => {
                let ctx = HomeRenderContext {
                    campaigns: &self.domain.campaigns,
                    focus: self.focus,
                    loading: self.domain.is_loading(),
                    draft_count: self.domain.draft_count(),
                    api_base_url: &self.config.api_base_url,
                    last_loaded_at: self.domain.last_loaded_at,
                    error: self.error.as_deref(),
                    status_message: self.status_message.as_deref(),
                };

                draw_home_screen(frame, area, &self.form, &mut self.list, &ctx)?;

                // Draw modal overlay if active
                if let Some(modal) = self.modals.top().cloned() {
                    self.draw_modal(frame, area, &modal)?;
                }
            }
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm | Modal::PublishConfirm { .. } => {
                self.confirm_dialog.handle_key_event(key)
            }
            Modal::Alert { .. } => self.alert_dialog.handle_key_event(key),
            Modal::Help { .. } => {
                let action = self.help_dialog.handle_key_event(key)?;
                if let Some(Modal::Help { scroll_offset }) = self.modals.top_mut() {
                    *scroll_offset = self.help_dialog.scroll_offset;
                }
                Ok(action)
            }
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.confirm_dialog.draw_with_prompt(
                frame,
                area,
                "Quit?",
                "Are you sure you want to quit?",
                "Yes, quit",
            )?,
            Modal::PublishConfirm { name, .. } => self.confirm_dialog.draw_with_prompt(
                frame,
                area,
                "Publish?",
                &format!("Publish \"{}\"? This cannot be undone.", name),
                "Yes, publish",
            )?,
            Modal::Alert { kind, message } => {
                self.alert_dialog.draw_with_alert(frame, area, *kind, message)?
            }
            Modal::Help { .. } => self.help_dialog.draw(frame, area)?,
        }
        Ok(())
    }
}
