//! Campaign list component
//!
//! Shows the canonical list, expands one campaign at a time for details and
//! tracks which campaigns have a publish request in flight.

use crate::action::Action;
use crate::component::Component;
use crate::model::campaign::{Campaign, CampaignStatus};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::collections::HashSet;

/// List & publish flow state
pub struct CampaignListComponent {
    /// Cursor position in the campaign list
    pub list_state: ListState,

    /// Campaign whose details are shown (at most one)
    pub expanded_id: Option<String>,

    /// Campaigns with a publish request outstanding
    pub publishing: HashSet<String>,

    /// Prefix for budgets
    pub currency_symbol: String,
}

impl Default for CampaignListComponent {
    fn default() -> Self {
        Self::new("₹")
    }
}

impl CampaignListComponent {
    pub fn new(currency_symbol: &str) -> Self {
        Self {
            list_state: ListState::default(),
            expanded_id: None,
            publishing: HashSet::new(),
            currency_symbol: currency_symbol.to_string(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Details
    // ─────────────────────────────────────────────────────────────────────────

    /// Collapse `id` if it is the expanded campaign, otherwise expand it
    /// (which collapses whatever was open before)
    pub fn toggle_details(&mut self, id: &str) {
        if self.expanded_id.as_deref() == Some(id) {
            self.expanded_id = None;
        } else {
            self.expanded_id = Some(id.to_string());
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded_id.as_deref() == Some(id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Publish lock
    // ─────────────────────────────────────────────────────────────────────────

    pub fn is_publishing(&self, id: &str) -> bool {
        self.publishing.contains(id)
    }

    /// Whether the publish control is offered for this campaign
    pub fn can_publish(&self, campaign: &Campaign) -> bool {
        campaign.status.is_publishable() && !self.is_publishing(&campaign.id)
    }

    /// Take the publish lock for a campaign.
    ///
    /// Returns false, leaving state untouched, for published campaigns and for
    /// campaigns that already have a publish in flight.
    pub fn begin_publish(&mut self, campaign: &Campaign) -> bool {
        if !campaign.status.is_publishable() {
            return false;
        }
        self.publishing.insert(campaign.id.clone())
    }

    /// Release the publish lock once the request settled, whatever the outcome
    pub fn finish_publish(&mut self, id: &str) {
        self.publishing.remove(id);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    pub fn selected<'a>(&self, campaigns: &'a [Campaign]) -> Option<&'a Campaign> {
        campaigns.get(self.list_state.selected()?)
    }

    pub fn next(&mut self, campaigns: &[Campaign]) {
        if campaigns.is_empty() {
            return;
        }
        let next = match self.list_state.selected() {
            Some(i) if i + 1 < campaigns.len() => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(next));
    }

    pub fn previous(&mut self, campaigns: &[Campaign]) {
        if campaigns.is_empty() {
            return;
        }
        let prev = match self.list_state.selected() {
            Some(0) | None => campaigns.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(prev));
    }

    pub fn select_first(&mut self, campaigns: &[Campaign]) {
        self.list_state
            .select(if campaigns.is_empty() { None } else { Some(0) });
    }

    pub fn select_last(&mut self, campaigns: &[Campaign]) {
        self.list_state.select(campaigns.len().checked_sub(1));
    }

    /// Re-anchor the cursor after the list was replaced.
    ///
    /// The cursor follows the previously selected campaign by id; if it is
    /// gone the index is clamped. An expanded campaign that disappeared is
    /// collapsed.
    pub fn sync_with(&mut self, previous_selection: Option<&str>, campaigns: &[Campaign]) {
        let position = previous_selection.and_then(|id| campaigns.iter().position(|c| c.id == id));
        match (position, self.list_state.selected()) {
            (Some(idx), _) => self.list_state.select(Some(idx)),
            (None, Some(idx)) if !campaigns.is_empty() => {
                self.list_state.select(Some(idx.min(campaigns.len() - 1)))
            }
            _ => self.select_first(campaigns),
        }

        if let Some(expanded) = &self.expanded_id {
            if !campaigns.iter().any(|c| &c.id == expanded) {
                self.expanded_id = None;
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    fn status_span(&self, campaign: &Campaign) -> Span<'static> {
        if self.is_publishing(&campaign.id) {
            return Span::styled(
                "Publishing...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            );
        }
        match campaign.status {
            CampaignStatus::Draft => Span::styled("DRAFT", Style::default().fg(Color::Cyan)),
            CampaignStatus::Published => Span::styled(
                "PUBLISHED",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        }
    }

    fn detail_line(label: &str, value: String) -> Line<'static> {
        Line::from(vec![
            Span::styled(
                format!("    {:<20}", label),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw(value),
        ])
    }

    /// Lines for one campaign: a header row, plus details when expanded
    pub fn campaign_lines(&self, campaign: &Campaign) -> Vec<Line<'static>> {
        let marker = if self.is_expanded(&campaign.id) { "▾ " } else { "▸ " };
        let mut header = vec![
            Span::styled(marker, Style::default().fg(Color::DarkGray)),
            Span::styled(
                campaign.name.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            self.status_span(campaign),
        ];
        if self.can_publish(campaign) {
            header.push(Span::styled("  [p] Publish", Style::default().fg(Color::DarkGray)));
        }

        let mut lines = vec![Line::from(header)];

        if self.is_expanded(&campaign.id) {
            lines.push(Self::detail_line("Objective:", campaign.objective.clone()));
            lines.push(Self::detail_line("Type:", campaign.campaign_type.clone()));
            lines.push(Self::detail_line(
                "Daily Budget:",
                campaign.formatted_budget(&self.currency_symbol),
            ));
            lines.push(Self::detail_line("Start:", campaign.start_date.clone()));
            lines.push(Self::detail_line("End:", campaign.end_date.clone()));
            if !campaign.created_at.is_empty() {
                lines.push(Self::detail_line("Created:", campaign.formatted_created_at()));
            }
            if let Some(google_id) = &campaign.google_campaign_id {
                lines.push(Self::detail_line("Google Campaign ID:", google_id.clone()));
            }
        }

        lines
    }

    /// Draw the list panel for the given campaigns
    pub fn draw_with_campaigns(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        campaigns: &[Campaign],
        focused: bool,
        loading: bool,
    ) {
        let border_color = if focused { Color::Cyan } else { Color::DarkGray };
        let title = if loading {
            format!(" Campaigns ({}) - loading... ", campaigns.len())
        } else {
            format!(" Campaigns ({}) ", campaigns.len())
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(border_color));

        if campaigns.is_empty() {
            let text = if loading {
                "Loading campaigns..."
            } else {
                "No campaigns yet. Press Tab to create one."
            };
            let paragraph = Paragraph::new(Line::from(Span::styled(
                text,
                Style::default().fg(Color::DarkGray),
            )))
            .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = campaigns
            .iter()
            .map(|c| ListItem::new(self.campaign_lines(c)))
            .collect();

        let highlight = if focused {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };

        let list = List::new(items)
            .block(block)
            .highlight_style(highlight)
            .highlight_symbol("> ");

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

impl Component for CampaignListComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstItem),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastItem),
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('d') => {
                Some(Action::ToggleDetails)
            }
            KeyCode::Char('p') => Some(Action::RequestPublish),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Refresh)
            }
            KeyCode::Tab | KeyCode::Char('n') => Some(Action::FocusForm),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the campaign list; see draw_with_campaigns
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign(id: &str, status: CampaignStatus) -> Campaign {
        Campaign {
            id: id.to_string(),
            name: format!("Campaign {}", id),
            objective: "TRAFFIC".to_string(),
            campaign_type: "SEARCH".to_string(),
            daily_budget: 500,
            start_date: "2024-01-01".to_string(),
            end_date: "2024-01-31".to_string(),
            status,
            google_campaign_id: None,
            created_at: String::new(),
        }
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_toggle_details_single_expansion() {
        let mut list = CampaignListComponent::default();
        assert_eq!(list.expanded_id, None);

        list.toggle_details("a");
        assert!(list.is_expanded("a"));

        list.toggle_details("b");
        assert!(list.is_expanded("b"));
        assert!(!list.is_expanded("a"));

        list.toggle_details("b");
        assert_eq!(list.expanded_id, None);
    }

    #[test]
    fn test_publish_lock_is_per_campaign() {
        let mut list = CampaignListComponent::default();
        let a = campaign("a", CampaignStatus::Draft);
        let b = campaign("b", CampaignStatus::Draft);

        assert!(list.begin_publish(&a));
        assert!(!list.begin_publish(&a), "second publish of the same id must be refused");
        assert!(list.begin_publish(&b), "other campaigns stay publishable");
        assert!(!list.can_publish(&a));

        list.finish_publish("a");
        assert!(!list.is_publishing("a"));
        assert!(list.is_publishing("b"));
        assert!(list.can_publish(&a));
    }

    #[test]
    fn test_published_campaign_cannot_be_published() {
        let mut list = CampaignListComponent::default();
        let published = campaign("a", CampaignStatus::Published);

        assert!(!list.can_publish(&published));
        assert!(!list.begin_publish(&published));
        assert!(list.publishing.is_empty());

        let header = line_text(&list.campaign_lines(&published)[0]);
        assert!(header.contains("PUBLISHED"));
        assert!(!header.contains("Publish]"));
    }

    #[test]
    fn test_finish_publish_without_lock_is_harmless() {
        let mut list = CampaignListComponent::default();
        list.finish_publish("never-started");
        assert!(list.publishing.is_empty());
    }

    #[test]
    fn test_status_shows_publishing_while_locked() {
        let mut list = CampaignListComponent::default();
        let draft = campaign("a", CampaignStatus::Draft);
        assert!(line_text(&list.campaign_lines(&draft)[0]).contains("[p] Publish"));

        list.begin_publish(&draft);
        let header = line_text(&list.campaign_lines(&draft)[0]);
        assert!(header.contains("Publishing..."));
        assert!(!header.contains("[p] Publish"));
    }

    #[test]
    fn test_expanded_lines_include_details() {
        let mut list = CampaignListComponent::new("$");
        let mut c = campaign("a", CampaignStatus::Published);
        c.google_campaign_id = Some("customers/1/campaigns/9".to_string());

        assert_eq!(list.campaign_lines(&c).len(), 1);

        list.toggle_details("a");
        let text: Vec<String> = list.campaign_lines(&c).iter().map(line_text).collect();
        assert!(text.iter().any(|l| l.contains("Daily Budget:") && l.contains("$500")));
        assert!(text.iter().any(|l| l.contains("customers/1/campaigns/9")));
        assert!(text.iter().any(|l| l.contains("2024-01-31")));
    }

    #[test]
    fn test_navigation_wraps() {
        let campaigns = vec![
            campaign("a", CampaignStatus::Draft),
            campaign("b", CampaignStatus::Draft),
        ];
        let mut list = CampaignListComponent::default();
        list.select_first(&campaigns);
        list.previous(&campaigns);
        assert_eq!(list.selected(&campaigns).map(|c| c.id.as_str()), Some("b"));
        list.next(&campaigns);
        assert_eq!(list.selected(&campaigns).map(|c| c.id.as_str()), Some("a"));

        list.select_first(&[]);
        assert_eq!(list.list_state.selected(), None);
    }

    #[test]
    fn test_sync_follows_selected_id() {
        let mut list = CampaignListComponent::default();
        let before = vec![
            campaign("a", CampaignStatus::Draft),
            campaign("b", CampaignStatus::Draft),
        ];
        list.select_last(&before);
        list.toggle_details("a");

        let after = vec![
            campaign("c", CampaignStatus::Draft),
            campaign("b", CampaignStatus::Published),
            campaign("d", CampaignStatus::Draft),
        ];
        list.sync_with(Some("b"), &after);
        assert_eq!(list.selected(&after).map(|c| c.id.as_str()), Some("b"));
        assert_eq!(list.expanded_id, None, "vanished campaign collapses");
    }

    #[test]
    fn test_sync_clamps_when_selection_vanished() {
        let mut list = CampaignListComponent::default();
        list.list_state.select(Some(5));
        let after = vec![campaign("x", CampaignStatus::Draft)];
        list.sync_with(Some("gone"), &after);
        assert_eq!(list.list_state.selected(), Some(0));

        list.sync_with(None, &[]);
        assert_eq!(list.list_state.selected(), None);
    }
}
