//! Home screen - header, create form, campaign list, status and help bars
//!
//! The form and list own their state; this module only lays them out and
//! renders the chrome around them.

use crate::components::{calculate_main_layout, CampaignFormComponent, CampaignListComponent};
use crate::model::campaign::Campaign;
use crate::model::ui::Focus;
use anyhow::Result;
use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Data needed to draw the home screen
pub struct HomeRenderContext<'a> {
    pub campaigns: &'a [Campaign],
    pub focus: Focus,
    pub loading: bool,
    pub draft_count: usize,
    pub api_base_url: &'a str,
    pub last_loaded_at: Option<DateTime<Local>>,
    pub error: Option<&'a str>,
    pub status_message: Option<&'a str>,
}

/// Draw the home screen
pub fn draw_home_screen(
    frame: &mut Frame,
    area: Rect,
    form: &CampaignFormComponent,
    list: &mut CampaignListComponent,
    ctx: &HomeRenderContext,
) -> Result<()> {
    let has_status = ctx.error.is_some() || ctx.status_message.is_some();
    let layout = calculate_main_layout(area, has_status);

    render_header(frame, layout.header, list, ctx);
    form.draw_with_focus(frame, layout.form, ctx.focus == Focus::Form);
    list.draw_with_campaigns(
        frame,
        layout.list,
        ctx.campaigns,
        ctx.focus == Focus::List,
        ctx.loading,
    );

    if let Some(status_area) = layout.status {
        render_status_bar(frame, status_area, ctx);
    }
    render_help_bar(frame, layout.help, ctx.focus);

    Ok(())
}

fn render_header(frame: &mut Frame, area: Rect, list: &CampaignListComponent, ctx: &HomeRenderContext) {
    let drafts = ctx.draft_count;
    let published = ctx.campaigns.len().saturating_sub(drafts);

    let mut spans = vec![
        Span::styled(
            " Campaign Manager ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(ctx.api_base_url.to_string(), Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled(format!("{} draft", drafts), Style::default().fg(Color::Cyan)),
        Span::raw(" · "),
        Span::styled(
            format!("{} published", published),
            Style::default().fg(Color::Green),
        ),
    ];

    if !list.publishing.is_empty() {
        spans.push(Span::raw(" · "));
        spans.push(Span::styled(
            format!("{} publishing", list.publishing.len()),
            Style::default().fg(Color::Yellow),
        ));
    }

    if ctx.loading {
        spans.push(Span::styled("  loading...", Style::default().fg(Color::Yellow)));
    } else if let Some(at) = ctx.last_loaded_at {
        spans.push(Span::styled(
            format!("  updated {}", at.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
    let mut spans = vec![];

    if let Some(error) = ctx.error {
        spans.push(Span::styled(
            format!(" Error: {} ", error),
            Style::default().fg(Color::Red),
        ));
        spans.push(Span::styled("(r to retry) ", Style::default().fg(Color::DarkGray)));
    }

    if let Some(status) = ctx.status_message {
        spans.push(Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Green),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn key_span(key: &str, color: Color) -> Span<'static> {
    Span::styled(
        format!(" {} ", key),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

fn render_help_bar(frame: &mut Frame, area: Rect, focus: Focus) {
    let help_spans = match focus {
        Focus::Form => vec![
            key_span("Tab", Color::Cyan),
            Span::raw("Next field  "),
            key_span("←/→", Color::Cyan),
            Span::raw("Change choice  "),
            key_span("Ctrl+s", Color::Green),
            Span::raw("Create  "),
            key_span("Esc", Color::Yellow),
            Span::raw("Back to list"),
        ],
        Focus::List => vec![
            key_span("q", Color::Yellow),
            Span::raw("Quit "),
            key_span("j/k", Color::Cyan),
            Span::raw("Navigate "),
            key_span("Enter", Color::Cyan),
            Span::raw("Details "),
            key_span("p", Color::Green),
            Span::raw("Publish "),
            key_span("r", Color::Cyan),
            Span::raw("Refresh "),
            key_span("Tab", Color::Cyan),
            Span::raw("New campaign "),
            key_span("?", Color::Cyan),
            Span::raw("Help"),
        ],
    };

    let paragraph = Paragraph::new(Line::from(help_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}
