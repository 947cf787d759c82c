//! campaign-tui - A terminal UI for creating and publishing ad campaigns
//!
//! This is the main entry point for the campaign-tui application.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod cli;
mod component;
mod components;
mod config;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::cli::{Cli, Command};
use crate::component::Component;
use crate::config::{normalize_base_url, Config};
use crate::model::{AppMode, Campaign};
use crate::services::{CampaignApi, HttpCampaignClient};
use crate::tui::Tui;
use anyhow::{anyhow, Result};
use clap::Parser;
use crossterm::event::Event;
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let api_url = cli
        .api_url
        .as_deref()
        .map(normalize_base_url)
        .transpose()
        .map_err(|e| anyhow!("--api-url: {}", e))?;

    // an unusable file is reported once logging is up
    let (file_config, load_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (None, Some(e)),
    };
    let needs_setup = file_config.is_none() && api_url.is_none();
    let config = file_config
        .unwrap_or_default()
        .with_overrides(api_url.as_deref(), cli.timeout);

    if let Some(log_path) = cli.log_file.clone().or_else(Config::log_path) {
        if let Err(e) = logging::init(&log_path, &config.log_level) {
            eprintln!("warning: logging disabled: {}", e);
        }
    }
    if let Some(e) = load_error {
        let error = format!("{:#}", e);
        tracing::warn!(%error, "ignoring config file");
    }
    tracing::info!(api_base_url = %config.api_base_url, "starting campaign-tui");

    match cli.command {
        Some(Command::List { json }) => run_list(&config, json),
        Some(Command::Publish { id }) => run_publish(&config, &id),
        None => run_tui(config, needs_setup),
    }
}

fn client_for(config: &Config) -> HttpCampaignClient {
    HttpCampaignClient::new(&config.api_base_url, config.request_timeout())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Headless commands
// ═══════════════════════════════════════════════════════════════════════════════

fn run_list(config: &Config, json: bool) -> Result<()> {
    let campaigns = client_for(config).list_campaigns()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&campaigns)?);
        return Ok(());
    }

    if campaigns.is_empty() {
        println!("No campaigns.");
        return Ok(());
    }
    for line in campaign_table(&campaigns, &config.currency_symbol) {
        println!("{}", line);
    }
    Ok(())
}

fn run_publish(config: &Config, id: &str) -> Result<()> {
    let client = client_for(config);
    client.publish_campaign(id)?;

    // Read back the server's view instead of assuming the outcome
    let campaigns = client.list_campaigns()?;
    match campaigns.iter().find(|c| c.id == id) {
        Some(c) => println!(
            "Published {} ({}){}",
            c.name,
            c.status,
            c.google_campaign_id
                .as_deref()
                .map(|g| format!(", Google campaign {}", g))
                .unwrap_or_default()
        ),
        None => println!("Published {}", id),
    }
    Ok(())
}

/// Pad to `width` terminal columns
fn pad(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(used)))
}

fn campaign_table(campaigns: &[Campaign], currency_symbol: &str) -> Vec<String> {
    let headers = ["ID", "NAME", "STATUS", "BUDGET", "START", "END"];
    let rows: Vec<[String; 6]> = campaigns
        .iter()
        .map(|c| {
            [
                c.id.clone(),
                c.name.clone(),
                c.status.to_string(),
                c.formatted_budget(currency_symbol),
                c.start_date.clone(),
                c.end_date.clone(),
            ]
        })
        .collect();

    let mut widths = headers.map(|h| h.width());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let render = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| pad(cell, *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![render(headers.to_vec())];
    for row in &rows {
        lines.push(render(row.iter().map(String::as_str).collect()));
    }
    lines
}

// ═══════════════════════════════════════════════════════════════════════════════
// Interactive UI
// ═══════════════════════════════════════════════════════════════════════════════

fn run_tui(config: Config, needs_setup: bool) -> Result<()> {
    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    // Create app state
    let mode = if needs_setup {
        AppMode::Setup
    } else {
        AppMode::Running
    };
    let mut app = App::new(config, mode);
    app.init()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    // Handle any errors
    if let Err(err) = result {
        tracing::error!(error = ?err, "event loop failed");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                tracing::error!(error = %e, "draw failed");
            }
        })?;

        // Poll for events
        if let Some(event) = tui.next_event()? {
            // Convert event to action
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                tracing::trace!(action = %a, "update");
                current_action = app.update(a)?;
            }
        } else {
            // No event - send a tick to pick up finished requests
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}
