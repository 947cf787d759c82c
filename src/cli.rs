//! Command-line interface
//!
//! Without a subcommand the interactive terminal UI starts. `list` and
//! `publish` talk to the same API non-interactively.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "campaign-tui", version, about = "Create and publish advertising campaigns")]
pub struct Cli {
    /// Base URL of the campaigns API, e.g. http://localhost:5000
    #[arg(long, env = "CAMPAIGN_API_URL")]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds (0 waits indefinitely)
    #[arg(long, env = "CAMPAIGN_API_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Where to write the log (defaults to ~/.campaign-tui/campaign-tui.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print all campaigns
    List {
        /// Emit the raw JSON array instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Publish a draft campaign by id
    Publish {
        /// Campaign id as shown by `list`
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["campaign-tui", "--api-url", "http://x:1"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.api_url.as_deref(), Some("http://x:1"));
    }

    #[test]
    fn test_publish_requires_id() {
        assert!(Cli::try_parse_from(["campaign-tui", "publish"]).is_err());
        let cli = Cli::try_parse_from(["campaign-tui", "publish", "cmp-7"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Publish { ref id }) if id == "cmp-7"));
    }

    #[test]
    fn test_list_flags() {
        let cli = Cli::try_parse_from(["campaign-tui", "--timeout", "10", "list", "--json"]).unwrap();
        assert_eq!(cli.timeout, Some(10));
        assert!(matches!(cli.command, Some(Command::List { json: true })));
    }
}
