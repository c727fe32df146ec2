use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pitwall_core::{ImportType, Page, SessionId};
use pitwall_engine::DEFAULT_BASE_URL;

#[derive(Debug, Parser)]
#[command(name = "pitwall", version, about = "Motorsport results console")]
pub struct Cli {
    /// Base URL of the results API.
    #[arg(long, env = "PITWALL_API_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    pub api_base_url: String,

    /// Administrator API key. Overrides the stored credential.
    #[arg(long, env = "PITWALL_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Also write a debug log to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify an API key and store it for later commands.
    Login {
        #[arg(long)]
        key: String,
    },
    /// Forget the stored API key.
    Logout,
    #[command(subcommand)]
    Series(SeriesCommand),
    #[command(subcommand)]
    Circuits(CircuitCommand),
    /// Events of a series in one season.
    Events {
        #[arg(long)]
        series_id: i64,
        #[arg(long)]
        year: i32,
        #[command(flatten)]
        filter: FilterArg,
    },
    /// Sessions of an event.
    Sessions {
        #[arg(long)]
        event_id: i64,
        #[command(flatten)]
        filter: FilterArg,
    },
    /// One page of results for a session.
    Results {
        #[arg(long)]
        session_id: SessionId,
        #[arg(long, default_value_t = 0)]
        offset: u32,
        #[arg(long, default_value_t = Page::DEFAULT_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
        limit: u32,
        #[command(flatten)]
        filter: FilterArg,
    },
    /// Submit an import job and follow it until it finishes.
    Import(ImportArgs),
}

#[derive(Debug, Subcommand)]
pub enum SeriesCommand {
    List {
        #[command(flatten)]
        filter: FilterArg,
    },
    Create {
        #[arg(long)]
        name: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum CircuitCommand {
    List {
        #[command(flatten)]
        filter: FilterArg,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        length_meters: f64,
        #[arg(long)]
        country: String,
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[derive(Debug, Args)]
pub struct FilterArg {
    /// Case-insensitive text the listed rows must contain.
    #[arg(long, default_value = "")]
    pub filter: String,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    #[arg(long)]
    pub session_id: SessionId,

    /// Source results page or timecard URL.
    #[arg(long, value_parser = non_blank)]
    pub url: String,

    /// Source format, `imsa` or `wec`.
    #[arg(long = "type", default_value = "imsa")]
    pub import_type: ImportType,

    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_interval_secs: u64,

    /// Stop following the job after this many seconds. The backend keeps running it.
    #[arg(long)]
    pub detach_after_secs: Option<u64>,
}

fn non_blank(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err("must not be empty".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}
