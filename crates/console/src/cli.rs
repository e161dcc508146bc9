use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use client::config::{API_TOKEN_ENV, API_URL_ENV};
use models::Resource;

#[derive(Parser, Debug)]
#[command(name = "admin-console")]
#[command(about = "Browse and manage store records from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Base URL of the admin API
    #[arg(long, env = API_URL_ENV, global = true)]
    pub api_url: Option<String>,

    /// Bearer token sent with every request
    #[arg(long, env = API_TOKEN_ENV, global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Config file (defaults to <config dir>/admin-console/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List one page of records
    List(ListArgs),

    /// Show a single record
    Show {
        resource: Resource,
        id: String,
    },

    /// Delete a record after confirmation
    Delete {
        resource: Resource,
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Approve or reject a pending review
    Moderate {
        id: String,

        #[arg(long)]
        reject: bool,

        #[arg(long, default_value = "")]
        notes: String,
    },
}

#[derive(Args, Debug)]
pub struct ListArgs {
    pub resource: Resource,

    /// One-based page number
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    #[arg(long)]
    pub limit: Option<u32>,

    #[arg(long)]
    pub search: Option<String>,

    /// `key=value`, repeatable
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Print the raw rows as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty filter key in `{raw}`"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}
