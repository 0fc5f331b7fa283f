use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kiosk", about = concat!("kiosk v", env!("CARGO_PKG_VERSION"), " - a directory of listings from a static payload"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to the directory payload
    #[arg(short = 'f', long = "file", global = true, default_value = "data.json")]
    pub file: PathBuf,

    /// Path to a kiosk.toml config
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List rows, optionally filtered and sorted
    List(ListArgs),
    /// Print the navigation menu with row counts
    Menu,
    /// Resolve a route path and list its rows
    Route(RouteArgs),
    /// Validate the payload and report data issues
    Check,
}

#[derive(Args)]
pub struct ListArgs {
    /// Filter by category slug
    #[arg(long)]
    pub category: Option<String>,

    /// Filter by tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Filter by search query
    #[arg(long)]
    pub search: Option<String>,

    /// Show only featured rows (the default view)
    #[arg(long)]
    pub featured: bool,

    /// Show only rows inside the new-window
    #[arg(long = "new")]
    pub new: bool,

    /// Sort order: date, title, or featured
    #[arg(long, default_value = "date")]
    pub sort: String,
}

#[derive(Args)]
pub struct RouteArgs {
    /// Route fragment, e.g. "category/tools/editors" or "search/rust"
    pub path: String,

    /// Sort order: date, title, or featured
    #[arg(long, default_value = "date")]
    pub sort: String,
}
