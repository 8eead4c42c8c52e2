//! linkshelf - terminal front end for a shared link collection.
//!
//! Visitors list, search, sort and page through links. With the owner
//! password, links can be added, edited and removed; each change is followed
//! by a reload from the remote API.

mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "linkshelf", version, about = "Browse and curate a shared link collection")]
struct Cli {
    /// Config file (default: <config dir>/linkshelf/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Link API endpoint, overriding config and LINKSHELF_ENDPOINT
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show one page of links
    List {
        /// Filter by description, URL or tag
        #[arg(long, short)]
        search: Option<String>,
        /// timestamp-desc, timestamp-asc, url-asc, url-desc, description-asc, description-desc
        #[arg(long, default_value = "timestamp-desc")]
        sort: String,
        /// 1-based page; clamped to the last page
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Read links from a backup file instead of the API
        #[arg(long)]
        from: Option<PathBuf>,
    },
    /// Add a link (owner)
    Add {
        #[arg(long)]
        url: String,
        #[arg(long)]
        description: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },
    /// Edit the link at a row (owner)
    Edit {
        #[arg(long)]
        row: u64,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Comma-separated tags, replacing the current ones
        #[arg(long)]
        tags: Option<String>,
    },
    /// Remove the link at a row (owner)
    Remove {
        #[arg(long)]
        row: u64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Write every loaded link to a JSON backup
    Export {
        /// Output file (default: backup.file_name from config)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Load a JSON backup for local viewing
    Import { file: PathBuf },
    /// Show tags by how often they are used
    Tags {
        /// Only tags starting with this prefix
        #[arg(long)]
        prefix: Option<String>,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let cli = Cli::parse();
    let ctx = commands::Context::load(cli.config.as_deref(), cli.endpoint)?;

    match cli.command {
        Command::List {
            search,
            sort,
            page,
            from,
        } => commands::list(&ctx, search, &sort, page, from.as_deref()).await?,
        Command::Add {
            url,
            description,
            tags,
        } => commands::add(&ctx, url, description, tags).await?,
        Command::Edit {
            row,
            url,
            description,
            tags,
        } => commands::edit(&ctx, row, url, description, tags).await?,
        Command::Remove { row, yes } => commands::remove(&ctx, row, yes).await?,
        Command::Export { output } => commands::export(&ctx, output).await?,
        Command::Import { file } => commands::import(&ctx, &file)?,
        Command::Tags { prefix, limit } => commands::tags(&ctx, prefix.as_deref(), limit).await?,
    }

    Ok(())
}
