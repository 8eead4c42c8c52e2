//! Subcommand implementations.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::warn;

use linkshelf_core::config::{ConfigError, LinkshelfConfig};
use linkshelf_core::export::{export_summary, export_to_path};
use linkshelf_core::import::{import_from_path, import_summary};
use linkshelf_core::mutation::{LinkDraft, MutationCoordinator, MutationOutcome, MutationSettings};
use linkshelf_core::query::{QueryState, SortKey};
use linkshelf_core::repository::{refresh, LinkRepository, SharedRepository};
use linkshelf_core::session::Session;
use linkshelf_core::store::{RecordStore, SheetStore};
use linkshelf_core::Result;

use crate::render;

/// Environment variable holding the owner password.
pub const PASSWORD_ENV: &str = "LINKSHELF_PASSWORD";

pub struct Context {
    config: LinkshelfConfig,
}

impl Context {
    pub fn load(path: Option<&Path>, endpoint: Option<String>) -> std::result::Result<Self, ConfigError> {
        let mut config = LinkshelfConfig::load(path)?;
        if let Some(endpoint) = endpoint {
            config.api.endpoint = endpoint.trim().to_string();
            config.validate()?;
        }
        Ok(Self { config })
    }

    fn store(&self) -> Result<Arc<dyn RecordStore>> {
        self.config.require_endpoint()?;
        Ok(Arc::new(SheetStore::from_config(&self.config.api)?))
    }

    fn page_size(&self) -> usize {
        self.config.view.page_size
    }

    fn coordinator(&self, store: Arc<dyn RecordStore>, repository: SharedRepository) -> MutationCoordinator {
        MutationCoordinator::new(store, repository, MutationSettings::from(&self.config.sync))
    }
}

fn prompt(message: &str) -> io::Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn owner_session() -> Result<Session> {
    let password = match std::env::var(PASSWORD_ENV) {
        Ok(password) if !password.trim().is_empty() => password,
        _ => prompt("Owner password: ")?,
    };
    let mut session = Session::new();
    session.login(&password)?;
    Ok(session)
}

/// Wait for the post-mutation reload and show the refreshed first page.
async fn finish(ctx: &Context, repository: &SharedRepository, outcome: MutationOutcome) -> Result<()> {
    if let Err(e) = outcome.reload.wait().await {
        warn!(error = %e, "reload after change failed");
        eprintln!("Warning: {}", e);
    }
    let repository = repository.read().await;
    render::page(&repository, &QueryState::new(), ctx.page_size(), true);
    Ok(())
}

pub async fn list(
    ctx: &Context,
    search: Option<String>,
    sort: &str,
    page: usize,
    from: Option<&Path>,
) -> Result<()> {
    let mut repository = LinkRepository::new();
    match from {
        Some(path) => {
            let report = import_from_path(&mut repository, path)?;
            println!("{}", import_summary(report.loaded));
        }
        None => {
            let store = ctx.store()?;
            if let Err(e) = repository.load(store.as_ref()).await {
                eprintln!("Warning: {}", e);
            }
        }
    }

    let sort = sort.parse::<SortKey>().unwrap_or_else(|e| {
        eprintln!("Warning: {}, using {}", e, SortKey::default());
        SortKey::default()
    });
    let state = QueryState::new()
        .with_sort(sort)
        .with_term(search.unwrap_or_default())
        .with_page(page);

    let owner = std::env::var(PASSWORD_ENV).is_ok();
    render::page(&repository, &state, ctx.page_size(), owner);
    Ok(())
}

pub async fn add(
    ctx: &Context,
    url: String,
    description: Option<String>,
    tags: Option<String>,
) -> Result<()> {
    let store = ctx.store()?;
    let session = owner_session()?;
    let repository = LinkRepository::new().into_shared();
    let mut coordinator = ctx.coordinator(store, repository.clone());

    let mut draft = LinkDraft::new(url);
    if let Some(description) = description {
        draft = draft.with_description(description);
    }
    if let Some(tags) = tags {
        draft = draft.with_tags(tags);
    }

    let outcome = coordinator.submit(session.credential(), &draft).await?;
    if let Some(record) = outcome.record() {
        println!("Added {} ({})", record.url, record.identifier);
    }
    finish(ctx, &repository, outcome).await
}

pub async fn edit(
    ctx: &Context,
    row: u64,
    url: Option<String>,
    description: Option<String>,
    tags: Option<String>,
) -> Result<()> {
    let store = ctx.store()?;
    let session = owner_session()?;
    let repository = LinkRepository::new().into_shared();
    refresh(&repository, store.as_ref()).await?;
    let mut coordinator = ctx.coordinator(store, repository.clone());

    let mut draft = coordinator.begin_edit(row).await?;
    if let Some(url) = url {
        draft.url = url;
    }
    if let Some(description) = description {
        draft.description = description;
    }
    if let Some(tags) = tags {
        draft.tags = tags;
    }

    let outcome = coordinator.submit(session.credential(), &draft).await?;
    if let Some(record) = outcome.record() {
        println!("Updated {} ({})", record.url, record.identifier);
    }
    finish(ctx, &repository, outcome).await
}

pub async fn remove(ctx: &Context, row: u64, yes: bool) -> Result<()> {
    let store = ctx.store()?;
    let session = owner_session()?;
    let repository = LinkRepository::new().into_shared();
    refresh(&repository, store.as_ref()).await?;
    let mut coordinator = ctx.coordinator(store, repository.clone());

    let pending = coordinator.prepare_removal(row).await?;
    println!("{} - {}", pending.record.url, pending.record.description);
    if !yes {
        let answer = prompt(&format!("{} [y/N] ", pending.prompt()))?;
        if !matches!(answer.to_lowercase().as_str(), "y" | "yes") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let outcome = coordinator.confirm_removal(session.credential(), pending).await?;
    println!("Removed row {}", row);
    finish(ctx, &repository, outcome).await
}

pub async fn export(ctx: &Context, output: Option<PathBuf>) -> Result<()> {
    let store = ctx.store()?;
    let mut repository = LinkRepository::new();
    repository.load(store.as_ref()).await?;

    let path = output.unwrap_or_else(|| PathBuf::from(&ctx.config.backup.file_name));
    let count = export_to_path(&repository, &path)?;
    println!("{} ({})", export_summary(count), path.display());
    Ok(())
}

pub fn import(ctx: &Context, file: &Path) -> Result<()> {
    let mut repository = LinkRepository::new();
    let report = import_from_path(&mut repository, file)?;
    println!("{}", import_summary(report.loaded));
    if report.shadowed > 0 {
        println!("{} duplicate links hidden.", report.shadowed);
    }
    render::page(&repository, &QueryState::new(), ctx.page_size(), false);
    Ok(())
}

pub async fn tags(ctx: &Context, prefix: Option<&str>, limit: usize) -> Result<()> {
    let store = ctx.store()?;
    let mut repository = LinkRepository::new();
    repository.load(store.as_ref()).await?;

    let index = repository.tag_index();
    render::tags(&index.complete(prefix.unwrap_or(""), limit));
    Ok(())
}
