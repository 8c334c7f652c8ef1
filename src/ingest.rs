//! Ingestion: fetch rows from the configured source and build the catalog.
//!
//! This is the only asynchronous step of a session. It suspends while the
//! source downloads or reads the CSV and resumes once with every row; all
//! later work (entity building, hash decoding, transitions) is synchronous.
//! If fetching fails nothing is built and nothing is rendered.

use anyhow::Result;
use competency_lens_core::builder::{build_entities, BuildSummary};
use competency_lens_core::models::Row;
use competency_lens_core::navigation::{HistoryHost, NoHistory, SessionHistory};
use competency_lens_core::repository::Repository;
use tracing::info;

use crate::config::Config;
use crate::render::Renderer;
use crate::source::source_from_config;
use crate::view::StandardView;

/// Fetch the full row sequence from `[source]`.
pub async fn load_rows(config: &Config) -> Result<Vec<Row>> {
    let source = source_from_config(config)?;
    info!(source = %source.name(), "fetching rows");
    let rows = source.fetch_rows().await?;
    info!(rows = rows.len(), "rows fetched");
    Ok(rows)
}

/// Fetch rows and build a repository, without any selection state.
pub async fn load_catalog(config: &Config) -> Result<(Repository, BuildSummary)> {
    let rows = load_rows(config).await?;
    let mut repo = Repository::new(config.catalog.all_description.clone());
    let summary = build_entities(&mut repo, rows, &config.fields);
    Ok((repo, summary))
}

/// The history host for a session starting at `hash`.
pub fn history_for(config: &Config, hash: &str) -> Box<dyn HistoryHost> {
    if config.history.enabled {
        Box::new(SessionHistory::new(hash))
    } else {
        Box::new(NoHistory::new(hash))
    }
}

/// Fetch rows and open a view at `hash`. The first frame is rendered
/// before this returns.
pub async fn open_view<R: Renderer>(
    config: &Config,
    hash: &str,
    renderer: R,
) -> Result<StandardView<R>> {
    let rows = load_rows(config).await?;
    let mut view = StandardView::new(
        config.catalog.all_description.clone(),
        config.fields.clone(),
        history_for(config, hash),
        renderer,
    );
    view.on_parse_complete(rows)?;
    Ok(view)
}

/// `lens lenses`: list every lens with its href and standard count.
pub async fn run_lenses(config: &Config) -> Result<()> {
    let (repo, summary) = load_catalog(config).await?;

    println!(
        "{} standards ({} rows, {} inactive)",
        summary.accepted, summary.rows, summary.rejected
    );
    println!();
    println!("{:<36} {:<36} {:>6}", "LENS", "HREF", "COUNT");
    for lens in repo.lenses() {
        println!(
            "{:<36} {:<36} {:>6}",
            lens.name,
            format!("#/{}/", lens.href),
            repo.count_for(lens)
        );
    }
    Ok(())
}
