use clap::Parser;
use anyhow::{bail, Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use outputdiff::{
    cli::Cli,
    export::{ComparisonExport, ExportConfig, ReportExporter},
    ComparisonSession, DiffCache, DocumentLoader, InputWatcher, OutputDiffConfig,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(err) = cli.validate() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }

    cli.setup_logging();

    let config = OutputDiffConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let loader = DocumentLoader::new(config.ingest.clone());
    let mut cache = DiffCache::new(config.cache.diff_cache_size);

    tracing::info!("Comparing {} input path(s)", cli.paths.len());

    if cli.watch {
        run_watch_mode(&cli, &config, &loader, &mut cache)
    } else {
        run_once(&cli, &config, &loader, &mut cache)
    }
}

fn run_once(
    cli: &Cli,
    config: &OutputDiffConfig,
    loader: &DocumentLoader,
    cache: &mut DiffCache,
) -> Result<()> {
    let session = build_session(cli, loader)?;
    let export = compare(&session, cache)?;
    let exporter = exporter_for(cli, config);

    match &cli.output {
        Some(path) => exporter.export_to_file(&export, path)?,
        None => exporter.export_to_writer(&export, &mut std::io::stdout().lock())?,
    }

    Ok(())
}

fn run_watch_mode(
    cli: &Cli,
    config: &OutputDiffConfig,
    loader: &DocumentLoader,
    cache: &mut DiffCache,
) -> Result<()> {
    let watcher = InputWatcher::new(&cli.paths, config.watcher.debounce_duration())?;

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    print_comparison(cli, config, loader, cache);
    eprintln!("Watching {} path(s), press Ctrl+C to quit", cli.paths.len());

    while running.load(Ordering::SeqCst) {
        let Some(events) = watcher.next_batch(Duration::from_millis(100), config.watcher.debounce_duration()) else {
            continue;
        };
        for event in &events {
            tracing::debug!("Input changed: {:?}", event);
        }

        println!("--- {} ---", chrono::Local::now().format("%H:%M:%S"));
        print_comparison(cli, config, loader, cache);
        tracing::debug!("Diff cache: {} hits, {} misses", cache.hits(), cache.misses());
    }

    Ok(())
}

/// Compare and print; failures are reported without leaving watch mode
fn print_comparison(cli: &Cli, config: &OutputDiffConfig, loader: &DocumentLoader, cache: &mut DiffCache) {
    let result = build_session(cli, loader)
        .and_then(|session| compare(&session, cache))
        .and_then(|export| {
            exporter_for(cli, config)
                .export_to_writer(&export, &mut std::io::stdout().lock())
                .map_err(Into::into)
        });

    if let Err(err) = result {
        tracing::error!("Comparison failed: {:#}", err);
    }
}

fn build_session(cli: &Cli, loader: &DocumentLoader) -> Result<ComparisonSession> {
    let outcome = loader.load_paths(&cli.paths)?;
    if outcome.documents.len() < 2 {
        bail!(
            "Need at least two readable documents to compare, found {}",
            outcome.documents.len()
        );
    }

    let mut session = ComparisonSession::new();
    session.add_documents(outcome.documents);

    if let Some(base) = cli.base {
        session.set_base(base).context("Invalid --base")?;
    }

    if !cli.collapse {
        for index in 0..session.len() {
            session.set_expanded(index, true);
        }
    }

    Ok(session)
}

fn compare(session: &ComparisonSession, cache: &mut DiffCache) -> Result<ComparisonExport> {
    let reports = session.compute_diffs(cache);
    Ok(ComparisonExport::from_session(session, &reports)?)
}

fn exporter_for(cli: &Cli, config: &OutputDiffConfig) -> ReportExporter {
    ReportExporter::new(ExportConfig {
        format: cli.format,
        include_metadata: !cli.collapse,
        text: cli.text_options(config),
    })
}
