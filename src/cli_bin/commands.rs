//! CLI command handlers that bridge CLI arguments to library operations

use crate::cli_bin::args::*;
use log::{debug, info, warn};
use matterpress::error::Result;
use matterpress::io::{resolve_files, write_atomic};
use matterpress::pipeline::{run_covers, run_front_matter, RunContext, RunSummary, Settings};
use matterpress::{CoverRenderer, GithubClient, Reconciler, Variant};

/// Execute the covers command
pub fn covers_command(args: CoversArgs) -> Result<()> {
    debug!("Executing covers command");

    let settings = Settings {
        assets_dir: args.assets.assets,
        ..Settings::default()
    };
    let api = GithubClient::new(args.auth.token)?;
    let mut renderer = CoverRenderer::new(&settings.assets_dir);

    let summary = run_covers(&api, &settings, &mut renderer, RunContext::new()?)?;
    report(&summary);
    Ok(())
}

/// Execute the front-matter command
pub fn front_matter_command(args: FrontMatterArgs) -> Result<()> {
    debug!("Executing front-matter command");

    let settings = Settings::default();
    let api = GithubClient::new(args.auth.token)?;

    let summary = run_front_matter(&api, &settings, RunContext::new()?)?;
    report(&summary);
    Ok(())
}

/// Execute the local command
pub fn local_command(args: LocalArgs) -> Result<()> {
    debug!("Executing local command with args: {:?}", args);

    let files = resolve_files(&args.files);
    if files.is_empty() {
        warn!("No files found to process");
        return Ok(());
    }

    let variant: Variant = args.variant.into();
    let reconciler = Reconciler::for_today(variant, Settings::default().cdn_prefix());
    let mut renderer = CoverRenderer::new(&args.assets.assets);
    let mut processed_count = 0;

    for file in &files {
        debug!("Processing file: {}", file.display());
        let outcome = reconciler.reconcile_file(file)?;

        if let Some(updated) = &outcome.content {
            processed_count += 1;
            if args.dry_run {
                println!("--- Dry run: {} ---", file.display());
                println!("{}", updated);
            } else {
                write_atomic(file, updated)?;
                info!("Updated: {}", file.display());
            }
        }

        if let Some(job) = &outcome.cover {
            match &args.covers_dir {
                Some(dir) if !args.dry_run => {
                    let output = dir.join(&job.file_name);
                    let style = renderer.render(&job.title, &output)?;
                    info!("Rendered {:?} cover: {}", style, output.display());
                }
                _ => info!("Cover needed: {} ({})", job.file_name, job.title),
            }
        }
    }

    info!("Processed {} files", processed_count);
    Ok(())
}

/// Execute the render command
pub fn render_command(args: RenderArgs) -> Result<()> {
    debug!("Executing render command with args: {:?}", args);

    let assets = args.assets.assets;
    match args.style {
        Some(style) => {
            let renderer = CoverRenderer::new(&assets);
            renderer.render_with(style.into(), &args.title, &args.output)?;
            info!("Rendered {:?} cover: {}", style, args.output.display());
        }
        None => {
            let mut renderer = match args.seed {
                Some(seed) => CoverRenderer::seeded(&assets, seed),
                None => CoverRenderer::new(&assets),
            };
            let style = renderer.render(&args.title, &args.output)?;
            info!("Rendered {:?} cover: {}", style, args.output.display());
        }
    }
    Ok(())
}

fn report(summary: &RunSummary) {
    info!(
        "Updated {} document(s), rendered {} cover(s)",
        summary.documents, summary.covers
    );
    if let Some(sha) = &summary.covers_commit {
        info!("Covers commit: {}", sha);
    }
    match &summary.notes_commit {
        Some(sha) => info!("Notes commit: {}", sha),
        None => info!("No notes commit needed"),
    }
}
