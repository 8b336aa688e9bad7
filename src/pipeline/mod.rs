//! One-shot runs against the notes repository
//!
//! A run reads the files of the latest notes commit, reconciles the markdown
//! among them, optionally renders covers, touches trigger files for the
//! categories it saw and commits everything back. Each step finishes before
//! the next starts and the first error aborts the run.

pub mod collector;
pub mod context;
pub mod publisher;
pub mod settings;
pub mod trigger;

pub use collector::{ChangeCollector, Collected};
pub use context::{CategoryFlags, CommitPayload, RunContext, StagedFile, StagedKind};
pub use publisher::CommitPublisher;
pub use settings::Settings;
pub use trigger::TriggerFileUpdater;

use crate::core::{Reconciler, Variant};
use crate::cover::CoverPainter;
use crate::error::Result;
use crate::hosting::HostingApi;
use log::info;
use settings::{commit_message, COVERS_COMMIT_MESSAGE};

/// What a run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub documents: usize,
    pub covers: usize,
    pub flags: CategoryFlags,
    pub notes_commit: Option<String>,
    pub covers_commit: Option<String>,
}

/// Reconcile titles, cover URLs and dates, render missing covers and publish.
pub fn run_covers<H: HostingApi + ?Sized>(
    api: &H,
    settings: &Settings,
    painter: &mut dyn CoverPainter,
    ctx: RunContext,
) -> Result<RunSummary> {
    run(api, settings, Variant::Covers, Some(painter), ctx)
}

/// Reconcile titles, descriptions and dates and publish.
pub fn run_front_matter<H: HostingApi + ?Sized>(
    api: &H,
    settings: &Settings,
    ctx: RunContext,
) -> Result<RunSummary> {
    run(api, settings, Variant::FrontMatter, None, ctx)
}

fn run<H: HostingApi + ?Sized>(
    api: &H,
    settings: &Settings,
    variant: Variant,
    painter: Option<&mut dyn CoverPainter>,
    mut ctx: RunContext,
) -> Result<RunSummary> {
    let notes = api.repository(&settings.owner, &settings.notes_repo)?;
    let reconciler = Reconciler::new(variant, ctx.now().date(), settings.cdn_prefix());
    info!("Reconciling {} ({:?}) for {}", notes, variant, reconciler.today());

    let collected = ChangeCollector::new(
        api,
        &notes,
        &settings.branch,
        &reconciler,
        &settings.covers_dir,
    )
    .collect(&mut ctx, painter)?;

    let had_updates = collected.has_updates();
    let Collected {
        covers,
        documents: mut notes_payload,
    } = collected;

    let triggers = TriggerFileUpdater::new(api, &notes, &settings.branch, variant);
    if ctx.flags.publish {
        triggers.touch(&ctx, &mut notes_payload, &settings.publish_trigger, had_updates)?;
    }
    if ctx.flags.journal {
        triggers.touch(&ctx, &mut notes_payload, &settings.journal_trigger, had_updates)?;
    }

    let covers_commit = if covers.is_empty() {
        None
    } else {
        let cover_repo = api.repository(&settings.owner, &settings.cover_repo)?;
        CommitPublisher::new(api, &cover_repo, &settings.branch)
            .publish(COVERS_COMMIT_MESSAGE, &covers)?
    };

    let notes_commit = CommitPublisher::new(api, &notes, &settings.branch)
        .publish(commit_message(variant), &notes_payload)?;

    Ok(RunSummary {
        documents: notes_payload
            .paths()
            .filter(|path| path.ends_with(settings::MARKDOWN_EXTENSION))
            .count(),
        covers: covers.len(),
        flags: ctx.flags,
        notes_commit,
        covers_commit,
    })
}
