//! Appending timestamped lines to trigger files

use crate::core::Variant;
use crate::error::Result;
use crate::hosting::{HostingApi, RepoRef};
use crate::pipeline::context::{CommitPayload, RunContext, StagedKind};
use crate::pipeline::settings::{trigger_line, TIMESTAMP_FORMAT};
use log::{debug, info};
use std::path::PathBuf;

/// Stages updated trigger files for the notes commit
pub struct TriggerFileUpdater<'a, H: HostingApi + ?Sized> {
    api: &'a H,
    repo: &'a RepoRef,
    branch: &'a str,
    variant: Variant,
}

impl<'a, H: HostingApi + ?Sized> TriggerFileUpdater<'a, H> {
    pub fn new(api: &'a H, repo: &'a RepoRef, branch: &'a str, variant: Variant) -> Self {
        Self {
            api,
            repo,
            branch,
            variant,
        }
    }

    /// Append a line to `trigger_path` and stage it into `payload`.
    ///
    /// A trigger already staged in this run is left alone and `None` is
    /// returned. A trigger file missing on the remote starts out empty.
    pub fn touch(
        &self,
        ctx: &RunContext,
        payload: &mut CommitPayload,
        trigger_path: &str,
        had_updates: bool,
    ) -> Result<Option<PathBuf>> {
        if payload.contains(trigger_path) {
            debug!("{} already staged", trigger_path);
            return Ok(None);
        }

        let existing = self
            .api
            .file_content(self.repo, trigger_path, self.branch)?
            .unwrap_or_default();
        let timestamp = ctx.now().format(TIMESTAMP_FORMAT).to_string();
        let content = existing + &trigger_line(self.variant, had_updates, &timestamp);

        let local = ctx.stage_text(trigger_path, &content)?;
        payload.insert(trigger_path, local.clone(), StagedKind::Text);
        info!("Touched trigger {}", trigger_path);
        Ok(Some(local))
    }
}
