//! Pulling the latest commit's markdown files through the reconciler

use crate::core::Reconciler;
use crate::cover::CoverPainter;
use crate::error::Result;
use crate::hosting::{ChangeRecord, HostingApi, RepoRef};
use crate::pipeline::context::{CommitPayload, RunContext, StagedKind};
use crate::pipeline::settings::MARKDOWN_EXTENSION;
use log::{debug, info, warn};
use std::path::Path;

/// What a collection pass produced
#[derive(Debug, Default)]
pub struct Collected {
    /// Rendered covers, keyed by their path in the cover repository
    pub covers: CommitPayload,
    /// Reconciled documents, keyed by their path in the notes repository
    pub documents: CommitPayload,
}

impl Collected {
    pub fn has_updates(&self) -> bool {
        !self.covers.is_empty() || !self.documents.is_empty()
    }
}

/// Walks the files of the branch head commit
pub struct ChangeCollector<'a, H: HostingApi + ?Sized> {
    api: &'a H,
    repo: &'a RepoRef,
    branch: &'a str,
    reconciler: &'a Reconciler,
    covers_dir: &'a str,
}

impl<'a, H: HostingApi + ?Sized> ChangeCollector<'a, H> {
    pub fn new(
        api: &'a H,
        repo: &'a RepoRef,
        branch: &'a str,
        reconciler: &'a Reconciler,
        covers_dir: &'a str,
    ) -> Self {
        Self {
            api,
            repo,
            branch,
            reconciler,
            covers_dir,
        }
    }

    /// Files changed by the most recent commit on the branch
    pub fn changed_files(&self) -> Result<Vec<ChangeRecord>> {
        let head = self.api.branch_head(self.repo, self.branch)?;
        debug!("{}@{} is at {}", self.repo, self.branch, head);
        self.api.commit_files(self.repo, &head)
    }

    /// Reconcile every surviving markdown file of the head commit.
    ///
    /// Category flags on `ctx` are raised for every changed path, markdown or
    /// not. Cover jobs are painted only when a painter is given.
    pub fn collect(
        &self,
        ctx: &mut RunContext,
        mut painter: Option<&mut dyn CoverPainter>,
    ) -> Result<Collected> {
        let mut collected = Collected::default();

        for record in self.changed_files()? {
            let filename = record.filename.as_str();
            ctx.flags.observe(filename);

            if record.status.is_gone() {
                debug!("Skipping {} ({:?})", filename, record.status);
                continue;
            }
            if !filename.ends_with(MARKDOWN_EXTENSION) {
                continue;
            }

            let Some(content) = self.api.file_content(self.repo, filename, self.branch)? else {
                warn!("{} is listed in the commit but missing on {}", filename, self.branch);
                continue;
            };

            let outcome = self
                .reconciler
                .reconcile(Some(Path::new(filename)), Some(&content))?;

            if let Some(updated) = outcome.content {
                let local = ctx.stage_text(filename, &updated)?;
                collected.documents.insert(filename, local, StagedKind::Text);
                info!("Updated front matter: {}", filename);
            }

            if let Some(job) = outcome.cover {
                let Some(painter) = painter.as_mut() else {
                    warn!("No renderer for cover {} of {}", job.file_name, filename);
                    continue;
                };
                let repo_path = format!("{}{}", self.covers_dir, job.file_name);
                let local = ctx.scratch_path(&repo_path);
                painter.paint(&job.title, &local)?;
                collected.covers.insert(repo_path, local, StagedKind::Binary);
                info!("Rendered cover {} for {}", job.file_name, filename);
            }
        }

        Ok(collected)
    }
}
