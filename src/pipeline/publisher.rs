//! Committing staged files through the hosting API
//!
//! Blobs, then a tree on top of the branch head, then a commit, then the ref
//! move. The ref is only moved once everything before it succeeded.

use crate::error::Result;
use crate::hosting::{BlobContent, HostingApi, RepoRef, TreeEntry};
use crate::pipeline::context::{CommitPayload, StagedKind};
use log::{debug, info};
use std::fs;

/// Publishes a [`CommitPayload`] as one commit on a branch
pub struct CommitPublisher<'a, H: HostingApi + ?Sized> {
    api: &'a H,
    repo: &'a RepoRef,
    branch: &'a str,
}

impl<'a, H: HostingApi + ?Sized> CommitPublisher<'a, H> {
    pub fn new(api: &'a H, repo: &'a RepoRef, branch: &'a str) -> Self {
        Self { api, repo, branch }
    }

    /// Commit `payload` with `message`; returns the new commit sha, or `None`
    /// when there was nothing to commit.
    pub fn publish(&self, message: &str, payload: &CommitPayload) -> Result<Option<String>> {
        if payload.is_empty() {
            info!("Nothing to commit to {}", self.repo);
            return Ok(None);
        }

        let head = self.api.branch_head(self.repo, self.branch)?;

        let mut entries = Vec::with_capacity(payload.len());
        for (repo_path, staged) in payload.iter() {
            debug!("Processing: {}", repo_path);
            let content = match staged.kind {
                StagedKind::Binary => BlobContent::Binary(fs::read(&staged.local)?),
                StagedKind::Text => BlobContent::Text(fs::read_to_string(&staged.local)?),
            };
            let sha = self.api.create_blob(self.repo, &content)?;
            entries.push(TreeEntry {
                path: repo_path.to_string(),
                sha,
            });
        }

        let base_tree = self.api.commit_tree(self.repo, &head)?;
        let tree = self.api.create_tree(self.repo, &base_tree, &entries)?;
        let commit = self
            .api
            .create_commit(self.repo, message, &tree, &[head])?;
        self.api.update_ref(self.repo, self.branch, &commit)?;

        info!(
            "Committed {} file(s) to {}@{} as {}",
            entries.len(),
            self.repo,
            self.branch,
            commit
        );
        Ok(Some(commit))
    }
}
