//! In-memory hosting API and cover painter shared by the integration tests

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use matterpress::error::{MatterPressError, Result};
use matterpress::hosting::{BlobContent, ChangeRecord, HostingApi, RepoRef, TreeEntry};
use matterpress::CoverPainter;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// 2024-03-09 10:30:00, the fixed clock of every test run
pub fn test_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommit {
    pub repo: String,
    pub message: String,
    pub tree: String,
    pub parents: Vec<String>,
}

/// Fake hosting service. Every repository starts at `head-<name>`.
#[derive(Default)]
pub struct FakeHost {
    pub changes: Vec<ChangeRecord>,
    pub files: HashMap<(String, String), String>,
    pub fail_on: Option<&'static str>,
    pub calls: RefCell<Vec<String>>,
    pub heads: RefCell<HashMap<String, String>>,
    pub blobs: RefCell<HashMap<String, BlobContent>>,
    pub trees: RefCell<HashMap<String, (String, Vec<TreeEntry>)>>,
    pub commits: RefCell<HashMap<String, RecordedCommit>>,
}

impl FakeHost {
    pub fn new(changes: Vec<ChangeRecord>) -> Self {
        Self {
            changes,
            ..Self::default()
        }
    }

    pub fn with_file(mut self, repo: &str, path: &str, content: &str) -> Self {
        self.files
            .insert((repo.to_string(), path.to_string()), content.to_string());
        self
    }

    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.fail_on = Some(operation);
        self
    }

    fn record(&self, operation: &str) -> Result<()> {
        self.calls.borrow_mut().push(operation.to_string());
        if self.fail_on == Some(operation) {
            return Err(MatterPressError::transport(operation, "502 Bad Gateway"));
        }
        Ok(())
    }

    pub fn called(&self, operation: &str) -> bool {
        self.calls.borrow().iter().any(|c| c == operation)
    }

    pub fn head(&self, repo: &str) -> String {
        self.heads
            .borrow()
            .get(repo)
            .cloned()
            .unwrap_or_else(|| format!("head-{}", repo))
    }

    /// Commits created in `repo`
    pub fn commits_in(&self, repo: &str) -> Vec<RecordedCommit> {
        self.commits
            .borrow()
            .values()
            .filter(|c| c.repo == repo)
            .cloned()
            .collect()
    }

    /// Paths of the tree the branch of `repo` now points at
    pub fn committed_paths(&self, repo: &str) -> Vec<String> {
        let head = self.head(repo);
        let commits = self.commits.borrow();
        let Some(commit) = commits.get(&head) else {
            return Vec::new();
        };
        let trees = self.trees.borrow();
        let mut paths: Vec<_> = trees[&commit.tree].1.iter().map(|e| e.path.clone()).collect();
        paths.sort();
        paths
    }

    /// Content committed at `path` by the current head of `repo`
    pub fn committed_file(&self, repo: &str, path: &str) -> Option<BlobContent> {
        let head = self.head(repo);
        let commits = self.commits.borrow();
        let commit = commits.get(&head)?;
        let trees = self.trees.borrow();
        let entry = trees[&commit.tree].1.iter().find(|e| e.path == path)?;
        self.blobs.borrow().get(&entry.sha).cloned()
    }

    pub fn committed_text(&self, repo: &str, path: &str) -> Option<String> {
        match self.committed_file(repo, path)? {
            BlobContent::Text(text) => Some(text),
            BlobContent::Binary(_) => None,
        }
    }
}

impl HostingApi for FakeHost {
    fn repository(&self, owner: &str, name: &str) -> Result<RepoRef> {
        self.record("repository")?;
        Ok(RepoRef::new(owner, name))
    }

    fn branch_head(&self, repo: &RepoRef, _branch: &str) -> Result<String> {
        self.record("branch_head")?;
        Ok(self.head(&repo.name))
    }

    fn commit_files(&self, _repo: &RepoRef, _sha: &str) -> Result<Vec<ChangeRecord>> {
        self.record("commit_files")?;
        Ok(self.changes.clone())
    }

    fn file_content(&self, repo: &RepoRef, path: &str, _branch: &str) -> Result<Option<String>> {
        self.record("file_content")?;
        Ok(self
            .files
            .get(&(repo.name.clone(), path.to_string()))
            .cloned())
    }

    fn create_blob(&self, _repo: &RepoRef, content: &BlobContent) -> Result<String> {
        self.record("create_blob")?;
        let mut blobs = self.blobs.borrow_mut();
        let sha = format!("blob-{}", blobs.len());
        blobs.insert(sha.clone(), content.clone());
        Ok(sha)
    }

    fn commit_tree(&self, _repo: &RepoRef, commit_sha: &str) -> Result<String> {
        self.record("commit_tree")?;
        Ok(format!("tree-of-{}", commit_sha))
    }

    fn create_tree(&self, _repo: &RepoRef, base_tree: &str, entries: &[TreeEntry]) -> Result<String> {
        self.record("create_tree")?;
        let mut trees = self.trees.borrow_mut();
        let sha = format!("tree-{}", trees.len());
        trees.insert(sha.clone(), (base_tree.to_string(), entries.to_vec()));
        Ok(sha)
    }

    fn create_commit(
        &self,
        repo: &RepoRef,
        message: &str,
        tree: &str,
        parents: &[String],
    ) -> Result<String> {
        self.record("create_commit")?;
        let mut commits = self.commits.borrow_mut();
        let sha = format!("commit-{}", commits.len());
        commits.insert(
            sha.clone(),
            RecordedCommit {
                repo: repo.name.clone(),
                message: message.to_string(),
                tree: tree.to_string(),
                parents: parents.to_vec(),
            },
        );
        Ok(sha)
    }

    fn update_ref(&self, repo: &RepoRef, _branch: &str, sha: &str) -> Result<()> {
        self.record("update_ref")?;
        self.heads
            .borrow_mut()
            .insert(repo.name.clone(), sha.to_string());
        Ok(())
    }
}

/// Painter that writes a placeholder PNG and remembers the titles it drew
#[derive(Default)]
pub struct RecordingPainter {
    pub titles: Vec<String>,
}

impl CoverPainter for RecordingPainter {
    fn paint(&mut self, title: &str, output: &Path) -> Result<()> {
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(output, b"\x89PNG fake")?;
        self.titles.push(title.to_string());
        Ok(())
    }
}
