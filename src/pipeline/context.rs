//! Per-run state: scratch directory, category flags and staged files

use crate::error::Result;
use crate::io::stage_file;
use crate::pipeline::settings::{JOURNAL_PREFIX, PUBLISH_PREFIX};
use chrono::{Local, NaiveDateTime};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Which downstream pipelines the changed files call for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryFlags {
    pub publish: bool,
    pub journal: bool,
}

impl CategoryFlags {
    /// Raise the flag matching the path's category prefix, if any
    pub fn observe(&mut self, repo_path: &str) {
        if repo_path.starts_with(PUBLISH_PREFIX) {
            self.publish = true;
        }
        if repo_path.starts_with(JOURNAL_PREFIX) {
            self.journal = true;
        }
    }
}

/// How a staged file is uploaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagedKind {
    Text,
    Binary,
}

/// A local file waiting to be committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub local: PathBuf,
    pub kind: StagedKind,
}

/// Repository path -> staged local file, for a single commit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitPayload {
    files: BTreeMap<String, StagedFile>,
}

impl CommitPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, repo_path: impl Into<String>, local: PathBuf, kind: StagedKind) {
        self.files
            .insert(repo_path.into(), StagedFile { local, kind });
    }

    pub fn contains(&self, repo_path: &str) -> bool {
        self.files.contains_key(repo_path)
    }

    pub fn get(&self, repo_path: &str) -> Option<&StagedFile> {
        self.files.get(repo_path)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StagedFile)> {
        self.files.iter().map(|(path, file)| (path.as_str(), file))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

/// State owned by one run. The scratch directory is removed when the context
/// is dropped.
#[derive(Debug)]
pub struct RunContext {
    scratch: TempDir,
    now: NaiveDateTime,
    pub flags: CategoryFlags,
}

impl RunContext {
    /// Context stamped with the current local time
    pub fn new() -> Result<Self> {
        Self::at(Local::now().naive_local())
    }

    /// Context stamped with a fixed time
    pub fn at(now: NaiveDateTime) -> Result<Self> {
        Ok(Self {
            scratch: tempfile::Builder::new().prefix("matterpress-").tempdir()?,
            now,
            flags: CategoryFlags::default(),
        })
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    pub fn scratch_dir(&self) -> &Path {
        self.scratch.path()
    }

    /// Local path mirroring a repository path inside the scratch directory
    pub fn scratch_path(&self, repo_path: &str) -> PathBuf {
        self.scratch.path().join(repo_path)
    }

    /// Write text content into the scratch directory
    pub fn stage_text(&self, repo_path: &str, content: &str) -> Result<PathBuf> {
        stage_file(self.scratch.path(), repo_path, content.as_bytes())
    }
}
