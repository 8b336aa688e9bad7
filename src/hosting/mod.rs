//! Source-control hosting API
//!
//! [`HostingApi`] is the only way the pipeline talks to the remote. The
//! production implementation is [`GithubClient`]; tests use an in-memory fake.

pub mod github;

pub use github::GithubClient;

use crate::error::Result;
use std::fmt;

/// A repository on the hosting service
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Status of a file in a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Added,
    Modified,
    Removed,
    Renamed,
    Deleted,
    Other(String),
}

impl FileStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            "added" => Self::Added,
            "modified" => Self::Modified,
            "removed" => Self::Removed,
            "renamed" => Self::Renamed,
            "deleted" => Self::Deleted,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether the file no longer exists under its name after the commit
    pub fn is_gone(&self) -> bool {
        matches!(self, Self::Removed | Self::Renamed | Self::Deleted)
    }
}

/// A file touched by a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub filename: String,
    pub status: FileStatus,
}

impl ChangeRecord {
    pub fn new(filename: impl Into<String>, status: FileStatus) -> Self {
        Self {
            filename: filename.into(),
            status,
        }
    }
}

/// Content of a blob to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobContent {
    /// Uploaded as UTF-8
    Text(String),
    /// Uploaded base64-encoded
    Binary(Vec<u8>),
}

/// A regular file entry in a new tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub path: String,
    pub sha: String,
}

/// Operations the pipeline needs from the hosting service
pub trait HostingApi {
    /// Look up a repository by owner and name
    fn repository(&self, owner: &str, name: &str) -> Result<RepoRef>;

    /// Commit sha the branch currently points at
    fn branch_head(&self, repo: &RepoRef, branch: &str) -> Result<String>;

    /// Files changed by a commit, with their status
    fn commit_files(&self, repo: &RepoRef, sha: &str) -> Result<Vec<ChangeRecord>>;

    /// Decoded file content on a branch, `None` if the file does not exist
    fn file_content(&self, repo: &RepoRef, path: &str, branch: &str) -> Result<Option<String>>;

    /// Create a blob; returns its sha
    fn create_blob(&self, repo: &RepoRef, content: &BlobContent) -> Result<String>;

    /// Tree sha of a commit
    fn commit_tree(&self, repo: &RepoRef, commit_sha: &str) -> Result<String>;

    /// Create a tree layered on `base_tree`; returns its sha
    fn create_tree(&self, repo: &RepoRef, base_tree: &str, entries: &[TreeEntry]) -> Result<String>;

    /// Create a commit object; returns its sha
    fn create_commit(
        &self,
        repo: &RepoRef,
        message: &str,
        tree: &str,
        parents: &[String],
    ) -> Result<String>;

    /// Move the branch to `sha`
    fn update_ref(&self, repo: &RepoRef, branch: &str, sha: &str) -> Result<()>;
}
