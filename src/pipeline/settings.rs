//! Compiled-in configuration for the notes/covers repositories

use crate::core::Variant;
use std::path::PathBuf;

pub const OWNER: &str = "mohankumarpaluru";
pub const NOTES_REPO: &str = "notes";
pub const COVER_REPO: &str = "blog-cover-generator";
pub const BRANCH: &str = "main";

/// Where covers live inside the cover repository
pub const COVERS_DIR: &str = "public/assets/blog/covers/";

pub const PUBLISH_PREFIX: &str = "publish/";
pub const JOURNAL_PREFIX: &str = "journal/";
pub const PUBLISH_TRIGGER_FILE: &str = ".github/trigger_files/publish.txt";
pub const JOURNAL_TRIGGER_FILE: &str = ".github/trigger_files/journal.txt";

pub const MARKDOWN_EXTENSION: &str = ".md";

/// Default location of cover templates and fonts
pub const DEFAULT_ASSETS_DIR: &str = ".github/scripts";

pub const COVERS_COMMIT_MESSAGE: &str = "Updating Covers and Deploying";
pub const FRONT_MATTER_COMMIT_MESSAGE: &str = "Updating Front Matter and Deploying";

/// Timestamp format used in trigger files
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything a run needs to know about where things live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub owner: String,
    pub notes_repo: String,
    pub cover_repo: String,
    pub branch: String,
    pub covers_dir: String,
    pub publish_trigger: String,
    pub journal_trigger: String,
    pub assets_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            owner: OWNER.to_string(),
            notes_repo: NOTES_REPO.to_string(),
            cover_repo: COVER_REPO.to_string(),
            branch: BRANCH.to_string(),
            covers_dir: COVERS_DIR.to_string(),
            publish_trigger: PUBLISH_TRIGGER_FILE.to_string(),
            journal_trigger: JOURNAL_TRIGGER_FILE.to_string(),
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
        }
    }
}

impl Settings {
    /// CDN prefix every `ogImage.url` starts with
    pub fn cdn_prefix(&self) -> String {
        format!(
            "https://cdn.jsdelivr.net/gh/{}/{}@{}/{}",
            self.owner, self.cover_repo, self.branch, self.covers_dir
        )
    }
}

/// Commit message for a variant's notes commit
pub fn commit_message(variant: Variant) -> &'static str {
    match variant {
        Variant::Covers => COVERS_COMMIT_MESSAGE,
        Variant::FrontMatter => FRONT_MATTER_COMMIT_MESSAGE,
    }
}

/// Line appended to a trigger file, including its leading newline
pub fn trigger_line(variant: Variant, had_updates: bool, timestamp: &str) -> String {
    match (variant, had_updates) {
        (Variant::Covers, true) => format!("\n Covers Updated on {}", timestamp),
        (Variant::Covers, false) => format!("\n No covers were updated: {}", timestamp),
        (Variant::FrontMatter, true) => format!("\n Front Matter Updated on {}", timestamp),
        (Variant::FrontMatter, false) => format!("\n No front matter was updated: {}", timestamp),
    }
}
