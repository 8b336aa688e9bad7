//! Locating, parsing and re-emitting the YAML header of a markdown document
//!
//! The header is the first `---` fenced block at the very start of the text.
//! Everything after the closing fence is the body and is never touched.

use crate::error::{MatterPressError, Result};
use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::path::Path;
use std::sync::LazyLock;

/// Opening fence, lazily captured header content, closing fence on its own line.
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)\A\s*---[ \t]*\r?\n(.*?)^---[ \t]*\r?$")
        .expect("header pattern is valid")
});

/// A header block found at the start of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMatch<'a> {
    /// Text between the two fences
    pub raw: &'a str,
    /// Byte offset just past the closing fence; the body starts here
    pub end: usize,
}

/// Find the header block, if the document starts with one.
///
/// Leading whitespace before the opening fence is tolerated. A document whose
/// opening fence is never closed has no header.
pub fn find_header(content: &str) -> Option<HeaderMatch<'_>> {
    let caps = HEADER.captures(content)?;
    let whole = caps.get(0)?;
    let raw = caps.get(1).map_or("", |m| m.as_str());
    Some(HeaderMatch {
        raw,
        end: whole.end(),
    })
}

/// Parse header text into an ordered mapping.
///
/// An empty header yields an empty mapping; anything that is not a mapping
/// is rejected.
pub fn parse_header(raw: &str, path: &Path) -> Result<Mapping> {
    let value: Value = serde_yaml::from_str(raw)
        .map_err(|e| MatterPressError::malformed_front_matter(path, e.to_string()))?;

    match value {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        other => Err(MatterPressError::malformed_front_matter(
            path,
            format!("Expected mapping or null, found {:?}", other),
        )),
    }
}

/// Serialize a mapping as a fenced block, without a trailing newline after the
/// closing fence.
pub fn format_header(map: &Mapping) -> Result<String> {
    let yaml = serde_yaml::to_string(map)?;
    let yaml = yaml.trim_start_matches("---\n");
    if yaml.ends_with('\n') {
        Ok(format!("---\n{}---", yaml))
    } else {
        Ok(format!("---\n{}\n---", yaml))
    }
}

/// Replace the matched header with `block`, keeping the body byte-for-byte.
pub fn splice(content: &str, header: &HeaderMatch<'_>, block: &str) -> String {
    format!("{}{}", block, &content[header.end..])
}

/// Put a new header in front of a document that had none.
pub fn prepend(content: &str, block: &str) -> String {
    format!("{}\n\n{}", block, content)
}
