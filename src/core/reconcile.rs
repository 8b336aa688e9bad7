//! Front matter reconciliation
//!
//! [`Reconciler`] fills in missing header fields from the file name, refreshes
//! the `date` field and, for the covers variant, points `ogImage.url` at a
//! cover image that still has to be rendered. The body after the header is
//! carried over byte-for-byte.

use crate::core::front_matter::{find_header, format_header, parse_header, prepend, splice};
use crate::core::naming::{cover_file_name, description_from_stem, file_stem, title_from_stem};
use crate::error::{MatterPressError, Result};
use chrono::{Local, NaiveDate};
use log::debug;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Title used when there is neither a header title nor a path to derive one from
pub const UNTITLED: &str = "Untitled";

/// Format of the `date` field
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const TITLE: &str = "title";
const DESCRIPTION: &str = "description";
const DATE: &str = "date";
const OG_IMAGE: &str = "ogImage";
const URL: &str = "url";
const DONT_UPDATE: &str = "dupdate";

/// Which set of fields a reconciler manages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// `title`, `ogImage.url` and `date`; emits cover jobs
    Covers,
    /// `title`, `description` and `date`
    FrontMatter,
}

/// A cover image that has to be rendered for a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverJob {
    /// Text drawn on the cover
    pub title: String,
    /// Output file name, `<slug>.png`
    pub file_name: String,
}

impl CoverJob {
    pub fn for_title(title: impl Into<String>) -> Self {
        let title = title.into();
        let file_name = cover_file_name(&title);
        Self { title, file_name }
    }
}

/// Outcome of reconciling one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciled {
    /// Rewritten document, `None` when nothing changed
    pub content: Option<String>,
    /// Cover to render, only when `ogImage.url` was synthesized
    pub cover: Option<CoverJob>,
}

impl Reconciled {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn is_unchanged(&self) -> bool {
        self.content.is_none() && self.cover.is_none()
    }
}

/// Reconciles document headers for a single run date
#[derive(Debug, Clone)]
pub struct Reconciler {
    variant: Variant,
    today: NaiveDate,
    cdn_prefix: String,
}

impl Reconciler {
    /// Create a reconciler that stamps documents with `today`
    pub fn new(variant: Variant, today: NaiveDate, cdn_prefix: impl Into<String>) -> Self {
        Self {
            variant,
            today,
            cdn_prefix: cdn_prefix.into(),
        }
    }

    /// Create a reconciler for the local calendar date
    pub fn for_today(variant: Variant, cdn_prefix: impl Into<String>) -> Self {
        Self::new(variant, Local::now().date_naive(), cdn_prefix)
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The run date as written into `date`
    pub fn today(&self) -> String {
        self.today.format(DATE_FORMAT).to_string()
    }

    /// Reconcile a document read from disk
    pub fn reconcile_file<P: AsRef<Path>>(&self, path: P) -> Result<Reconciled> {
        self.reconcile(Some(path.as_ref()), None)
    }

    /// Reconcile one document.
    ///
    /// `path_hint` supplies the file name for derived fields and, when
    /// `content` is `None`, the file to read. Supplying neither is an error.
    pub fn reconcile(&self, path_hint: Option<&Path>, content: Option<&str>) -> Result<Reconciled> {
        let loaded;
        let content = match (content, path_hint) {
            (Some(content), _) => content,
            (None, Some(path)) if path.is_file() => {
                loaded = fs::read_to_string(path)?;
                loaded.as_str()
            }
            (None, Some(path)) => {
                return Err(MatterPressError::invalid_input(format!(
                    "no content supplied and {} is not a readable file",
                    path.display()
                )));
            }
            (None, None) => {
                return Err(MatterPressError::invalid_input(
                    "either a path or document content must be provided",
                ));
            }
        };

        let stem = path_hint.and_then(file_stem);
        let (updated, cover) = match find_header(content) {
            Some(header) => {
                let label = path_hint.map_or_else(|| PathBuf::from("<content>"), Path::to_path_buf);
                let props = parse_header(header.raw, &label)?;
                match self.update_existing(props, stem)? {
                    Some((block, cover)) => (splice(content, &header, &block), cover),
                    None => {
                        debug!("{} already processed today", label.display());
                        return Ok(Reconciled::unchanged());
                    }
                }
            }
            None => {
                let (props, cover) = self.synthesize(stem);
                (prepend(content, &format_header(&props)?), cover)
            }
        };

        if updated == content && cover.is_none() {
            return Ok(Reconciled::unchanged());
        }
        Ok(Reconciled {
            content: Some(updated),
            cover,
        })
    }

    /// Fill an existing header. `None` means the document is left untouched.
    fn update_existing(
        &self,
        mut props: Mapping,
        stem: Option<&str>,
    ) -> Result<Option<(String, Option<CoverJob>)>> {
        let title = match props.get(TITLE).and_then(scalar_text) {
            Some(title) if !title.is_empty() => title,
            _ => {
                let title = derive_title(stem);
                props.insert(TITLE.into(), title.clone().into());
                title
            }
        };

        if self.variant == Variant::FrontMatter && !props.contains_key(DESCRIPTION) {
            props.insert(DESCRIPTION.into(), derive_description(stem).into());
        }

        let today = self.today();
        let has_image = og_image_url(&props).is_some();
        let dated_today = props.get(DATE).and_then(scalar_text).as_deref() == Some(today.as_str());
        if has_image && dated_today {
            return Ok(None);
        }

        let cover = if self.variant == Variant::Covers && !has_image {
            let job = CoverJob::for_title(title);
            set_og_image_url(&mut props, self.cover_url(&job));
            Some(job)
        } else {
            None
        };

        if !props.get(DONT_UPDATE).is_some_and(is_truthy) {
            props.insert(DATE.into(), today.into());
        }

        Ok(Some((format_header(&props)?, cover)))
    }

    /// Build a header for a document that had none.
    fn synthesize(&self, stem: Option<&str>) -> (Mapping, Option<CoverJob>) {
        let title = derive_title(stem);
        let mut props = Mapping::new();
        props.insert(TITLE.into(), title.clone().into());

        let cover = match self.variant {
            Variant::Covers => {
                let job = CoverJob::for_title(title);
                set_og_image_url(&mut props, self.cover_url(&job));
                Some(job)
            }
            Variant::FrontMatter => {
                props.insert(DESCRIPTION.into(), derive_description(stem).into());
                None
            }
        };

        props.insert(DATE.into(), self.today().into());
        (props, cover)
    }

    fn cover_url(&self, job: &CoverJob) -> String {
        format!("{}{}", self.cdn_prefix, job.file_name)
    }
}

fn derive_title(stem: Option<&str>) -> String {
    stem.map(title_from_stem)
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string())
}

fn derive_description(stem: Option<&str>) -> String {
    stem.map(description_from_stem).unwrap_or_default()
}

/// `ogImage.url` when present and non-empty
fn og_image_url(props: &Mapping) -> Option<String> {
    props
        .get(OG_IMAGE)
        .and_then(Value::as_mapping)
        .and_then(|image| image.get(URL))
        .and_then(scalar_text)
        .filter(|url| !url.is_empty())
}

fn set_og_image_url(props: &mut Mapping, url: String) {
    match props.get_mut(OG_IMAGE) {
        Some(Value::Mapping(image)) => {
            image.insert(URL.into(), url.into());
        }
        existing => {
            if let Some(previous) = existing {
                debug!("Replacing non-mapping ogImage {:?} with {}", previous, url);
            }
            let mut image = Mapping::new();
            image.insert(URL.into(), url.into());
            props.insert(OG_IMAGE.into(), Value::Mapping(image));
        }
    }
}

/// Scalar rendered as text; mappings, sequences and null yield `None`.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}
