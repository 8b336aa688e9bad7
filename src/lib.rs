//! matterpress: keeps the front matter of a notes repository consistent and
//! generates cover images for posts that lack one
//!
//! The library reconciles YAML headers of markdown documents against names
//! derived from their file names, renders social-preview covers for titles,
//! and commits the results back through a hosting API.
//!
//! # Quick Start
//!
//! ## Reconciling a Document
//!
//! ```rust,no_run
//! use matterpress::{Reconciler, Variant, Result};
//! use std::path::Path;
//!
//! fn main() -> Result<()> {
//!     let reconciler = Reconciler::for_today(Variant::Covers, "https://cdn.example/covers/");
//!     let outcome = reconciler.reconcile(Some(Path::new("publish/my-post.md")), Some("# Hello"))?;
//!
//!     if let Some(updated) = outcome.content {
//!         println!("{}", updated);
//!     }
//!     if let Some(job) = outcome.cover {
//!         println!("cover needed: {}", job.file_name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Rendering a Cover
//!
//! ```rust,no_run
//! use matterpress::{CoverRenderer, Result};
//! use std::path::Path;
//!
//! fn main() -> Result<()> {
//!     let mut renderer = CoverRenderer::new(".github/scripts");
//!     let style = renderer.render("My Cool Post", Path::new("mycoolpost.png"))?;
//!     println!("rendered in {:?} style", style);
//!     Ok(())
//! }
//! ```
//!
//! ## Running Against GitHub
//!
//! ```rust,no_run
//! use matterpress::pipeline::{run_front_matter, RunContext, Settings};
//! use matterpress::{GithubClient, Result};
//!
//! fn main() -> Result<()> {
//!     let api = GithubClient::new(std::env::var("GITHUB_TOKEN").unwrap_or_default())?;
//!     let summary = run_front_matter(&api, &Settings::default(), RunContext::new()?)?;
//!     println!("{} documents updated", summary.documents);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`core`]: header detection, name derivation and the [`Reconciler`]
//! - [`cover`]: style presets, text layout and the [`CoverRenderer`]
//! - [`hosting`]: the [`HostingApi`] trait and its GitHub implementation
//! - [`pipeline`]: collector, trigger files, commit publishing and run drivers
//! - [`io`]: local markdown discovery and file writes
//! - [`error`]: the crate error type

// Public API exports
pub use error::{AssetKind, MatterPressError, Result};

// Core types
pub use crate::core::{CoverJob, Reconciled, Reconciler, Variant};

// Cover types
pub use cover::{CoverPainter, CoverRenderer, StylePreset};

// Hosting types
pub use hosting::{GithubClient, HostingApi, RepoRef};

pub mod core;
pub mod cover;
pub mod error;
pub mod hosting;
pub mod io;
pub mod pipeline;

// CLI components are available only in the binary, not as part of the library API
