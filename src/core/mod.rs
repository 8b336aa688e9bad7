//! Core front matter logic
//!
//! - front_matter: locating, parsing and re-emitting the YAML header
//! - naming: titles, descriptions and cover file names derived from names
//! - reconcile: the Reconciler that fills and refreshes header fields

pub mod front_matter;
pub mod naming;
pub mod reconcile;

pub use front_matter::{find_header, format_header, parse_header, HeaderMatch};
pub use reconcile::{CoverJob, Reconciled, Reconciler, Variant, DATE_FORMAT, UNTITLED};
