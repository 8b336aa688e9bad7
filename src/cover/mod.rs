//! Cover image generation
//!
//! A title is case-normalized, wrapped to a fixed character width, centered
//! line by line and drawn onto one of two background templates.

pub mod layout;
pub mod preset;
pub mod render;

pub use layout::{cover_text, MAX_LINE_LENGTH};
pub use preset::StylePreset;
pub use render::{CoverPainter, CoverRenderer};
