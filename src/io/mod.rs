pub mod fs;

pub use fs::{is_markdown, resolve_files, stage_file, write_atomic};
