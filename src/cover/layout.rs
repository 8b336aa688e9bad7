//! Character-based text layout for covers
//!
//! Wrapping and centering work on character counts; pixel measurement happens
//! in the renderer once the font is loaded.

use crate::core::naming::{is_upper, title_case};
use crate::cover::preset::{StylePreset, REGION_HEIGHT};

/// Maximum characters per wrapped line
pub const MAX_LINE_LENGTH: usize = 32;

/// Separator between wrapped lines; the empty line adds vertical spacing
pub const LINE_SEPARATOR: &str = "\n\n";

/// Keep all-caps titles as they are, title-case everything else.
pub fn normalize_case(title: &str) -> String {
    if is_upper(title) {
        title.to_string()
    } else {
        title_case(title)
    }
}

/// Pad `line` with spaces on both sides to `width` characters.
///
/// When the padding is odd the extra space goes right, unless both the padding
/// and the width are odd.
pub fn center(line: &str, width: usize) -> String {
    let len = line.chars().count();
    if len >= width {
        return line.to_string();
    }
    let margin = width - len;
    let left = margin / 2 + (margin & width & 1);
    let right = margin - left;
    format!("{}{}{}", " ".repeat(left), line, " ".repeat(right))
}

/// Wrap to `width` characters, center every line and join with blank lines.
pub fn wrap_and_center(text: &str, width: usize) -> String {
    textwrap::wrap(text, width)
        .iter()
        .map(|line| center(line, width))
        .collect::<Vec<_>>()
        .join(LINE_SEPARATOR)
}

/// Full text block for a cover title
pub fn cover_text(title: &str) -> String {
    wrap_and_center(&normalize_case(title), MAX_LINE_LENGTH)
}

/// Top-left corner that centers a `width` x `height` block in the preset's region.
pub fn placement(preset: StylePreset, width: u32, height: u32) -> (i32, i32) {
    let x = (preset.region_width() + preset.region_offset() - width as i32).div_euclid(2);
    let y = (REGION_HEIGHT - height as i32).div_euclid(2);
    (x, y)
}
