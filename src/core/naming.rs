//! Deriving titles, descriptions and cover file names from names
//!
//! Words that are already fully upper-case are treated as acronyms and kept
//! verbatim everywhere in this module.

use std::path::Path;

/// File name stem of a path hint, e.g. `publish/my-post.md` -> `my-post`
pub fn file_stem(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}

/// True when the text has at least one cased letter and no lower-case ones.
pub fn is_upper(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

/// Upper-case the first letter of every run of letters, lower-case the rest.
///
/// `"my cool post"` becomes `"My Cool Post"`, `"it's"` becomes `"It'S"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_cased = false;
    for c in text.chars() {
        if prev_cased {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_cased = c.is_alphabetic();
    }
    out
}

/// Upper-case the first character and lower-case everything after it.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Title derived from a file name stem.
///
/// `_` and `-` separate words; every word is title-cased unless it is an
/// acronym. `my-cool_Post` gives `My Cool Post`, `NASA_report` gives
/// `NASA Report`.
pub fn title_from_stem(stem: &str) -> String {
    stem.replace(['_', '-'], " ")
        .split_whitespace()
        .map(|word| {
            if is_upper(word) {
                word.to_string()
            } else {
                title_case(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a stem into words at separators, camel-case humps, acronym runs and
/// digit runs.
///
/// `HTMLParser2024_notes` gives `["HTML", "Parser", "2024", "notes"]`.
pub fn split_words(stem: &str) -> Vec<String> {
    let chars: Vec<char> = stem.chars().collect();
    let mut words = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let start = i;
        let c = chars[i];

        if c.is_ascii_digit() {
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            words.push(chars[start..i].iter().collect());
        } else if c.is_ascii_uppercase() {
            while i < chars.len() && chars[i].is_ascii_uppercase() {
                i += 1;
            }
            if i < chars.len() && chars[i].is_ascii_lowercase() {
                // the last capital starts the next camel-case word
                let hump = i - 1;
                if hump > start {
                    words.push(chars[start..hump].iter().collect());
                }
                while i < chars.len() && chars[i].is_ascii_lowercase() {
                    i += 1;
                }
                words.push(chars[hump..i].iter().collect());
            } else {
                words.push(chars[start..i].iter().collect());
            }
        } else if c.is_ascii_lowercase() {
            while i < chars.len() && chars[i].is_ascii_lowercase() {
                i += 1;
            }
            words.push(chars[start..i].iter().collect());
        } else {
            i += 1;
        }
    }

    words
}

/// Description derived from a file name stem: split into words, capitalise
/// everything that is neither an acronym nor a number.
pub fn description_from_stem(stem: &str) -> String {
    split_words(stem)
        .iter()
        .map(|word| {
            if (is_upper(word) && word.chars().count() > 1)
                || word.chars().all(|c| c.is_ascii_digit())
            {
                word.clone()
            } else {
                capitalize(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lower-case ASCII alphanumeric slug of a title. `My Cool Post!` gives `mycoolpost`.
pub fn cover_slug(title: &str) -> String {
    title
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Cover image file name for a title. `My Cool Post!` gives `mycoolpost.png`.
pub fn cover_file_name(title: &str) -> String {
    format!("{}.png", cover_slug(title))
}
