//! Output file naming.
//!
//! A pattern understands `{i:04d}` (any zero-padded width), `{i}`,
//! `{suffix}` and `{column}`. Anything else is copied through before the
//! whole name is sanitized.

use std::collections::HashSet;

use docbatch_core::EMPTY_SUFFIX;

/// Maximum length of the name portion, in characters.
pub const MAX_STEM_CHARS: usize = 200;

const FORBIDDEN: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];
const DOCUMENT_EXTENSIONS: &[&str] = &["docx", "docm", "dotx", "doc"];
const DEFAULT_EXTENSION: &str = "docx";

/// Build the file name of row `row_index` (zero-based).
pub fn synthesize(
    pattern: &str,
    row_index: usize,
    is_incomplete: bool,
    column_value: Option<&str>,
) -> String {
    let row_number = row_index + 1;
    let fallback = || format!("строка{row_number}");
    let mut column = column_value
        .map(sanitize)
        .filter(|value| !value.is_empty())
        .unwrap_or_else(fallback);
    let suffix = if is_incomplete { EMPTY_SUFFIX } else { "" };

    let mut name = sanitize(&render(pattern, row_number, suffix, &column));
    // Shorten the column value first so `{suffix}` and the pattern text survive.
    let overflow = split_extension(&name)
        .0
        .chars()
        .count()
        .saturating_sub(MAX_STEM_CHARS);
    let uses = pattern.matches("{column}").count();
    if overflow > 0 && uses > 0 {
        let keep = column.chars().count().saturating_sub(overflow.div_ceil(uses));
        column = column.chars().take(keep).collect::<String>().trim_end().to_string();
        name = sanitize(&render(pattern, row_number, suffix, &column));
    }
    let (stem, extension) = split_extension(&name);

    let mut stem: String = stem.chars().take(MAX_STEM_CHARS).collect();
    stem = stem.trim_end_matches(['.', ' ']).to_string();
    if stem.is_empty() {
        stem = fallback();
    }
    format!("{stem}.{}", extension.unwrap_or(DEFAULT_EXTENSION))
}

/// Strip characters Windows rejects in file names, control characters and
/// trailing dots.
pub fn sanitize(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .filter(|ch| !FORBIDDEN.contains(ch) && !ch.is_control())
        .collect();
    cleaned.trim().trim_end_matches('.').trim_end().to_string()
}

fn render(pattern: &str, row_number: usize, suffix: &str, column: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + column.len());
    let mut rest = pattern;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let Some(end) = tail.find('}') else {
            out.push_str(tail);
            return out;
        };
        let token = &tail[1..end];
        match expand(token, row_number, suffix, column) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&tail[..=end]),
        }
        rest = &tail[end + 1..];
    }
    out.push_str(rest);
    out
}

fn expand(token: &str, row_number: usize, suffix: &str, column: &str) -> Option<String> {
    match token {
        "i" => Some(row_number.to_string()),
        "suffix" => Some(suffix.to_string()),
        "column" => Some(column.to_string()),
        _ => {
            let width = token.strip_prefix("i:")?.strip_suffix('d')?;
            let width: usize = width.trim_start_matches('0').parse().unwrap_or(0);
            Some(format!("{row_number:0width$}"))
        }
    }
}

fn split_extension(name: &str) -> (&str, Option<&str>) {
    if let Some((stem, ext)) = name.rsplit_once('.') {
        if DOCUMENT_EXTENSIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext))
        {
            return (stem, Some(ext));
        }
    }
    (name, None)
}

/// Names claimed so far in one run.
#[derive(Debug, Default)]
pub struct FilenameRegistry {
    taken: HashSet<String>,
}

impl FilenameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `name`, or the first free `stem (n).ext` variant. Names are
    /// compared case-insensitively.
    pub fn claim(&mut self, name: String) -> String {
        if self.taken.insert(name.to_lowercase()) {
            return name;
        }
        let (stem, extension) = match name.rsplit_once('.') {
            Some((stem, ext)) => (stem.to_string(), format!(".{ext}")),
            None => (name.clone(), String::new()),
        };
        let mut n = 2;
        loop {
            let candidate = format!("{stem} ({n}){extension}");
            if self.taken.insert(candidate.to_lowercase()) {
                return candidate;
            }
            n += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.taken.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }
}
