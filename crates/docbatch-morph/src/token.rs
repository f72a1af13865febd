use std::sync::LazyLock;

use regex::Regex;

use crate::text::is_cyrillic;

static DATE_LIKE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}\.\d{1,2}\.\d{2,4}$").ok());

/// Organisational forms and registry codes kept verbatim.
const ABBREVIATIONS: &[&str] = &[
    "ООО", "ОАО", "ЗАО", "ПАО", "НАО", "АО", "ИП", "ЧП", "РФ", "СССР", "НКО", "АНО", "ТСЖ", "ГУП",
    "МУП", "ФГУП", "ГБУ", "МБУ", "ФГБУ", "ИНН", "КПП", "ОГРН", "ОГРНИП", "БИК", "СНИЛС", "ОКПО",
    "ОКВЭД", "НДС", "МВД", "ФНС", "ПФР", "ФСС",
];

/// A whitespace-delimited token split into punctuation and word core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub leading: &'a str,
    pub core: &'a str,
    pub trailing: &'a str,
}

impl<'a> Token<'a> {
    pub fn split(raw: &'a str) -> Self {
        let core_end = raw
            .char_indices()
            .rev()
            .find(|(_, ch)| !is_punctuation(*ch))
            .map(|(idx, ch)| idx + ch.len_utf8())
            .unwrap_or(0);
        let (body, trailing) = raw.split_at(core_end);

        let core_start = body
            .char_indices()
            .find(|(_, ch)| !is_opening(*ch))
            .map(|(idx, _)| idx)
            .unwrap_or(body.len());
        let (leading, core) = body.split_at(core_start);

        Self {
            leading,
            core,
            trailing,
        }
    }

    pub fn assemble(&self, core: &str) -> String {
        format!("{}{}{}", self.leading, core, self.trailing)
    }

    /// Dates, numbers, initials, abbreviations and non-Cyrillic words pass
    /// through untouched.
    pub fn is_skipped(&self) -> bool {
        let core = self.core;
        core.is_empty()
            || is_date_like(core)
            || is_numeric(core)
            || is_initials(core)
            || is_abbreviation(core)
            || !core.chars().any(is_cyrillic)
    }
}

fn is_punctuation(ch: char) -> bool {
    ch.is_ascii_punctuation() || matches!(ch, '»' | '…' | '”' | '“' | '„' | '—' | '–')
}

fn is_opening(ch: char) -> bool {
    matches!(ch, '«' | '"' | '\'' | '(' | '[' | '“' | '„')
}

pub(crate) fn is_date_like(core: &str) -> bool {
    DATE_LIKE.as_ref().is_some_and(|re| re.is_match(core))
}

pub(crate) fn is_numeric(core: &str) -> bool {
    core.chars().any(|ch| ch.is_ascii_digit()) && core.chars().all(|ch| ch.is_ascii_digit() || ch == '-')
}

/// `И`, `И.` and glued forms such as `И.И`.
pub(crate) fn is_initials(core: &str) -> bool {
    core.split('.')
        .filter(|part| !part.is_empty())
        .all(|part| {
            let mut chars = part.chars();
            matches!((chars.next(), chars.next()), (Some(ch), None) if ch.is_alphabetic())
        })
        && core.chars().any(char::is_alphabetic)
}

/// `ООО`, `ИП`, `РФ` and the like. Other all-caps words are inflected.
pub(crate) fn is_abbreviation(core: &str) -> bool {
    ABBREVIATIONS.contains(&core)
}

/// Letter case of an original token, restored onto the inflected form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Casing {
    Lower,
    Capitalized,
    Upper,
}

impl Casing {
    pub fn of(word: &str) -> Self {
        let mut letters = word.chars().filter(|ch| ch.is_alphabetic()).peekable();
        let Some(first) = letters.peek().copied() else {
            return Casing::Lower;
        };
        let letters: Vec<char> = letters.collect();
        if letters.len() > 1 && letters.iter().all(|ch| ch.is_uppercase()) {
            Casing::Upper
        } else if first.is_uppercase() {
            Casing::Capitalized
        } else {
            Casing::Lower
        }
    }

    pub fn apply(self, word: &str) -> String {
        match self {
            Casing::Lower => word.to_string(),
            Casing::Upper => word.to_uppercase(),
            Casing::Capitalized => capitalize(word),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
