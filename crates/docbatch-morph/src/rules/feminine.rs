use docbatch_core::GrammaticalCase;

use super::lists::FEMININE_GIVEN_NAMES;
use super::{Endings, NameClass, ends_in_consonant, with_ending};
use crate::text::drop_chars;

const POSSESSIVE_SUFFIXES: &[&str] = &["ова", "ева", "ёва", "ина", "ына"];
const ADJECTIVAL_SUFFIXES: &[&str] = &["ская", "цкая", "ая"];

/// `Иванова`, `Пушкина`: the final `-а` is replaced.
const POSSESSIVE_ENDINGS: Endings = ["а", "ой", "ой", "у", "ой", "ой"];
/// `Достоевская`, `Толстая`: the final `-ая` is replaced.
const ADJECTIVAL_ENDINGS: Endings = ["ая", "ой", "ой", "ую", "ой", "ой"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeminineKind {
    /// `-ова/-ева/-ёва`, `-ина/-ына`.
    Possessive,
    /// `-ская/-цкая` and plain `-ая`.
    Adjectival,
}

pub(super) fn has_surname_suffix(word: &str) -> bool {
    !FEMININE_GIVEN_NAMES.contains(&word)
        && (POSSESSIVE_SUFFIXES.iter().any(|suffix| word.ends_with(suffix))
            || ADJECTIVAL_SUFFIXES.iter().any(|suffix| word.ends_with(suffix)))
}

pub(super) fn classify(word: &str) -> NameClass {
    if FEMININE_GIVEN_NAMES.contains(&word) {
        return NameClass::Unknown;
    }
    if POSSESSIVE_SUFFIXES.iter().any(|suffix| word.ends_with(suffix)) {
        return NameClass::FeminineSurname(FeminineKind::Possessive);
    }
    if ADJECTIVAL_SUFFIXES.iter().any(|suffix| word.ends_with(suffix)) {
        return NameClass::FeminineSurname(FeminineKind::Adjectival);
    }
    // `Шевчук`, `Ковальчук`: a woman's consonant-final surname never changes,
    // and the dictionary would decline it as a masculine noun.
    if ends_in_consonant(word) {
        return NameClass::Invariable;
    }
    NameClass::Unknown
}

pub(super) fn decline(word: &str, kind: FeminineKind, case: GrammaticalCase) -> Option<String> {
    let (strip, endings) = match kind {
        FeminineKind::Possessive => (1, &POSSESSIVE_ENDINGS),
        FeminineKind::Adjectival => (2, &ADJECTIVAL_ENDINGS),
    };
    Some(with_ending(drop_chars(word, strip), endings, case))
}

#[cfg(test)]
mod tests {
    use super::*;
    use GrammaticalCase::*;

    fn decline_word(word: &str, case: GrammaticalCase) -> Option<String> {
        match classify(word) {
            NameClass::FeminineSurname(kind) => decline(word, kind, case),
            _ => None,
        }
    }

    #[test]
    fn possessive_surnames() {
        assert_eq!(decline_word("иванова", Genitive).as_deref(), Some("ивановой"));
        assert_eq!(decline_word("иванова", Accusative).as_deref(), Some("иванову"));
        assert_eq!(decline_word("пушкина", Instrumental).as_deref(), Some("пушкиной"));
        assert_eq!(decline_word("соловьёва", Prepositional).as_deref(), Some("соловьёвой"));
    }

    #[test]
    fn adjectival_surnames() {
        assert_eq!(decline_word("достоевская", Dative).as_deref(), Some("достоевской"));
        assert_eq!(decline_word("достоевская", Accusative).as_deref(), Some("достоевскую"));
        assert_eq!(decline_word("толстая", Accusative).as_deref(), Some("толстую"));
    }

    #[test]
    fn given_names_and_other_endings_do_not_match() {
        assert_eq!(classify("марина"), NameClass::Unknown);
        assert_eq!(classify("мария"), NameClass::Unknown);
        assert_eq!(classify("анна"), NameClass::Unknown);
    }
}
