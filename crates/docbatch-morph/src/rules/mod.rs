//! Name declension rules: patronymics and surnames.
//!
//! A capitalized word is first classified into a [`NameClass`]; the class
//! then picks one fixed case-ending table. Every classifier and table works
//! on lower-cased input and returns lower-cased output.

mod feminine;
mod lists;
mod masculine;
mod patronymic;

use docbatch_core::GrammaticalCase;

use crate::text::{is_consonant, last_char};

pub use feminine::FeminineKind;
pub use masculine::{AdjectivalKind, ConsonantKind};
pub use patronymic::{decline_patronymic, patronymic_gender};

/// Six endings in paradigm order, nominative first.
pub(crate) type Endings = [&'static str; 6];

pub(crate) fn with_ending(stem: &str, endings: &Endings, case: GrammaticalCase) -> String {
    format!("{stem}{}", endings[case.index()])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Masculine,
    Feminine,
}

/// Classification of a capitalized, non-patronymic word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameClass {
    FeminineSurname(FeminineKind),
    AdjectivalSurname(AdjectivalKind),
    ConsonantSurname(ConsonantKind),
    /// Given names with a fixed irregular paradigm (`Лев`, `Пётр`).
    Irregular(&'static [&'static str; 6]),
    /// Consonant-final feminine surnames, which never change.
    Invariable,
    /// Known indeclinable endings; left to the dictionary.
    Indeclinable,
    /// No rule applies; left to the dictionary.
    Unknown,
}

/// Gender guessed from the shape of a single name.
pub fn infer_gender(word: &str) -> Gender {
    if feminine::has_surname_suffix(word) || lists::FEMININE_GIVEN_NAMES.contains(&word) {
        return Gender::Feminine;
    }
    match last_char(word) {
        Some('а' | 'я') if !lists::MASCULINE_A_NAMES.contains(&word) => Gender::Feminine,
        _ => Gender::Masculine,
    }
}

pub fn classify_name(word: &str, gender: Gender) -> NameClass {
    match gender {
        Gender::Feminine => feminine::classify(word),
        Gender::Masculine => masculine::classify(word),
    }
}

/// Decline a classified name. `None` means no rule matched.
pub fn decline_name(word: &str, class: NameClass, case: GrammaticalCase) -> Option<String> {
    if case == GrammaticalCase::Nominative {
        return Some(word.to_string());
    }
    match class {
        NameClass::FeminineSurname(kind) => feminine::decline(word, kind, case),
        NameClass::AdjectivalSurname(kind) => masculine::decline_adjectival(word, kind, case),
        NameClass::ConsonantSurname(kind) => masculine::decline_consonant(word, kind, case),
        NameClass::Irregular(forms) => Some(forms[case.index()].to_string()),
        NameClass::Invariable => Some(word.to_string()),
        NameClass::Indeclinable | NameClass::Unknown => None,
    }
}

/// Classify and decline in one step.
pub fn decline(word: &str, gender: Gender, case: GrammaticalCase) -> Option<String> {
    decline_name(word, classify_name(word, gender), case)
}

pub(crate) fn ends_in_consonant(word: &str) -> bool {
    last_char(word).is_some_and(is_consonant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use GrammaticalCase::*;

    #[test]
    fn infers_gender_from_name_shape() {
        assert_eq!(infer_gender("иванова"), Gender::Feminine);
        assert_eq!(infer_gender("мария"), Gender::Feminine);
        assert_eq!(infer_gender("иванов"), Gender::Masculine);
        assert_eq!(infer_gender("никита"), Gender::Masculine);
    }

    #[test]
    fn nominative_is_identity_for_every_class() {
        assert_eq!(decline("иванов", Gender::Masculine, Nominative).as_deref(), Some("иванов"));
        assert_eq!(decline("шевченко", Gender::Masculine, Nominative).as_deref(), Some("шевченко"));
    }

    #[test]
    fn indeclinable_and_unknown_do_not_match() {
        assert_eq!(decline("шевченко", Gender::Masculine, Dative), None);
        assert_eq!(decline("никита", Gender::Masculine, Dative), None);
    }

    #[test]
    fn consonant_final_feminine_surname_is_invariable() {
        assert_eq!(classify_name("шевчук", Gender::Feminine), NameClass::Invariable);
        assert_eq!(decline("шевчук", Gender::Feminine, Dative).as_deref(), Some("шевчук"));
    }
}
