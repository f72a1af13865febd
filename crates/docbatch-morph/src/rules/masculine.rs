use docbatch_core::GrammaticalCase;

use super::lists::{INDECLINABLE_NAMES, IRREGULAR_NAMES, MASCULINE_GIVEN_NAMES};
use super::{Endings, NameClass, with_ending};
use crate::text::{
    drop_chars, ends_with_any, has_vowel, is_consonant, is_sibilant, is_vowel, last_char, syllables,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdjectivalKind {
    /// `-ый` (`Белый`).
    Hard,
    /// `-ой` (`Толстой`).
    Stressed,
    /// `-ский/-цкий`, `-кий/-хий` (`Достоевский`, `Горький`).
    Velar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsonantKind {
    /// `-ов/-ев/-ёв`, `-ин/-ын`: instrumental `-ым`.
    Possessive,
    /// `-ь` (`Гоголь`).
    SoftSign,
    /// `-ел` loses its vowel (`Орел` → `Орла`).
    FleetingEl,
    /// `-ец` loses its vowel (`Кравец` → `Кравца`).
    FleetingEts,
    /// `-ок` loses its vowel (`Колобок` → `Колобка`).
    FleetingOk,
    /// `-ёк` becomes `-ьк-` (`Игорёк` → `Игорька`).
    FleetingYok,
    /// Given names in `-ий` (`Дмитрий`, prepositional `-ии`).
    GivenNameIy,
    /// Other `-й` given names (`Сергей`).
    GivenNameY,
    /// Final hushing consonant or `ц`: instrumental `-ем`.
    Sibilant,
    /// Any other consonant: instrumental `-ом`.
    Hard,
}

const HARD_ADJECTIVAL: Endings = ["ый", "ого", "ому", "ого", "ым", "ом"];
const STRESSED_ADJECTIVAL: Endings = ["ой", "ого", "ому", "ого", "ым", "ом"];
const VELAR_ADJECTIVAL: Endings = ["ий", "ого", "ому", "ого", "им", "ом"];

const POSSESSIVE: Endings = ["", "а", "у", "а", "ым", "е"];
const SOFT_SIGN: Endings = ["ь", "я", "ю", "я", "ем", "е"];
const FLEETING_EL: Endings = ["ел", "ла", "лу", "ла", "лом", "ле"];
const FLEETING_ETS: Endings = ["ец", "ца", "цу", "ца", "цом", "це"];
const FLEETING_ETS_AFTER_VOWEL: Endings = ["ец", "йца", "йцу", "йца", "йцом", "йце"];
const FLEETING_OK: Endings = ["ок", "ка", "ку", "ка", "ком", "ке"];
const FLEETING_YOK: Endings = ["ёк", "ька", "ьку", "ька", "ьком", "ьке"];
const FLEETING_YOK_AFTER_VOWEL: Endings = ["ёк", "йка", "йку", "йка", "йком", "йке"];
const GIVEN_NAME_IY: Endings = ["й", "я", "ю", "я", "ем", "и"];
const GIVEN_NAME_Y: Endings = ["й", "я", "ю", "я", "ем", "е"];
const SIBILANT: Endings = ["", "а", "у", "а", "ем", "е"];
const HARD: Endings = ["", "а", "у", "а", "ом", "е"];

/// Rules are evaluated in order; the first match wins.
pub(super) fn classify(word: &str) -> NameClass {
    if let Some((_, forms)) = IRREGULAR_NAMES.iter().find(|(name, _)| *name == word) {
        return NameClass::Irregular(forms);
    }
    if is_indeclinable(word) {
        return NameClass::Indeclinable;
    }
    if let Some(kind) = adjectival_kind(word) {
        return NameClass::AdjectivalSurname(kind);
    }
    if MASCULINE_GIVEN_NAMES.contains(&word) {
        return NameClass::ConsonantSurname(final_consonant_kind(word));
    }
    match consonant_kind(word) {
        Some(kind) => NameClass::ConsonantSurname(kind),
        None => NameClass::Unknown,
    }
}

fn is_indeclinable(word: &str) -> bool {
    if INDECLINABLE_NAMES.contains(&word) {
        return true;
    }
    if ends_with_any(word, &["ых", "их", "ко"]) {
        return true;
    }
    if last_char(word).is_some_and(|ch| matches!(ch, 'о' | 'е' | 'и' | 'у' | 'ю' | 'ы' | 'э')) {
        return true;
    }
    // Foreign `-а` after a vowel: `Гарсиа`, `Моравиа`.
    let mut tail = word.chars().rev();
    matches!((tail.next(), tail.next()), (Some('а'), Some(prev)) if is_vowel(prev))
}

fn adjectival_kind(word: &str) -> Option<AdjectivalKind> {
    if ends_with_any(word, &["кий", "хий"]) {
        Some(AdjectivalKind::Velar)
    } else if word.ends_with("ый") {
        Some(AdjectivalKind::Hard)
    } else if word.ends_with("ой") && word.chars().count() > 3 {
        Some(AdjectivalKind::Stressed)
    } else {
        None
    }
}

/// Dispatch on the final letter or cluster.
fn consonant_kind(word: &str) -> Option<ConsonantKind> {
    if ends_with_any(word, &["ов", "ев", "ёв", "ин", "ын"]) {
        return Some(ConsonantKind::Possessive);
    }
    if word.ends_with('ь') {
        return Some(ConsonantKind::SoftSign);
    }
    if let Some(kind) = fleeting_kind(word) {
        return Some(kind);
    }
    if word.ends_with("ий") {
        return Some(ConsonantKind::GivenNameIy);
    }
    if word.ends_with('й') {
        return Some(ConsonantKind::GivenNameY);
    }
    if last_char(word).is_some_and(is_consonant) {
        return Some(final_consonant_kind(word));
    }
    None
}

fn fleeting_kind(word: &str) -> Option<ConsonantKind> {
    let stem_has_vowel = has_vowel(drop_chars(word, 2));
    if word.ends_with("ёк") {
        return Some(ConsonantKind::FleetingYok);
    }
    if !stem_has_vowel {
        return None;
    }
    if word.ends_with("ел") {
        Some(ConsonantKind::FleetingEl)
    } else if word.ends_with("ец") {
        Some(ConsonantKind::FleetingEts)
    } else if word.ends_with("ок")
        && (syllables(word) >= 3 || ends_with_any(word, &["чок", "шок", "жок"]))
    {
        Some(ConsonantKind::FleetingOk)
    } else {
        None
    }
}

fn final_consonant_kind(word: &str) -> ConsonantKind {
    if last_char(word).is_some_and(is_sibilant) {
        ConsonantKind::Sibilant
    } else {
        ConsonantKind::Hard
    }
}

pub(super) fn decline_adjectival(
    word: &str,
    kind: AdjectivalKind,
    case: GrammaticalCase,
) -> Option<String> {
    let endings = match kind {
        AdjectivalKind::Hard => &HARD_ADJECTIVAL,
        AdjectivalKind::Stressed => &STRESSED_ADJECTIVAL,
        AdjectivalKind::Velar => &VELAR_ADJECTIVAL,
    };
    Some(with_ending(drop_chars(word, 2), endings, case))
}

pub(super) fn decline_consonant(
    word: &str,
    kind: ConsonantKind,
    case: GrammaticalCase,
) -> Option<String> {
    let after_vowel = |strip: usize| last_char(drop_chars(word, strip)).is_some_and(is_vowel);
    let (strip, endings) = match kind {
        ConsonantKind::Possessive => (0, &POSSESSIVE),
        ConsonantKind::SoftSign => (1, &SOFT_SIGN),
        ConsonantKind::FleetingEl => (2, &FLEETING_EL),
        ConsonantKind::FleetingEts if after_vowel(2) => (2, &FLEETING_ETS_AFTER_VOWEL),
        ConsonantKind::FleetingEts => (2, &FLEETING_ETS),
        ConsonantKind::FleetingOk => (2, &FLEETING_OK),
        ConsonantKind::FleetingYok if after_vowel(2) => (2, &FLEETING_YOK_AFTER_VOWEL),
        ConsonantKind::FleetingYok => (2, &FLEETING_YOK),
        ConsonantKind::GivenNameIy => (1, &GIVEN_NAME_IY),
        ConsonantKind::GivenNameY => (1, &GIVEN_NAME_Y),
        ConsonantKind::Sibilant => (0, &SIBILANT),
        ConsonantKind::Hard => (0, &HARD),
    };
    Some(with_ending(drop_chars(word, strip), endings, case))
}

#[cfg(test)]
mod tests {
    use super::*;
    use GrammaticalCase::*;

    fn decline(word: &str, case: GrammaticalCase) -> Option<String> {
        match classify(word) {
            NameClass::AdjectivalSurname(kind) => decline_adjectival(word, kind, case),
            NameClass::ConsonantSurname(kind) => decline_consonant(word, kind, case),
            NameClass::Irregular(forms) => Some(forms[case.index()].to_string()),
            _ => None,
        }
    }

    fn all_cases(word: &str) -> Vec<String> {
        GrammaticalCase::ALL
            .iter()
            .map(|case| decline(word, *case).unwrap_or_default())
            .collect()
    }

    #[test]
    fn possessive_surnames_take_instrumental_ym() {
        assert_eq!(
            all_cases("иванов"),
            ["иванов", "иванова", "иванову", "иванова", "ивановым", "иванове"]
        );
        assert_eq!(decline("пушкин", Instrumental).as_deref(), Some("пушкиным"));
        assert_eq!(decline("соловьёв", Dative).as_deref(), Some("соловьёву"));
    }

    #[test]
    fn given_names_shaped_like_surnames_take_om() {
        assert_eq!(decline("константин", Instrumental).as_deref(), Some("константином"));
        assert_eq!(decline("иван", Instrumental).as_deref(), Some("иваном"));
    }

    #[test]
    fn adjectival_surnames() {
        assert_eq!(decline("толстой", Genitive).as_deref(), Some("толстого"));
        assert_eq!(decline("достоевский", Instrumental).as_deref(), Some("достоевским"));
        assert_eq!(decline("белый", Dative).as_deref(), Some("белому"));
        assert_eq!(decline("горький", Genitive).as_deref(), Some("горького"));
    }

    #[test]
    fn soft_sign_and_y_finals() {
        assert_eq!(decline("гоголь", Instrumental).as_deref(), Some("гоголем"));
        assert_eq!(decline("сергей", Prepositional).as_deref(), Some("сергее"));
        assert_eq!(decline("дмитрий", Prepositional).as_deref(), Some("дмитрии"));
        assert_eq!(decline("дмитрий", Dative).as_deref(), Some("дмитрию"));
    }

    #[test]
    fn fleeting_vowels() {
        assert_eq!(decline("орел", Genitive).as_deref(), Some("орла"));
        assert_eq!(decline("кравец", Dative).as_deref(), Some("кравцу"));
        assert_eq!(decline("колобок", Genitive).as_deref(), Some("колобка"));
        assert_eq!(decline("игорёк", Dative).as_deref(), Some("игорьку"));
        assert_eq!(decline("швец", Genitive).as_deref(), Some("швеца"));
        assert_eq!(decline("знаток", Genitive).as_deref(), Some("знатока"));
        assert_eq!(decline("пушок", Genitive).as_deref(), Some("пушка"));
    }

    #[test]
    fn irregular_given_names() {
        assert_eq!(decline("павел", Instrumental).as_deref(), Some("павлом"));
        assert_eq!(decline("лев", Genitive).as_deref(), Some("льва"));
        assert_eq!(decline("пётр", Dative).as_deref(), Some("петру"));
    }

    #[test]
    fn sibilant_finals_take_em() {
        assert_eq!(decline("бабич", Instrumental).as_deref(), Some("бабичем"));
        assert_eq!(decline("бабич", Genitive).as_deref(), Some("бабича"));
    }

    #[test]
    fn indeclinable_endings_do_not_match() {
        for word in ["шевченко", "черных", "седых", "гарсиа", "дюма", "ганди", "гюго"] {
            assert_eq!(classify(word), NameClass::Indeclinable, "{word}");
        }
        assert_eq!(classify("никита"), NameClass::Unknown);
    }
}
