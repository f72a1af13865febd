use docbatch_core::GrammaticalCase;

use super::{Endings, Gender, with_ending};
use crate::text::drop_chars;

const MASCULINE_SUFFIXES: &[&str] = &["ович", "евич", "ьич"];
const FEMININE_SUFFIXES: &[&str] = &["овна", "евна", "ична", "ьевна"];

/// `-ович`/`-евич`: the whole word is the stem.
const MASCULINE_ENDINGS: Endings = ["", "а", "у", "а", "ем", "е"];
/// `-ьич` carries final stress, so the instrumental is `-ом` (`Ильичом`).
const SHORT_MASCULINE_ENDINGS: Endings = ["", "а", "у", "а", "ом", "е"];
/// Feminine patronymics replace the final `-а`.
const FEMININE_ENDINGS: Endings = ["а", "ы", "е", "у", "ой", "е"];

/// Gender of `word` when it is a patronymic.
pub fn patronymic_gender(word: &str) -> Option<Gender> {
    if MASCULINE_SUFFIXES.iter().any(|suffix| word.ends_with(suffix)) {
        Some(Gender::Masculine)
    } else if FEMININE_SUFFIXES.iter().any(|suffix| word.ends_with(suffix)) {
        Some(Gender::Feminine)
    } else {
        None
    }
}

/// Decline a lower-cased patronymic; `None` when `word` is not one.
pub fn decline_patronymic(word: &str, case: GrammaticalCase) -> Option<String> {
    match patronymic_gender(word)? {
        Gender::Masculine if word.ends_with("ьич") => {
            Some(with_ending(word, &SHORT_MASCULINE_ENDINGS, case))
        }
        Gender::Masculine => Some(with_ending(word, &MASCULINE_ENDINGS, case)),
        Gender::Feminine => Some(with_ending(drop_chars(word, 1), &FEMININE_ENDINGS, case)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_cases(word: &str) -> Vec<String> {
        GrammaticalCase::ALL
            .iter()
            .map(|case| decline_patronymic(word, *case).unwrap_or_default())
            .collect()
    }

    #[test]
    fn masculine_patronymic_keeps_stem() {
        assert_eq!(
            all_cases("иванович"),
            ["иванович", "ивановича", "ивановичу", "ивановича", "ивановичем", "ивановиче"]
        );
        assert_eq!(
            all_cases("сергеевич"),
            ["сергеевич", "сергеевича", "сергеевичу", "сергеевича", "сергеевичем", "сергеевиче"]
        );
    }

    #[test]
    fn short_masculine_patronymic_takes_stressed_instrumental() {
        assert_eq!(
            decline_patronymic("ильич", GrammaticalCase::Instrumental).as_deref(),
            Some("ильичом")
        );
    }

    #[test]
    fn feminine_patronymic_replaces_final_vowel() {
        assert_eq!(
            all_cases("петровна"),
            ["петровна", "петровны", "петровне", "петровну", "петровной", "петровне"]
        );
        assert_eq!(
            decline_patronymic("ильинична", GrammaticalCase::Genitive).as_deref(),
            Some("ильиничны")
        );
    }

    #[test]
    fn non_patronymics_do_not_match() {
        assert_eq!(patronymic_gender("иванов"), None);
        assert_eq!(decline_patronymic("иван", GrammaticalCase::Dative), None);
    }
}
