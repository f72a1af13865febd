use docbatch_core::GrammaticalCase;
use tracing::trace;

use crate::analyzer::{MorphAnalyzer, RussianAnalyzer};
use crate::rules::{self, Gender, decline_patronymic, infer_gender, patronymic_gender};
use crate::text::is_cyrillic;
use crate::token::{Casing, Token};

/// Inflects multi-word values into a grammatical case.
///
/// Each inflector owns its analyzer; build one per worker and reuse it.
#[derive(Debug, Clone)]
pub struct Inflector<A = RussianAnalyzer> {
    analyzer: A,
}

impl Inflector<RussianAnalyzer> {
    pub fn new() -> Self {
        Self::with_analyzer(RussianAnalyzer::new())
    }
}

impl Default for Inflector<RussianAnalyzer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: MorphAnalyzer> Inflector<A> {
    pub fn with_analyzer(analyzer: A) -> Self {
        Self { analyzer }
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Inflect `value` into `case`. Never fails; unknown words come back as
    /// they went in.
    pub fn inflect(&self, value: &str, case: GrammaticalCase) -> String {
        let value = value.trim();
        if case == GrammaticalCase::Nominative || value.is_empty() {
            return value.to_string();
        }

        let tokens: Vec<&str> = value.split_whitespace().collect();
        let gender = phrase_gender(&tokens);
        let mut inflected = Vec::with_capacity(tokens.len());
        let mut rest = tokens.as_slice();
        while let [first, tail @ ..] = rest {
            if let [second, after @ ..] = tail {
                if is_birth_year_phrase(first, second) {
                    inflected.push((*first).to_string());
                    inflected.push((*second).to_string());
                    rest = after;
                    continue;
                }
            }
            inflected.push(self.inflect_token(first, gender, case));
            rest = tail;
        }
        inflected.join(" ")
    }

    fn inflect_token(&self, raw: &str, gender: Option<Gender>, case: GrammaticalCase) -> String {
        let token = Token::split(raw);
        if token.is_skipped() {
            return raw.to_string();
        }
        token.assemble(&self.inflect_core(token.core, gender, case))
    }

    fn inflect_core(&self, core: &str, gender: Option<Gender>, case: GrammaticalCase) -> String {
        let casing = Casing::of(core);
        if casing != Casing::Lower && core.contains('-') {
            return core
                .split('-')
                .map(|part| {
                    if part.chars().any(is_cyrillic) {
                        self.inflect_core(part, gender, case)
                    } else {
                        part.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join("-");
        }

        let lower = core.to_lowercase();
        casing.apply(&self.inflect_word(&lower, casing, gender, case))
    }

    fn inflect_word(
        &self,
        word: &str,
        casing: Casing,
        gender: Option<Gender>,
        case: GrammaticalCase,
    ) -> String {
        if let Some(form) = decline_patronymic(word, case) {
            return form;
        }
        if casing != Casing::Lower {
            let gender = gender.unwrap_or_else(|| infer_gender(word));
            if let Some(form) = rules::decline(word, gender, case) {
                return form;
            }
        }
        match self.analyzer.parse(word).first() {
            Some(parse) => parse.inflect(case).to_string(),
            None => {
                trace!(word, case = %case, "no parse, keeping token");
                word.to_string()
            }
        }
    }
}

/// Gender of the first patronymic in the value, if any.
fn phrase_gender(tokens: &[&str]) -> Option<Gender> {
    tokens
        .iter()
        .find_map(|raw| patronymic_gender(&Token::split(raw).core.to_lowercase()))
}

fn is_birth_year_phrase(first: &str, second: &str) -> bool {
    Token::split(first).core.to_lowercase() == "года"
        && Token::split(second).core.to_lowercase() == "рождения"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{Parse, PartOfSpeech};
    use GrammaticalCase::*;

    struct EchoAnalyzer;

    impl MorphAnalyzer for EchoAnalyzer {
        fn parse(&self, word: &str) -> Vec<Parse> {
            vec![Parse::fixed(&format!("{word}!"), PartOfSpeech::Noun)]
        }
    }

    #[test]
    fn patronymic_sets_gender_for_the_whole_value() {
        let inflector = Inflector::new();
        assert_eq!(
            inflector.inflect("Иванова Мария Петровна", Genitive),
            "Ивановой Марии Петровны"
        );
        assert_eq!(
            inflector.inflect("Иванов Иван Петрович", Instrumental),
            "Ивановым Иваном Петровичем"
        );
    }

    #[test]
    fn birth_year_phrase_is_untouched() {
        let inflector = Inflector::new();
        assert_eq!(
            inflector.inflect("Петров 1990 года рождения", Dative),
            "Петрову 1990 года рождения"
        );
    }

    #[test]
    fn hyphenated_names_inflect_each_part() {
        let inflector = Inflector::new();
        assert_eq!(inflector.inflect("Римский-Корсаков", Dative), "Римскому-Корсакову");
    }

    #[test]
    fn lower_case_words_go_to_the_analyzer() {
        let inflector = Inflector::with_analyzer(EchoAnalyzer);
        assert_eq!(inflector.inflect("дом", Dative), "дом!");
        assert_eq!(inflector.inflect("Иванов", Dative), "Иванову");
    }

    #[test]
    fn boxed_analyzers_are_accepted() {
        let boxed: Box<dyn MorphAnalyzer> = Box::new(EchoAnalyzer);
        let inflector = Inflector::with_analyzer(boxed);
        assert_eq!(inflector.inflect("дом", Genitive), "дом!");
    }
}
