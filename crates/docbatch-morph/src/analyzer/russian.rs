use std::collections::{HashMap, HashSet};

use super::lexicon::{
    ANIMATE_NOUNS, ANIMATE_SUFFIXES, FEMININE_A_NOUNS, FIXED_NOUNS, INANIMATE_NOUNS,
    IRREGULAR_NOUNS, IY_NOUNS, MASCULINE_AGENT_SUFFIXES, MASCULINE_NOUNS, MASCULINE_SOFT_NOUNS,
    NEUTER_O_NOUNS, OBLIQUE_ENDINGS, OBLIQUE_LOOKING_NOUNS, OY_NOUNS, STRESSED_SOFT_NOUNS,
};
use super::{MorphAnalyzer, Parse, PartOfSpeech, Tag};
use crate::text::{
    drop_chars, ends_with_any, has_vowel, is_consonant, is_sibilant, is_velar, is_vowel, last_char,
    syllables,
};

type Endings = [&'static str; 6];

const HARD_MASC_ADJ: Endings = ["ый", "ого", "ому", "ого", "ым", "ом"];
const STRESSED_MASC_ADJ: Endings = ["ой", "ого", "ому", "ого", "ым", "ом"];
const STRESSED_VELAR_MASC_ADJ: Endings = ["ой", "ого", "ому", "ого", "им", "ом"];
const VELAR_MASC_ADJ: Endings = ["ий", "ого", "ому", "ого", "им", "ом"];
const SOFT_MASC_ADJ: Endings = ["ий", "его", "ему", "его", "им", "ем"];
const HARD_FEM_ADJ: Endings = ["ая", "ой", "ой", "ую", "ой", "ой"];
const SIBILANT_FEM_ADJ: Endings = ["ая", "ей", "ей", "ую", "ей", "ей"];
const SOFT_FEM_ADJ: Endings = ["яя", "ей", "ей", "юю", "ей", "ей"];
const HARD_NEUT_ADJ: Endings = ["ое", "ого", "ому", "ое", "ым", "ом"];
const VELAR_NEUT_ADJ: Endings = ["ое", "ого", "ому", "ое", "им", "ом"];
const SOFT_NEUT_ADJ: Endings = ["ее", "его", "ему", "ее", "им", "ем"];
const HARD_PLURAL_ADJ: Endings = ["ые", "ых", "ым", "ых", "ыми", "ых"];
const SOFT_PLURAL_ADJ: Endings = ["ие", "их", "им", "их", "ими", "их"];

const NEUTER_O: Endings = ["о", "а", "у", "о", "ом", "е"];
const NEUTER_IE: Endings = ["ие", "ия", "ию", "ие", "ием", "ии"];
const NEUTER_YE: Endings = ["ье", "ья", "ью", "ье", "ьем", "ье"];
const NEUTER_TSE: Endings = ["це", "ца", "цу", "це", "цем", "це"];
const FEM_IYA: Endings = ["ия", "ии", "ии", "ию", "ией", "ии"];
const FEM_YA_SOFT: Endings = ["ья", "ьи", "ье", "ью", "ьёй", "ье"];
const FEM_YA: Endings = ["я", "и", "е", "ю", "ей", "е"];
const FEM_SOFT: Endings = ["ь", "и", "и", "ь", "ью", "и"];
const MASC_SOFT: Endings = ["ь", "я", "ю", "я", "ем", "е"];
const MASC_STRESSED_SOFT: Endings = ["ь", "я", "ю", "я", "ём", "е"];
const MASC_IY: Endings = ["ий", "ия", "ию", "ия", "ием", "ии"];
const MASC_Y: Endings = ["й", "я", "ю", "я", "ем", "е"];
const MASC_YOK: Endings = ["ёк", "ька", "ьку", "ька", "ьком", "ьке"];
const MASC_YOK_AFTER_VOWEL: Endings = ["ёк", "йка", "йку", "йка", "йком", "йке"];
const MASC_OK: Endings = ["ок", "ка", "ку", "ка", "ком", "ке"];
const MASC_ETS: Endings = ["ец", "ца", "цу", "ца", "цом", "це"];
const MASC_ETS_UNSTRESSED: Endings = ["ец", "ца", "цу", "ца", "цем", "це"];
const MASC_ETS_AFTER_VOWEL: Endings = ["ец", "йца", "йцу", "йца", "йцом", "йце"];
const MASC_SIBILANT: Endings = ["", "а", "у", "а", "ем", "е"];
const MASC_HARD: Endings = ["", "а", "у", "а", "ом", "е"];

/// Paradigm shape picked for a noun before the forms are built.
enum NounShape {
    Neuter(usize, &'static Endings),
    Feminine(usize, Endings),
    Masculine(usize, &'static Endings),
}

/// Built-in analyzer: a small lexicon over suffix paradigms for
/// nominative-singular nouns and adjectives. Words that already carry an
/// oblique or plural ending get no parse.
#[derive(Debug, Clone)]
pub struct RussianAnalyzer {
    irregular: HashMap<&'static str, (bool, &'static [&'static str; 6])>,
    fixed: HashSet<&'static str>,
    neuter_o: HashSet<&'static str>,
    oy_nouns: HashSet<&'static str>,
    iy_nouns: HashSet<&'static str>,
    masculine_soft: HashSet<&'static str>,
    stressed_soft: HashSet<&'static str>,
    animate: HashSet<&'static str>,
    inanimate: HashSet<&'static str>,
    oblique_looking: HashSet<&'static str>,
    masculine: HashSet<&'static str>,
    feminine_a: HashSet<&'static str>,
}

impl Default for RussianAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl RussianAnalyzer {
    pub fn new() -> Self {
        Self {
            irregular: IRREGULAR_NOUNS
                .iter()
                .map(|(lemma, animate, forms)| (*lemma, (*animate, forms)))
                .collect(),
            fixed: FIXED_NOUNS.iter().copied().collect(),
            neuter_o: NEUTER_O_NOUNS.iter().copied().collect(),
            oy_nouns: OY_NOUNS.iter().copied().collect(),
            iy_nouns: IY_NOUNS.iter().copied().collect(),
            masculine_soft: MASCULINE_SOFT_NOUNS.iter().copied().collect(),
            stressed_soft: STRESSED_SOFT_NOUNS.iter().copied().collect(),
            animate: ANIMATE_NOUNS.iter().copied().collect(),
            inanimate: INANIMATE_NOUNS.iter().copied().collect(),
            oblique_looking: OBLIQUE_LOOKING_NOUNS.iter().copied().collect(),
            masculine: MASCULINE_NOUNS.iter().copied().collect(),
            feminine_a: FEMININE_A_NOUNS.iter().copied().collect(),
        }
    }

    fn is_animate(&self, word: &str) -> bool {
        if self.animate.contains(word) {
            return true;
        }
        if self.inanimate.contains(word) {
            return false;
        }
        ends_with_any(word, ANIMATE_SUFFIXES) && !word.ends_with("мент")
    }

    fn is_masculine_stem(&self, stem: &str) -> bool {
        self.masculine.contains(stem)
            || self.animate.contains(stem)
            || self.inanimate.contains(stem)
            || ends_with_any(stem, MASCULINE_AGENT_SUFFIXES)
    }

    /// `складом`, `кадров`, `отдела`, `учителя`: case forms of another lemma.
    fn is_oblique_form(&self, word: &str) -> bool {
        if self.oblique_looking.contains(word) {
            return false;
        }
        if ends_with_any(word, OBLIQUE_ENDINGS) {
            return true;
        }
        let stem = drop_chars(word, 1);
        match last_char(word) {
            Some('а') => !self.feminine_a.contains(word) && self.is_masculine_stem(stem),
            Some('я') => {
                let lemma = format!("{stem}ь");
                lemma.ends_with("тель")
                    || self.masculine_soft.contains(lemma.as_str())
                    || self.stressed_soft.contains(lemma.as_str())
            }
            _ => false,
        }
    }

    fn adjective(&self, word: &str) -> Option<Parse> {
        if self.oy_nouns.contains(word) || self.iy_nouns.contains(word) {
            return None;
        }
        let stem = drop_chars(word, 2);
        if !has_vowel(stem) {
            return None;
        }
        let before = last_char(stem)?;
        let hard_before = is_velar(before) || is_hushing(before);
        let (endings, plural) = match word {
            w if w.ends_with("ый") => (&HARD_MASC_ADJ, false),
            w if w.ends_with("ой") && hard_before => (&STRESSED_VELAR_MASC_ADJ, false),
            w if w.ends_with("ой") => (&STRESSED_MASC_ADJ, false),
            w if w.ends_with("ий") && is_velar(before) => (&VELAR_MASC_ADJ, false),
            w if w.ends_with("ий") && (before == 'н' || is_hushing(before)) => {
                (&SOFT_MASC_ADJ, false)
            }
            w if w.ends_with("ая") && is_hushing(before) => (&SIBILANT_FEM_ADJ, false),
            w if w.ends_with("ая") => (&HARD_FEM_ADJ, false),
            w if w.ends_with("яя") => (&SOFT_FEM_ADJ, false),
            w if w.ends_with("ое") && hard_before => (&VELAR_NEUT_ADJ, false),
            w if w.ends_with("ое") => (&HARD_NEUT_ADJ, false),
            w if w.ends_with("ее") && is_consonant(before) => (&SOFT_NEUT_ADJ, false),
            w if w.ends_with("ые") => (&HARD_PLURAL_ADJ, true),
            w if w.ends_with("ие") && hard_before => (&SOFT_PLURAL_ADJ, true),
            _ => return None,
        };
        Some(Parse::new(
            word,
            Tag::adjective(plural),
            build_forms(stem, endings),
        ))
    }

    fn noun_shape(&self, word: &str) -> Option<NounShape> {
        let before = |strip: usize| last_char(drop_chars(word, strip));

        if self.is_oblique_form(word) {
            return None;
        }
        if word.ends_with("ство") || self.neuter_o.contains(word) {
            return Some(NounShape::Neuter(1, &NEUTER_O));
        }
        if word.ends_with("ие") {
            return Some(NounShape::Neuter(2, &NEUTER_IE));
        }
        if word.ends_with("ье") {
            return Some(NounShape::Neuter(2, &NEUTER_YE));
        }
        if word.ends_with("це") {
            return Some(NounShape::Neuter(2, &NEUTER_TSE));
        }
        if word.ends_with("ия") {
            return Some(NounShape::Feminine(2, FEM_IYA));
        }
        if word.ends_with("ья") {
            return Some(NounShape::Feminine(2, FEM_YA_SOFT));
        }
        if word.ends_with('я') && before(1).is_some_and(is_consonant) {
            return Some(NounShape::Feminine(1, FEM_YA));
        }
        if word.ends_with('а') {
            let prev = before(1).filter(|ch| is_consonant(*ch))?;
            let genitive = if is_velar(prev) || is_hushing(prev) { "и" } else { "ы" };
            let instrumental = if is_sibilant(prev) { "ей" } else { "ой" };
            return Some(NounShape::Feminine(
                1,
                ["а", genitive, "е", "у", instrumental, "е"],
            ));
        }
        if word.ends_with('ь') {
            return Some(if self.stressed_soft.contains(word) {
                NounShape::Masculine(1, &MASC_STRESSED_SOFT)
            } else if self.masculine_soft.contains(word) || word.ends_with("тель") {
                NounShape::Masculine(1, &MASC_SOFT)
            } else {
                NounShape::Feminine(1, FEM_SOFT)
            });
        }
        if word.ends_with("ий") {
            let prev = before(2)?;
            let adjectival = is_velar(prev) || prev == 'н' || is_hushing(prev);
            return (self.iy_nouns.contains(word) || !adjectival)
                .then_some(NounShape::Masculine(2, &MASC_IY));
        }
        if word.ends_with('й') {
            let noun = match word {
                w if w.ends_with("ой") => self.oy_nouns.contains(w),
                w if w.ends_with("ый") => false,
                _ => before(1).is_some_and(is_vowel),
            };
            return noun.then_some(NounShape::Masculine(1, &MASC_Y));
        }
        if !last_char(word).is_some_and(is_consonant) || !has_vowel(word) {
            return None;
        }
        Some(self.consonant_shape(word))
    }

    fn consonant_shape(&self, word: &str) -> NounShape {
        let stem = drop_chars(word, 2);
        let after_vowel = last_char(stem).is_some_and(is_vowel);
        let endings = if word.ends_with("ёк") {
            if after_vowel {
                (2, &MASC_YOK_AFTER_VOWEL)
            } else {
                (2, &MASC_YOK)
            }
        } else if word.ends_with("ок")
            && has_vowel(stem)
            && (syllables(word) >= 3 || ends_with_any(word, &["чок", "шок", "жок"]))
        {
            (2, &MASC_OK)
        } else if word.ends_with("ец") && has_vowel(stem) {
            if after_vowel {
                (2, &MASC_ETS_AFTER_VOWEL)
            } else if word.ends_with("нец") && syllables(word) >= 3 {
                (2, &MASC_ETS_UNSTRESSED)
            } else {
                (2, &MASC_ETS)
            }
        } else if ends_with_any(word, &["ищ", "аж", "уж"]) || word.ends_with('ц') {
            (0, &MASC_SIBILANT)
        } else {
            (0, &MASC_HARD)
        };
        NounShape::Masculine(endings.0, endings.1)
    }

    fn noun(&self, word: &str) -> Option<Parse> {
        let parse = match self.noun_shape(word)? {
            NounShape::Neuter(strip, endings) => Parse::new(
                word,
                Tag::noun(false),
                build_forms(drop_chars(word, strip), endings),
            ),
            NounShape::Feminine(strip, endings) => Parse::new(
                word,
                Tag::noun(false),
                build_forms(drop_chars(word, strip), &endings),
            ),
            NounShape::Masculine(strip, endings) => {
                let animate = self.is_animate(word);
                let mut forms = build_forms(drop_chars(word, strip), endings);
                if !animate {
                    forms[3] = forms[0].clone();
                }
                Parse::new(word, Tag::noun(animate), forms)
            }
        };
        Some(parse)
    }
}

impl MorphAnalyzer for RussianAnalyzer {
    fn parse(&self, word: &str) -> Vec<Parse> {
        if let Some((animate, forms)) = self.irregular.get(word) {
            let forms = std::array::from_fn(|idx| forms[idx].to_string());
            return vec![Parse::new(word, Tag::noun(*animate), forms)];
        }
        if self.fixed.contains(word) {
            return vec![Parse::fixed(word, PartOfSpeech::Noun)];
        }
        self.adjective(word)
            .into_iter()
            .chain(self.noun(word))
            .collect()
    }
}

fn is_hushing(ch: char) -> bool {
    matches!(ch, 'ж' | 'ш' | 'ч' | 'щ')
}

fn build_forms(stem: &str, endings: &Endings) -> [String; 6] {
    std::array::from_fn(|idx| format!("{stem}{}", endings[idx]))
}
