//! Single-word morphological analysis, the last step of the inflection chain.

mod lexicon;
mod russian;

use docbatch_core::GrammaticalCase;

pub use russian::RussianAnalyzer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Noun,
    Adjective,
}

/// Grammatical features of a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    pub pos: PartOfSpeech,
    /// Animate masculine nouns take the genitive form in the accusative.
    pub animate: bool,
    pub plural: bool,
    /// Indeclinable words: every form equals the normal form.
    pub fixed: bool,
}

impl Tag {
    pub fn noun(animate: bool) -> Self {
        Self {
            pos: PartOfSpeech::Noun,
            animate,
            plural: false,
            fixed: false,
        }
    }

    pub fn adjective(plural: bool) -> Self {
        Self {
            pos: PartOfSpeech::Adjective,
            animate: true,
            plural,
            fixed: false,
        }
    }
}

/// One reading of a word together with its full case paradigm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    pub normal_form: String,
    pub tag: Tag,
    forms: [String; 6],
}

impl Parse {
    pub fn new(normal_form: impl Into<String>, tag: Tag, forms: [String; 6]) -> Self {
        Self {
            normal_form: normal_form.into(),
            tag,
            forms,
        }
    }

    /// A parse whose every form is `word`.
    pub fn fixed(word: &str, pos: PartOfSpeech) -> Self {
        let tag = Tag {
            pos,
            animate: false,
            plural: false,
            fixed: true,
        };
        Self::new(word, tag, std::array::from_fn(|_| word.to_string()))
    }

    pub fn inflect(&self, case: GrammaticalCase) -> &str {
        &self.forms[case.index()]
    }

    pub fn forms(&self) -> &[String; 6] {
        &self.forms
    }
}

/// Parses lower-cased single words.
///
/// Implementations return every reading they know, best first, and an empty
/// vector for words they do not recognize.
pub trait MorphAnalyzer: Send {
    fn parse(&self, word: &str) -> Vec<Parse>;
}

impl<A: MorphAnalyzer + ?Sized> MorphAnalyzer for Box<A> {
    fn parse(&self, word: &str) -> Vec<Parse> {
        (**self).parse(word)
    }
}
