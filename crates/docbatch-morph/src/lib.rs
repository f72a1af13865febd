//! Russian grammatical-case inflection for placeholder values.
//!
//! Values are inflected token by token. Each token goes through a fixed
//! chain: skip classes (dates, numbers, initials), patronymic tables,
//! surname tables for capitalized words, and finally a morphological
//! analyzer. Nothing in this crate fails: a token no rule understands is
//! returned as it came in.
//!
//! ```
//! use docbatch_core::GrammaticalCase;
//! use docbatch_morph::Inflector;
//!
//! let inflector = Inflector::new();
//! assert_eq!(
//!     inflector.inflect("Иванов Иван Петрович", GrammaticalCase::Dative),
//!     "Иванову Ивану Петровичу"
//! );
//! ```

pub mod analyzer;
mod inflector;
pub mod rules;
mod text;
mod token;

pub use analyzer::{MorphAnalyzer, Parse, PartOfSpeech, RussianAnalyzer, Tag};
pub use inflector::Inflector;
pub use rules::{Gender, NameClass};

use docbatch_core::GrammaticalCase;

/// Inflect `value` with a freshly built [`Inflector`].
///
/// Callers inflecting many values should keep one `Inflector` instead.
pub fn inflect(value: &str, case: GrammaticalCase) -> String {
    Inflector::new().inflect(value, case)
}
