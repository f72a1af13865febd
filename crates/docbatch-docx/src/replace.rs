use std::collections::{BTreeMap, HashMap};

use docbatch_core::boundary_pattern;
use regex::{Captures, Regex};

use crate::error::Result;

/// Compiled literal-to-value map applied to run text.
///
/// Keys are tried longest first in a single left-to-right pass, so a value
/// that happens to contain another key is never substituted again.
#[derive(Debug, Clone)]
pub struct Replacements {
    values: HashMap<String, String>,
    /// Longest first.
    keys: Vec<String>,
    bounded: Option<Regex>,
    literal: Option<Regex>,
}

impl Replacements {
    pub fn new(map: &BTreeMap<String, String>) -> Result<Self> {
        let mut keys: Vec<String> = map.keys().filter(|key| !key.is_empty()).cloned().collect();
        keys.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));

        let (bounded, literal) = if keys.is_empty() {
            (None, None)
        } else {
            let bounded: Vec<String> = keys.iter().map(|key| boundary_pattern(key)).collect();
            let literal: Vec<String> = keys.iter().map(|key| regex::escape(key)).collect();
            (
                Some(Regex::new(&bounded.join("|"))?),
                Some(Regex::new(&literal.join("|"))?),
            )
        };

        Ok(Self {
            values: map
                .iter()
                .filter(|(key, _)| !key.is_empty())
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
            keys,
            bounded,
            literal,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// True when any key occurs in `text`.
    pub fn occurs_in(&self, text: &str) -> bool {
        self.keys.iter().any(|key| text.contains(key.as_str()))
    }

    /// Replace with word-boundary anchoring on alphanumeric key edges.
    pub fn replace_bounded(&self, text: &str) -> (String, usize) {
        self.replace_with(self.bounded.as_ref(), text)
    }

    /// Replace plain occurrences, no anchoring.
    pub fn replace_literal(&self, text: &str) -> (String, usize) {
        self.replace_with(self.literal.as_ref(), text)
    }

    fn replace_with(&self, pattern: Option<&Regex>, text: &str) -> (String, usize) {
        let Some(pattern) = pattern else {
            return (text.to_string(), 0);
        };
        let mut count = 0;
        let rewritten = pattern.replace_all(text, |caps: &Captures<'_>| {
            count += 1;
            self.values
                .get(&caps[0])
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        });
        (rewritten.into_owned(), count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replacements(pairs: &[(&str, &str)]) -> Replacements {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Replacements::new(&map).expect("replacements")
    }

    #[test]
    fn longest_key_wins_in_one_pass() {
        let r = replacements(&[("{дата}", "01.01.2025"), ("{дата подписи}", "{дата}")]);
        let (text, count) = r.replace_bounded("{дата подписи} / {дата}");
        assert_eq!(text, "{дата} / 01.01.2025");
        assert_eq!(count, 2);
    }

    #[test]
    fn bare_keys_respect_word_boundaries() {
        let r = replacements(&[("дата", "срок")]);
        assert_eq!(r.replace_bounded("дата и датами").0, "срок и датами");
        assert_eq!(r.replace_literal("дата и датами").0, "срок и срокми");
    }

    #[test]
    fn matching_is_case_sensitive() {
        let r = replacements(&[("{ФИО}", "Иванову")]);
        assert_eq!(r.replace_bounded("{фио}").1, 0);
        assert!(!r.occurs_in("{фио}"));
    }

    #[test]
    fn empty_map_changes_nothing() {
        let r = replacements(&[]);
        assert!(r.is_empty());
        assert_eq!(r.replace_bounded("{ФИО}"), ("{ФИО}".to_string(), 0));
    }
}
