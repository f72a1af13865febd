use regex::Regex;

use crate::error::Result;

/// Wrap a placeholder name in braces unless it already is.
pub fn placeholder_literal(name: &str) -> String {
    let name = name.trim();
    if name.starts_with('{') && name.ends_with('}') {
        name.to_string()
    } else {
        format!("{{{name}}}")
    }
}

/// Regex source matching `placeholder` literally.
///
/// A word-boundary anchor is added only at an edge whose character is itself
/// a word character: `дата` gets `\bдата\b`, `{дата}` gets no anchors at all.
pub fn boundary_pattern(placeholder: &str) -> String {
    let mut source = String::new();
    if placeholder.chars().next().is_some_and(is_word_char) {
        source.push_str(r"\b");
    }
    source.push_str(&regex::escape(placeholder));
    if placeholder.chars().last().is_some_and(is_word_char) {
        source.push_str(r"\b");
    }
    source
}

/// Compiled form of [`boundary_pattern`].
pub fn placeholder_pattern(placeholder: &str) -> Result<Regex> {
    Ok(Regex::new(&boundary_pattern(placeholder))?)
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_word_is_anchored_on_both_sides() {
        let pattern = placeholder_pattern("дата").expect("pattern");
        assert!(pattern.is_match("выдан дата подписи"));
        assert!(!pattern.is_match("датами"));
        assert!(!pattern.is_match("мандата"));
    }

    #[test]
    fn braced_token_is_not_anchored() {
        assert_eq!(boundary_pattern("{дата}"), r"\{дата\}");
        let pattern = placeholder_pattern("{дата}").expect("pattern");
        assert!(pattern.is_match("срок:{дата}г."));
    }

    #[test]
    fn mixed_edges_anchor_only_the_word_side() {
        assert_eq!(boundary_pattern("№ дела"), r"№ дела\b");
    }

    #[test]
    fn bare_word_pattern_does_not_corrupt_braced_neighbour() {
        let bare = placeholder_pattern("дата").expect("pattern");
        let text = "{дата}";
        let hit = bare.find(text).expect("bare word is still found between braces");
        assert_eq!(hit.as_str(), "дата");
        assert!(!bare.is_match("{датаN}"));
    }
}
