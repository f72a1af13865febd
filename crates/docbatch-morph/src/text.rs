//! Character classes used by the rule tables.

pub(crate) fn is_cyrillic(ch: char) -> bool {
    matches!(ch, 'а'..='я' | 'А'..='Я' | 'ё' | 'Ё')
}

pub(crate) fn is_vowel(ch: char) -> bool {
    matches!(ch, 'а' | 'е' | 'ё' | 'и' | 'о' | 'у' | 'ы' | 'э' | 'ю' | 'я')
}

/// Hushing consonants plus `ц`; after them an unstressed `-ом` becomes `-ем`.
pub(crate) fn is_sibilant(ch: char) -> bool {
    matches!(ch, 'ж' | 'ш' | 'ч' | 'щ' | 'ц')
}

/// Velars, after which `ы` is spelled `и`.
pub(crate) fn is_velar(ch: char) -> bool {
    matches!(ch, 'г' | 'к' | 'х')
}

pub(crate) fn is_consonant(ch: char) -> bool {
    is_cyrillic(ch) && !is_vowel(ch) && !matches!(ch, 'ь' | 'ъ' | 'й')
}

pub(crate) fn last_char(word: &str) -> Option<char> {
    word.chars().last()
}

pub(crate) fn has_vowel(word: &str) -> bool {
    word.chars().any(is_vowel)
}

pub(crate) fn syllables(word: &str) -> usize {
    word.chars().filter(|ch| is_vowel(*ch)).count()
}

/// Drop the last `count` characters of `word`.
pub(crate) fn drop_chars(word: &str, count: usize) -> &str {
    let keep = word.chars().count().saturating_sub(count);
    match word.char_indices().nth(keep) {
        Some((idx, _)) => &word[..idx],
        None => word,
    }
}

pub(crate) fn ends_with_any(word: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|suffix| word.ends_with(suffix))
}
