//! Closed word lists consulted by the name rules.

/// Foreign and borrowed names that never decline.
pub(crate) const INDECLINABLE_NAMES: &[&str] = &[
    "гюго", "дюма", "золя", "гёте", "гете", "верди", "руссо", "шоу", "дега", "мари", "бизе",
    "ватто", "кюри", "дидро", "мюссе", "сальери", "джо", "ли", "ким", "пак", "хо", "ву",
];

/// Feminine given names that end like `-ина` surnames but decline as nouns.
pub(crate) const FEMININE_GIVEN_NAMES: &[&str] = &[
    "марина", "ирина", "галина", "алина", "полина", "екатерина", "кристина", "карина", "арина",
    "нина", "валентина", "регина", "зарина", "дина", "ангелина", "каролина", "элина", "эвелина",
    "альбина", "сабина", "лина", "эльвина", "мальвина", "розалина", "марьина", "дарина", "сабрина",
    "ярина", "мадина", "амина", "алевтина", "фаина", "руфина", "ольга", "анна",
    "людмила", "светлана", "татьяна", "елена", "наталья", "мария", "любовь",
];

/// Masculine given names ending in `-а`/`-я`.
pub(crate) const MASCULINE_A_NAMES: &[&str] = &[
    "никита", "илья", "кузьма", "фома", "лука", "савва", "данила", "гаврила", "фока", "миша", "паша",
];

/// Masculine given names ending like `-ов`/`-ин` surnames but declining as
/// plain nouns (`Константином`, not `Константиным`).
pub(crate) const MASCULINE_GIVEN_NAMES: &[&str] = &[
    "константин", "валентин", "мартин", "вениамин", "флорин", "яков", "антонин", "серафин",
];

/// Given names with irregular stems.
pub(crate) const IRREGULAR_NAMES: &[(&str, [&str; 6])] = &[
    ("лев", ["лев", "льва", "льву", "льва", "львом", "льве"]),
    ("пётр", ["пётр", "петра", "петру", "петра", "петром", "петре"]),
    ("петр", ["петр", "петра", "петру", "петра", "петром", "петре"]),
    ("павел", ["павел", "павла", "павлу", "павла", "павлом", "павле"]),
];
