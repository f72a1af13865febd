//! Closed word lists for the built-in analyzer.

/// Nouns whose paradigm no suffix rule produces: `(lemma, animate, forms)`.
pub(super) const IRREGULAR_NOUNS: &[(&str, bool, [&str; 6])] = &[
    ("мать", true, ["мать", "матери", "матери", "мать", "матерью", "матери"]),
    ("дочь", true, ["дочь", "дочери", "дочери", "дочь", "дочерью", "дочери"]),
    ("отец", true, ["отец", "отца", "отцу", "отца", "отцом", "отце"]),
    ("ребёнок", true, ["ребёнок", "ребёнка", "ребёнку", "ребёнка", "ребёнком", "ребёнке"]),
    ("ребенок", true, ["ребенок", "ребенка", "ребенку", "ребенка", "ребенком", "ребенке"]),
    ("путь", false, ["путь", "пути", "пути", "путь", "путём", "пути"]),
    ("имя", false, ["имя", "имени", "имени", "имя", "именем", "имени"]),
    ("время", false, ["время", "времени", "времени", "время", "временем", "времени"]),
    ("знамя", false, ["знамя", "знамени", "знамени", "знамя", "знаменем", "знамени"]),
    ("племя", false, ["племя", "племени", "племени", "племя", "племенем", "племени"]),
    ("день", false, ["день", "дня", "дню", "день", "днём", "дне"]),
    ("сон", false, ["сон", "сна", "сну", "сон", "сном", "сне"]),
    ("конец", false, ["конец", "конца", "концу", "конец", "концом", "конце"]),
    ("огонь", false, ["огонь", "огня", "огню", "огонь", "огнём", "огне"]),
    ("камень", false, ["камень", "камня", "камню", "камень", "камнем", "камне"]),
    ("уровень", false, ["уровень", "уровня", "уровню", "уровень", "уровнем", "уровне"]),
    ("церковь", false, ["церковь", "церкви", "церкви", "церковь", "церковью", "церкви"]),
    ("любовь", false, ["любовь", "любви", "любви", "любовь", "любовью", "любви"]),
];

/// Borrowed nouns that never change.
pub(super) const FIXED_NOUNS: &[&str] = &[
    "кофе", "бюро", "метро", "кино", "пальто", "кафе", "радио", "такси", "жюри", "шоссе", "меню",
    "интервью", "депо", "какао", "пюре", "фойе", "хобби", "портфолио",
];

/// Neuter nouns in `-о` that decline; other `-о` words are left alone.
pub(super) const NEUTER_O_NOUNS: &[&str] = &[
    "место", "дело", "лицо", "окно", "письмо", "слово", "право", "число", "село", "дерево",
    "зеркало", "правило", "начало", "колесо", "облако", "озеро", "небо",
    "тело", "золото", "серебро", "масло", "мясо", "молоко", "утро", "лето",
];

/// Nouns in `-ой` (the ending is otherwise adjectival).
pub(super) const OY_NOUNS: &[&str] = &[
    "герой", "бой", "покой", "строй", "конвой", "слой", "рой", "зной", "отбой", "прибой", "разбой",
    "постой", "запой", "настрой",
];

/// Nouns in `-ий` (the ending is otherwise adjectival after `н`).
pub(super) const IY_NOUNS: &[&str] = &["гений"];

/// Masculine nouns in `-ь`; the rest are feminine.
pub(super) const MASCULINE_SOFT_NOUNS: &[&str] = &[
    "гость", "зверь", "медведь", "лебедь", "лагерь", "портфель", "автомобиль", "стиль", "профиль",
    "контроль", "спектакль", "фестиваль", "пароль", "ноготь", "корень", "ремень", "апрель",
    "июнь", "июль", "секретарь", "пекарь", "лекарь", "аптекарь", "библиотекарь", "токарь",
    "слесарь", "монастырь",
];

/// Masculine `-ь` nouns with a stressed ending: instrumental `-ём`.
pub(super) const STRESSED_SOFT_NOUNS: &[&str] = &[
    "рубль", "кремль", "конь", "дождь", "вождь", "гвоздь", "словарь", "календарь", "букварь",
    "январь", "февраль", "сентябрь", "октябрь", "ноябрь", "декабрь", "царь", "король",
];

/// Animate nouns no suffix rule recognizes.
pub(super) const ANIMATE_NOUNS: &[&str] = &[
    "человек", "друг", "брат", "сын", "муж", "дед", "внук", "кот", "волк", "сосед", "гость",
    "зверь", "медведь", "лебедь", "конь", "вождь", "царь", "король", "секретарь", "пекарь",
    "лекарь", "аптекарь", "библиотекарь", "токарь", "слесарь", "депутат", "кандидат", "солдат",
    "адвокат", "адресат", "дипломат", "пассажир", "командир", "герой", "гений", "воробей",
    "врач", "ткач", "силач", "хирург", "педагог", "юрист",
];

/// Person-denoting suffixes of masculine consonant nouns.
pub(super) const ANIMATE_SUFFIXES: &[&str] = &[
    "ист", "ник", "чик", "щик", "тор", "ер", "ёр", "ант", "ент", "ач", "лог", "тель",
];

/// Inanimate nouns carrying an animate suffix.
pub(super) const INANIMATE_NOUNS: &[&str] = &[
    "сектор", "вектор", "мотор", "реактор", "трактор", "генератор", "фактор", "монитор",
    "компьютер", "принтер", "характер", "номер", "размер", "пример", "вечер", "интерьер", "сервер",
    "каталог", "диалог", "налог", "монолог", "некролог", "вариант", "бриллиант", "процент",
    "компонент", "инцидент", "прецедент", "акцент", "праздник", "понедельник", "вторник",
    "учебник", "справочник", "задачник", "памятник", "подоконник", "чайник", "холодильник",
    "будильник", "ящик", "счётчик", "счетчик", "датчик", "двигатель", "выключатель",
    "показатель", "указатель", "носитель", "знаменатель", "числитель", "предохранитель",
    "обогреватель",
];

/// Endings of oblique-case and plural forms; such words get no parse.
pub(super) const OBLIQUE_ENDINGS: &[&str] = &[
    "ом", "ем", "ём", "ов", "ев", "ёв", "ам", "ям", "ах", "ях", "ым", "им", "ей", "ых", "их",
];

/// Nominative nouns that happen to end like an oblique form.
pub(super) const OBLIQUE_LOOKING_NOUNS: &[&str] = &[
    "дом", "том", "лом", "гром", "альбом", "агроном", "астроном", "эконом", "приём", "прием",
    "объём", "объем", "подъём", "подъем", "заём", "наём", "водоём", "шлем", "тандем", "модем",
    "остров", "ров", "улов", "плов", "покров", "зов", "гнев", "напев", "посев", "хлев", "храм",
    "шрам", "хлам", "бальзам", "ислам", "шах", "монах", "страх", "размах", "прах", "запах",
    "взмах", "крах", "режим", "грим", "нажим", "зажим", "дым", "музей", "хоккей", "юбилей",
    "лакей", "трофей", "клей",
];

/// Hard masculine nouns; `stem + а` is their genitive, never a feminine noun.
pub(super) const MASCULINE_NOUNS: &[&str] = &[
    "отдел", "склад", "цех", "договор", "документ", "кабинет", "офис", "филиал", "департамент",
    "завод", "банк", "магазин", "институт", "университет", "факультет", "комитет", "совет",
    "центр", "проект", "приказ", "штат", "отряд", "полк", "батальон", "район", "город", "округ",
    "суд", "орган", "фонд", "союз", "клуб", "театр", "архив", "журнал", "бюджет", "заказ", "счёт",
    "счет", "акт", "контракт", "объект", "пункт", "комбинат", "трест", "холдинг", "сервис",
    "труд", "стаж", "кадр", "персонал", "транспорт", "отпуск", "класс", "курс", "урок", "опыт",
];

/// Agent suffixes whose `-а` form is a masculine genitive.
pub(super) const MASCULINE_AGENT_SUFFIXES: &[&str] =
    &["ист", "ник", "чик", "щик", "тор", "ант", "ент"];

/// Feminine `-а` nouns built on a masculine-looking stem.
pub(super) const FEMININE_A_NOUNS: &[&str] = &[
    "техника", "клиника", "механика", "электроника", "паника", "хроника", "туника", "черника",
    "земляника", "брусника", "лента", "рента", "плацента",
];
