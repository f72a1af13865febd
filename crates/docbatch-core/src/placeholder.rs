use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::pattern::placeholder_literal;

/// Where the value of a placeholder comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// A column of the input spreadsheet, named by `source_value`.
    #[serde(alias = "excel")]
    ExcelColumn,
    /// The current selection of a dropdown list, keyed by `source_value`.
    #[serde(alias = "list")]
    DropdownList,
    /// The run's generation date.
    Date,
    /// The literal `source_value`.
    Static,
}

/// Russian grammatical case requested for a placeholder value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrammaticalCase {
    #[default]
    #[serde(alias = "nomn")]
    Nominative,
    #[serde(alias = "gent")]
    Genitive,
    #[serde(alias = "datv")]
    Dative,
    #[serde(alias = "accs")]
    Accusative,
    #[serde(alias = "ablt")]
    Instrumental,
    #[serde(alias = "loct")]
    Prepositional,
}

impl GrammaticalCase {
    /// All cases in paradigm order.
    pub const ALL: [GrammaticalCase; 6] = [
        GrammaticalCase::Nominative,
        GrammaticalCase::Genitive,
        GrammaticalCase::Dative,
        GrammaticalCase::Accusative,
        GrammaticalCase::Instrumental,
        GrammaticalCase::Prepositional,
    ];

    /// Position of the case inside a six-slot paradigm table.
    pub fn index(self) -> usize {
        match self {
            GrammaticalCase::Nominative => 0,
            GrammaticalCase::Genitive => 1,
            GrammaticalCase::Dative => 2,
            GrammaticalCase::Accusative => 3,
            GrammaticalCase::Instrumental => 4,
            GrammaticalCase::Prepositional => 5,
        }
    }

    /// Short analyzer code (`nomn`, `gent`, ...).
    pub fn code(self) -> &'static str {
        match self {
            GrammaticalCase::Nominative => "nomn",
            GrammaticalCase::Genitive => "gent",
            GrammaticalCase::Dative => "datv",
            GrammaticalCase::Accusative => "accs",
            GrammaticalCase::Instrumental => "ablt",
            GrammaticalCase::Prepositional => "loct",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GrammaticalCase::Nominative => "nominative",
            GrammaticalCase::Genitive => "genitive",
            GrammaticalCase::Dative => "dative",
            GrammaticalCase::Accusative => "accusative",
            GrammaticalCase::Instrumental => "instrumental",
            GrammaticalCase::Prepositional => "prepositional",
        }
    }
}

impl fmt::Display for GrammaticalCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GrammaticalCase {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_lowercase();
        GrammaticalCase::ALL
            .into_iter()
            .find(|case| case.name() == needle || case.code() == needle)
            .ok_or_else(|| format!("unknown grammatical case: {value}"))
    }
}

/// A named token in a template and the rule that produces its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderDefinition {
    /// Token identifier, rendered in templates as `{name}`.
    pub name: String,
    pub source_type: SourceType,
    /// Column name, list key or literal; empty for `date`.
    #[serde(default)]
    pub source_value: String,
    #[serde(default)]
    pub case: GrammaticalCase,
    /// Flags rows whose source column is blank.
    #[serde(default)]
    pub required: bool,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl PlaceholderDefinition {
    pub fn new(
        name: impl Into<String>,
        source_type: SourceType,
        source_value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source_type,
            source_value: source_value.into(),
            case: GrammaticalCase::Nominative,
            required: false,
            active: true,
        }
    }

    pub fn with_case(mut self, case: GrammaticalCase) -> Self {
        self.case = case;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// The literal searched for in templates: the name wrapped in braces.
    pub fn literal(&self) -> String {
        placeholder_literal(&self.name)
    }

    /// Spreadsheet column this definition requires, if any.
    pub fn required_column(&self) -> Option<&str> {
        (self.active && self.required && self.source_type == SourceType::ExcelColumn)
            .then_some(self.source_value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_names_and_codes() {
        assert_eq!("dative".parse::<GrammaticalCase>(), Ok(GrammaticalCase::Dative));
        assert_eq!("ablt".parse::<GrammaticalCase>(), Ok(GrammaticalCase::Instrumental));
        assert!("vocative".parse::<GrammaticalCase>().is_err());
    }

    #[test]
    fn literal_wraps_bare_names_once() {
        let bare = PlaceholderDefinition::new("ФИО", SourceType::Static, "");
        let wrapped = PlaceholderDefinition::new("{ФИО}", SourceType::Static, "");
        assert_eq!(bare.literal(), "{ФИО}");
        assert_eq!(wrapped.literal(), "{ФИО}");
    }

    #[test]
    fn required_column_ignores_inactive_and_non_excel() {
        let excel = PlaceholderDefinition::new("ФИО", SourceType::ExcelColumn, "ФИО").required();
        let fixed = PlaceholderDefinition::new("город", SourceType::Static, "Москва").required();
        let off = excel.clone().inactive();

        assert_eq!(excel.required_column(), Some("ФИО"));
        assert_eq!(fixed.required_column(), None);
        assert_eq!(off.required_column(), None);
    }
}
