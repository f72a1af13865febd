use std::collections::BTreeMap;

use chrono::NaiveDate;

use docbatch_core::{DATE_FORMAT, PlaceholderDefinition, RowData, SourceType};

/// Turns placeholder definitions into raw per-row values.
///
/// Dropdown selections and the generation date are fixed when the resolver
/// is built; resolution itself never fails and yields an empty string for
/// anything missing.
#[derive(Debug, Clone)]
pub struct ValueResolver {
    dropdowns: BTreeMap<String, String>,
    date: String,
}

impl ValueResolver {
    pub fn new(dropdowns: BTreeMap<String, String>, generation_date: NaiveDate) -> Self {
        Self {
            dropdowns,
            date: generation_date.format(DATE_FORMAT).to_string(),
        }
    }

    /// The generation date as rendered into documents.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn resolve(&self, definition: &PlaceholderDefinition, row: &RowData) -> String {
        match definition.source_type {
            SourceType::ExcelColumn => row.value(&definition.source_value).to_string(),
            SourceType::DropdownList => self
                .dropdowns
                .get(&definition.source_value)
                .cloned()
                .unwrap_or_default(),
            SourceType::Date => self.date.clone(),
            SourceType::Static => definition.source_value.clone(),
        }
    }

    /// Raw value of every active definition, by placeholder name.
    pub fn resolve_all(
        &self,
        definitions: &[PlaceholderDefinition],
        row: &RowData,
    ) -> BTreeMap<String, String> {
        definitions
            .iter()
            .filter(|def| def.active)
            .map(|def| (def.name.clone(), self.resolve(def, row)))
            .collect()
    }
}
