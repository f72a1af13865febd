//! `docbatch inspect`: what a job would see before generating anything.

use std::collections::BTreeMap;

use docbatch_core::{PlaceholderDefinition, SourceType};
use docbatch_generate::Sheet;

/// How one placeholder would resolve against the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Column { blank_rows: usize },
    MissingColumn,
    List(String),
    ListUnset,
    Date,
    Static,
    Inactive,
}

pub fn resolution(
    definition: &PlaceholderDefinition,
    sheet: &Sheet,
    dropdowns: &BTreeMap<String, String>,
) -> Resolution {
    if !definition.active {
        return Resolution::Inactive;
    }
    match definition.source_type {
        SourceType::ExcelColumn if sheet.has_column(&definition.source_value) => {
            Resolution::Column {
                blank_rows: sheet
                    .rows
                    .iter()
                    .filter(|row| row.is_blank(&definition.source_value))
                    .count(),
            }
        }
        SourceType::ExcelColumn => Resolution::MissingColumn,
        SourceType::DropdownList => match dropdowns.get(&definition.source_value) {
            Some(value) => Resolution::List(value.clone()),
            None => Resolution::ListUnset,
        },
        SourceType::Date => Resolution::Date,
        SourceType::Static => Resolution::Static,
    }
}

pub fn render(
    sheet: &Sheet,
    definitions: &[PlaceholderDefinition],
    dropdowns: &BTreeMap<String, String>,
) -> String {
    let mut out = format!("columns: {}\nrows: {}\nplaceholders:", sheet.headers.join(", "), sheet.len());
    for definition in definitions {
        let status = match resolution(definition, sheet, dropdowns) {
            Resolution::Column { blank_rows: 0 } => format!("column '{}'", definition.source_value),
            Resolution::Column { blank_rows } => format!(
                "column '{}', blank in {blank_rows} rows",
                definition.source_value
            ),
            Resolution::MissingColumn if definition.required => {
                format!("column '{}' MISSING (required, run will abort)", definition.source_value)
            }
            Resolution::MissingColumn => {
                format!("column '{}' missing, resolves to empty", definition.source_value)
            }
            Resolution::List(value) => format!("list '{}' = {value}", definition.source_value),
            Resolution::ListUnset => {
                format!("list '{}' not set, resolves to empty", definition.source_value)
            }
            Resolution::Date => "generation date".to_string(),
            Resolution::Static => format!("static '{}'", definition.source_value),
            Resolution::Inactive => "inactive".to_string(),
        };
        out.push_str(&format!(
            "\n  {} ({}): {status}",
            definition.literal(),
            definition.case
        ));
    }
    out
}
