//! Reading the input table into normalized display strings.

use std::collections::HashSet;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::{NaiveDate, NaiveDateTime};

use docbatch_core::{DATE_FORMAT, RowData};

use crate::errors::{GenerationError, Result};

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// Header row plus every non-blank data row of one sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<RowData>,
}

impl Sheet {
    /// Build a sheet from raw cell text; the first row holds the headers.
    pub fn from_records(records: Vec<Vec<String>>) -> Self {
        let mut records = records.into_iter();
        let Some(header_row) = records.next() else {
            return Self::default();
        };
        let headers = normalize_headers(header_row);

        let rows = records
            .filter(|record| record.iter().any(|cell| !cell.trim().is_empty()))
            .map(|record| {
                headers
                    .iter()
                    .enumerate()
                    .map(|(idx, header)| {
                        let value = record.get(idx).map(|cell| normalize_text(cell));
                        (header.clone(), value.unwrap_or_default())
                    })
                    .collect::<RowData>()
            })
            .collect();

        Self { headers, rows }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|header| header == column)
    }

    /// Columns from `columns` absent from the header row, deduplicated in
    /// first-seen order.
    pub fn missing_columns<'a>(&self, columns: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut seen = HashSet::new();
        columns
            .into_iter()
            .filter(|column| !self.has_column(column) && seen.insert(*column))
            .map(str::to_string)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Read `path` once. Workbooks use `sheet` or their first sheet; `.csv`
/// files ignore it.
pub fn read_sheet(path: &Path, sheet: Option<&str>) -> Result<Sheet> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if extension == "csv" {
        read_csv(path)
    } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        read_workbook(path, sheet)
    } else {
        Err(GenerationError::UnsupportedSpreadsheet(path.to_path_buf()))
    }
}

fn read_workbook(path: &Path, sheet: Option<&str>) -> Result<Sheet> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names().to_owned();
    let name = match sheet {
        Some(name) => sheet_names
            .iter()
            .find(|candidate| candidate.as_str() == name)
            .cloned()
            .ok_or_else(|| {
                GenerationError::Spreadsheet(format!(
                    "sheet '{name}' not found in {} (available: {})",
                    path.display(),
                    sheet_names.join(", ")
                ))
            })?,
        None => sheet_names.first().cloned().ok_or_else(|| {
            GenerationError::Spreadsheet(format!("{} has no sheets", path.display()))
        })?,
    };

    let range = workbook.worksheet_range(&name)?;
    let records = range
        .rows()
        .map(|row| row.iter().map(cell_display).collect())
        .collect();
    Ok(Sheet::from_records(records))
}

fn read_csv(path: &Path) -> Result<Sheet> {
    let raw = std::fs::read_to_string(path)?;
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(&raw);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(sniff_delimiter(raw))
        .from_reader(raw.as_bytes());

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(str::to_string).collect());
    }
    Ok(Sheet::from_records(records))
}

/// `;` when the header line has more semicolons than commas.
fn sniff_delimiter(raw: &str) -> u8 {
    let first = raw.lines().next().unwrap_or_default();
    if first.matches(';').count() > first.matches(',').count() {
        b';'
    } else {
        b','
    }
}

/// Display string of one workbook cell.
pub fn cell_display(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(value) => normalize_text(value),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => format_float(*value),
        Data::Bool(value) => value.to_string(),
        Data::DateTime(value) => value
            .as_datetime()
            .map(|dt| dt.format(DATE_FORMAT).to_string())
            .unwrap_or_else(|| format_float(value.as_f64())),
        Data::DateTimeIso(value) => normalize_text(value),
        Data::DurationIso(value) => value.clone(),
    }
}

fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Trim cell text and rewrite ISO dates (with or without a time) as
/// `dd.mm.yyyy`.
fn normalize_text(value: &str) -> String {
    let trimmed = value.trim();
    iso_date(trimmed)
        .map(|date| date.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

fn iso_date(value: &str) -> Option<NaiveDate> {
    if value.len() < 10 || !value.as_bytes()[0].is_ascii_digit() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|dt| dt.date())
}

/// Blank headers become `column_{n}` (1-based); repeated headers get `_2`,
/// `_3` suffixes.
fn normalize_headers(raw: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .enumerate()
        .map(|(idx, header)| {
            let header = header.trim();
            let base = if header.is_empty() {
                format!("column_{}", idx + 1)
            } else {
                header.to_string()
            };
            let mut name = base.clone();
            let mut n = 2;
            while !seen.insert(name.clone()) {
                name = format!("{base}_{n}");
                n += 1;
            }
            name
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn header_row_names_columns() {
        let sheet = Sheet::from_records(records(&[
            &["ФИО", "", "ФИО"],
            &["Иванов Иван", "x", "дубль"],
        ]));
        assert_eq!(sheet.headers, vec!["ФИО", "column_2", "ФИО_2"]);
        assert_eq!(sheet.rows[0].value("ФИО_2"), "дубль");
    }

    #[test]
    fn blank_rows_are_skipped_and_short_rows_padded() {
        let sheet = Sheet::from_records(records(&[
            &["a", "b"],
            &["1"],
            &["", "  "],
            &["2", "3"],
        ]));
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.rows[0].get("b"), Some(""));
        assert_eq!(sheet.rows[1].value("b"), "3");
    }

    #[test]
    fn cells_render_as_display_strings() {
        assert_eq!(cell_display(&Data::Float(42.0)), "42");
        assert_eq!(cell_display(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_display(&Data::Int(-7)), "-7");
        assert_eq!(cell_display(&Data::Empty), "");
        assert_eq!(
            cell_display(&Data::DateTimeIso("2025-01-31T00:00:00".to_string())),
            "31.01.2025"
        );
        assert_eq!(cell_display(&Data::String("  текст ".to_string())), "текст");
    }

    #[test]
    fn iso_strings_become_dotted_dates() {
        assert_eq!(normalize_text("2024-03-05"), "05.03.2024");
        assert_eq!(normalize_text("2024-03-05 10:20:00"), "05.03.2024");
        assert_eq!(normalize_text("2024-13-05"), "2024-13-05");
        assert_eq!(normalize_text("05.03.2024"), "05.03.2024");
    }

    #[test]
    fn missing_columns_are_unique() {
        let sheet = Sheet::from_records(records(&[&["ФИО"]]));
        assert_eq!(
            sheet.missing_columns(["ФИО", "Адрес", "Адрес", "Город"]),
            vec!["Адрес", "Город"]
        );
    }

    #[test]
    fn delimiter_follows_header_line() {
        assert_eq!(sniff_delimiter("a;b;c\n1,5;2;3"), b';');
        assert_eq!(sniff_delimiter("a,b\n1;2"), b',');
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = read_sheet(Path::new("people.txt"), None).expect_err("unsupported");
        assert!(matches!(err, GenerationError::UnsupportedSpreadsheet(_)));
    }
}
