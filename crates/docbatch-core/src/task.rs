use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::placeholder::PlaceholderDefinition;

/// Normalized display values of one spreadsheet row, keyed by column header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowData(BTreeMap<String, String>);

impl RowData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.insert(column.into(), value.into());
    }

    /// Value of `column`, or `None` when the column is absent.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    /// Value of `column`, treating an absent column as blank.
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    pub fn is_blank(&self, column: &str) -> bool {
        self.value(column).trim().is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|value| value.trim().is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RowData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Self-contained unit of work for one spreadsheet row.
///
/// Everything a worker needs travels inside the task, so it can be shipped
/// to another process as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationTask {
    /// Zero-based position of the row among the data rows.
    pub row_index: usize,
    pub row_data: RowData,
    pub template_path: PathBuf,
    pub output_folder: PathBuf,
    pub filename_pattern: String,
    pub required_columns: Vec<String>,
    pub placeholder_definitions: Vec<PlaceholderDefinition>,
    pub filename_column: Option<String>,
    /// Placeholder name to resolved and inflected value.
    pub resolved_values: BTreeMap<String, String>,
    /// Run-unique output file name.
    pub filename: String,
}

impl GenerationTask {
    /// One-based row number used in user-facing messages.
    pub fn row_number(&self) -> usize {
        self.row_index + 1
    }

    /// True when any required column is blank for this row.
    pub fn is_incomplete(&self) -> bool {
        self.required_columns
            .iter()
            .any(|column| self.row_data.is_blank(column))
    }

    /// Placeholder literal (`{name}`) to value, for every active definition.
    pub fn replacements(&self) -> BTreeMap<String, String> {
        self.placeholder_definitions
            .iter()
            .filter(|def| def.active)
            .map(|def| {
                let value = self
                    .resolved_values
                    .get(&def.name)
                    .cloned()
                    .unwrap_or_default();
                (def.literal(), value)
            })
            .collect()
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_folder.join(&self.filename)
    }
}

/// Category of a row-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskErrorKind {
    TemplateLoad,
    Substitution,
    Write,
    Timeout,
    WorkerCrashed,
    Panic,
}

impl TaskErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskErrorKind::TemplateLoad => "template_load",
            TaskErrorKind::Substitution => "substitution",
            TaskErrorKind::Write => "write",
            TaskErrorKind::Timeout => "timeout",
            TaskErrorKind::WorkerCrashed => "worker_crashed",
            TaskErrorKind::Panic => "panic",
        }
    }
}

/// Tagged row failure carried inside a [`GenerationResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskError {
    pub kind: TaskErrorKind,
    pub message: String,
}

impl TaskError {
    pub fn new(kind: TaskErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.message)
    }
}

/// Outcome of one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub success: bool,
    /// Zero-based row index of the task.
    pub index: usize,
    pub filename: Option<String>,
    pub is_incomplete: bool,
    pub error: Option<TaskError>,
    #[serde(default)]
    pub logs: Vec<String>,
}

impl GenerationResult {
    pub fn succeeded(index: usize, filename: String, is_incomplete: bool) -> Self {
        Self {
            success: true,
            index,
            filename: Some(filename),
            is_incomplete,
            error: None,
            logs: Vec::new(),
        }
    }

    pub fn failed(index: usize, error: TaskError) -> Self {
        Self {
            success: false,
            index,
            filename: None,
            is_incomplete: false,
            error: Some(error),
            logs: Vec::new(),
        }
    }

    pub fn with_logs(mut self, logs: Vec<String>) -> Self {
        self.logs = logs;
        self
    }

    pub fn row_number(&self) -> usize {
        self.index + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::SourceType;

    fn task() -> GenerationTask {
        GenerationTask {
            row_index: 2,
            row_data: [("ФИО", "Иванов Иван"), ("Отдел", " ")].into_iter().collect(),
            template_path: PathBuf::from("template.docx"),
            output_folder: PathBuf::from("out"),
            filename_pattern: "{i:04d}{suffix}.docx".to_string(),
            required_columns: vec!["ФИО".to_string()],
            placeholder_definitions: vec![
                PlaceholderDefinition::new("ФИО", SourceType::ExcelColumn, "ФИО"),
                PlaceholderDefinition::new("{город}", SourceType::Static, "Тула"),
                PlaceholderDefinition::new("скрыто", SourceType::Static, "x").inactive(),
            ],
            filename_column: None,
            resolved_values: [("ФИО", "Иванову Ивану"), ("{город}", "Тула")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            filename: "0003.docx".to_string(),
        }
    }

    #[test]
    fn replacements_use_literals_of_active_definitions() {
        let replacements = task().replacements();
        assert_eq!(replacements.len(), 2);
        assert_eq!(replacements["{ФИО}"], "Иванову Ивану");
        assert_eq!(replacements["{город}"], "Тула");
    }

    #[test]
    fn incomplete_when_required_column_blank() {
        let mut task = task();
        assert!(!task.is_incomplete());
        task.required_columns.push("Отдел".to_string());
        assert!(task.is_incomplete());
        task.required_columns = vec!["Нет такой".to_string()];
        assert!(task.is_incomplete());
    }

    #[test]
    fn row_number_is_one_based() {
        assert_eq!(task().row_number(), 3);
        assert_eq!(task().output_path(), PathBuf::from("out").join("0003.docx"));
    }
}
