use serde::{Deserialize, Serialize};

use crate::task::{GenerationResult, TaskErrorKind};

/// Terminal status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Every task produced a document.
    Completed,
    /// At least one document was written and at least one row failed.
    CompletedWithErrors,
    /// No document was written.
    Failed,
}

/// A failed row, as reported to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// One-based row number.
    pub row: usize,
    pub kind: TaskErrorKind,
    pub message: String,
}

/// Aggregate of all task results of a run.
///
/// Every field is a commutative fold, so the order in which results arrive
/// does not matter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total: usize,
    pub processed: usize,
    pub with_empty: usize,
    pub errors: Vec<RowError>,
    #[serde(default)]
    pub duration_ms: u64,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: &GenerationResult) {
        self.total += 1;
        if result.success {
            self.processed += 1;
            if result.is_incomplete {
                self.with_empty += 1;
            }
            return;
        }

        let (kind, message) = match &result.error {
            Some(error) => (error.kind, error.message.clone()),
            None => (TaskErrorKind::Panic, "task failed without an error".to_string()),
        };
        self.errors.push(RowError {
            row: result.row_number(),
            kind,
            message,
        });
    }

    /// Sort errors by row so reports are stable regardless of arrival order.
    pub fn sort_errors(&mut self) {
        self.errors.sort_by_key(|error| error.row);
    }

    pub fn status(&self) -> RunStatus {
        if self.processed == 0 {
            RunStatus::Failed
        } else if self.errors.is_empty() {
            RunStatus::Completed
        } else {
            RunStatus::CompletedWithErrors
        }
    }
}

impl<'a> FromIterator<&'a GenerationResult> for RunSummary {
    fn from_iter<I: IntoIterator<Item = &'a GenerationResult>>(iter: I) -> Self {
        let mut summary = RunSummary::new();
        for result in iter {
            summary.record(result);
        }
        summary.sort_errors();
        summary
    }
}
