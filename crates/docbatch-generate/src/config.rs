use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use docbatch_core::{DATE_FORMAT, PlaceholderDefinition};

use crate::errors::{GenerationError, Result};

pub const DEFAULT_FILENAME_PATTERN: &str = "{i:04d}{suffix}.docx";
pub const DEFAULT_TASK_TIMEOUT_SECS: u64 = 120;

/// One bulk generation job, as read from a TOML job file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobConfig {
    pub spreadsheet: PathBuf,
    /// Sheet name; the first sheet when unset. Ignored for CSV input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,
    pub template: PathBuf,
    pub output_folder: PathBuf,
    #[serde(default = "default_filename_pattern")]
    pub filename_pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename_column: Option<String>,
    /// `dd.mm.yyyy`; today when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_date: Option<String>,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_task_timeout_secs")]
    pub task_timeout_secs: u64,
    /// Current selection of each dropdown list, by list key.
    #[serde(default)]
    pub dropdowns: BTreeMap<String, String>,
    #[serde(default)]
    pub placeholders: Vec<PlaceholderDefinition>,
}

fn default_filename_pattern() -> String {
    DEFAULT_FILENAME_PATTERN.to_string()
}

fn default_workers() -> usize {
    1
}

fn default_task_timeout_secs() -> u64 {
    DEFAULT_TASK_TIMEOUT_SECS
}

impl JobConfig {
    /// Read a job file. Relative paths inside it are taken relative to the
    /// directory holding the file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let mut job = Self::from_toml_str(&raw)?;
        if let Some(base) = path.parent() {
            job.resolve_paths(base);
        }
        Ok(job)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let job: Self = toml::from_str(raw)?;
        job.validate()?;
        Ok(job)
    }

    pub fn resolve_paths(&mut self, base: &Path) {
        for path in [
            &mut self.spreadsheet,
            &mut self.template,
            &mut self.output_folder,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(GenerationError::InvalidConfig(
                "workers must be at least 1".to_string(),
            ));
        }
        if self.task_timeout_secs == 0 {
            return Err(GenerationError::InvalidConfig(
                "task_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.filename_pattern.trim().is_empty() {
            return Err(GenerationError::InvalidConfig(
                "filename_pattern must not be empty".to_string(),
            ));
        }
        self.date()?;
        Ok(())
    }

    /// The run's generation date.
    pub fn date(&self) -> Result<NaiveDate> {
        match self.generation_date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => parse_date(raw),
            _ => Ok(chrono::Local::now().date_naive()),
        }
    }

    pub fn options(&self) -> GenerationOptions {
        GenerationOptions {
            workers: self.workers,
            task_timeout: Duration::from_secs(self.task_timeout_secs),
            worker_command: None,
        }
    }
}

/// Parse a `dd.mm.yyyy` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|err| {
        GenerationError::InvalidConfig(format!("invalid date '{raw}' (expected dd.mm.yyyy): {err}"))
    })
}

/// Execution settings of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    /// 1 runs every task in-process.
    pub workers: usize,
    pub task_timeout: Duration,
    /// Command that starts one worker process when `workers > 1`.
    ///
    /// When unset the running executable is re-launched as `<exe> worker`,
    /// which only works for the `docbatch` binary. Programs that embed the
    /// coordinator must point this at a binary that serves
    /// [`crate::worker::serve`] on its stdin and stdout.
    pub worker_command: Option<WorkerCommand>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            workers: 1,
            task_timeout: Duration::from_secs(DEFAULT_TASK_TIMEOUT_SECS),
            worker_command: None,
        }
    }
}

/// How to start a worker process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl WorkerCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// The running executable invoked as `<exe> worker`.
    pub fn current_exe() -> Result<Self> {
        Ok(Self::new(std::env::current_exe()?).arg("worker"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docbatch_core::{GrammaticalCase, SourceType};

    const JOB: &str = r#"
spreadsheet = "data/people.xlsx"
template = "/srv/templates/letter.docx"
output_folder = "out"
generation_date = "01.02.2025"
workers = 4

[dropdowns]
"Должность" = "инженер"

[[placeholders]]
name = "ФИО"
source_type = "excel_column"
source_value = "ФИО"
case = "dative"
required = true

[[placeholders]]
name = "дата"
source_type = "date"
"#;

    #[test]
    fn parses_job_with_defaults() {
        let job = JobConfig::from_toml_str(JOB).expect("job");

        assert_eq!(job.filename_pattern, DEFAULT_FILENAME_PATTERN);
        assert_eq!(job.task_timeout_secs, DEFAULT_TASK_TIMEOUT_SECS);
        assert_eq!(job.workers, 4);
        assert_eq!(job.placeholders.len(), 2);
        assert_eq!(job.placeholders[0].case, GrammaticalCase::Dative);
        assert!(job.placeholders[0].required);
        assert_eq!(job.placeholders[1].source_type, SourceType::Date);
        assert!(job.placeholders[1].active);
        assert_eq!(job.dropdowns.get("Должность").map(String::as_str), Some("инженер"));
        assert_eq!(
            job.date().expect("date"),
            NaiveDate::from_ymd_opt(2025, 2, 1).expect("valid date")
        );
    }

    #[test]
    fn relative_paths_follow_job_file() {
        let mut job = JobConfig::from_toml_str(JOB).expect("job");
        job.resolve_paths(Path::new("/jobs/april"));

        assert_eq!(job.spreadsheet, PathBuf::from("/jobs/april/data/people.xlsx"));
        assert_eq!(job.template, PathBuf::from("/srv/templates/letter.docx"));
        assert_eq!(job.output_folder, PathBuf::from("/jobs/april/out"));
    }

    #[test]
    fn rejects_zero_workers_and_bad_dates() {
        let zero = JOB.replace("workers = 4", "workers = 0");
        assert!(matches!(
            JobConfig::from_toml_str(&zero),
            Err(GenerationError::InvalidConfig(_))
        ));

        let bad_date = JOB.replace("01.02.2025", "2025-02-01");
        assert!(matches!(
            JobConfig::from_toml_str(&bad_date),
            Err(GenerationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn options_mirror_job() {
        let options = JobConfig::from_toml_str(JOB).expect("job").options();
        assert_eq!(options.workers, 4);
        assert_eq!(options.task_timeout, Duration::from_secs(120));
        assert!(options.worker_command.is_none());
    }
}
