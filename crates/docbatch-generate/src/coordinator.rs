use std::time::Instant;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use docbatch_core::{
    GenerationResult, GenerationTask, PlaceholderDefinition, RunSummary, validate_definitions,
};
use docbatch_morph::{Inflector, MorphAnalyzer, RussianAnalyzer};

use crate::config::{GenerationOptions, JobConfig, WorkerCommand};
use crate::errors::{GenerationError, Result};
use crate::executor::{Executor, ProcessPoolExecutor, SequentialExecutor};
use crate::filename::{FilenameRegistry, synthesize};
use crate::resolver::ValueResolver;
use crate::spreadsheet::{Sheet, read_sheet};

/// Lifecycle of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Preparing,
    Running,
    Completed,
    Failed,
}

/// Progress hooks. Both methods default to doing nothing.
pub trait RunObserver {
    fn on_state(&mut self, _state: RunState) {}

    /// Called once per task as its result arrives; `done` counts results so
    /// far out of `total`.
    fn on_result(&mut self, _result: &GenerationResult, _done: usize, _total: usize) {}
}

#[derive(Debug, Default)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

/// Outcome of a run that got past preparation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub state: RunState,
    pub summary: RunSummary,
    /// Per-task results sorted by row.
    pub results: Vec<GenerationResult>,
}

/// Tasks built from a job, ready to execute.
#[derive(Debug, Clone)]
pub struct PreparedRun {
    pub headers: Vec<String>,
    pub tasks: Vec<GenerationTask>,
}

/// Drives a job from the spreadsheet to written documents.
pub struct Coordinator<A = RussianAnalyzer> {
    job: JobConfig,
    options: GenerationOptions,
    inflector: Inflector<A>,
    state: RunState,
}

impl Coordinator<RussianAnalyzer> {
    pub fn new(job: JobConfig, options: GenerationOptions) -> Self {
        Self::with_inflector(job, options, Inflector::new())
    }
}

impl<A: MorphAnalyzer> Coordinator<A> {
    pub fn with_inflector(job: JobConfig, options: GenerationOptions, inflector: Inflector<A>) -> Self {
        Self {
            job,
            options,
            inflector,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn job(&self) -> &JobConfig {
        &self.job
    }

    /// Read the spreadsheet and build one task per data row.
    ///
    /// Errors here abort the run before any document is written.
    pub fn prepare(&self) -> Result<PreparedRun> {
        let definitions: Vec<PlaceholderDefinition> = self
            .job
            .placeholders
            .iter()
            .filter(|def| def.active)
            .cloned()
            .collect();
        validate_definitions(&definitions)?;
        let date = self.job.date()?;

        let sheet = read_sheet(&self.job.spreadsheet, self.job.sheet.as_deref())?;
        let required: Vec<String> = definitions
            .iter()
            .filter_map(PlaceholderDefinition::required_column)
            .map(str::to_string)
            .collect();
        let missing = sheet.missing_columns(required.iter().map(String::as_str));
        if !missing.is_empty() {
            return Err(GenerationError::MissingRequiredColumns(missing));
        }
        if let Some(column) = &self.job.filename_column {
            if !sheet.has_column(column) {
                return Err(GenerationError::InvalidConfig(format!(
                    "filename column '{column}' not found in spreadsheet"
                )));
            }
        }

        std::fs::create_dir_all(&self.job.output_folder).map_err(|source| {
            GenerationError::OutputFolder {
                path: self.job.output_folder.clone(),
                source,
            }
        })?;

        let tasks = self.build_tasks(&sheet, &definitions, &required, date);
        Ok(PreparedRun {
            headers: sheet.headers,
            tasks,
        })
    }

    fn build_tasks(
        &self,
        sheet: &Sheet,
        definitions: &[PlaceholderDefinition],
        required: &[String],
        date: NaiveDate,
    ) -> Vec<GenerationTask> {
        let resolver = ValueResolver::new(self.job.dropdowns.clone(), date);
        let mut filenames = FilenameRegistry::new();

        sheet
            .rows
            .iter()
            .enumerate()
            .map(|(row_index, row)| {
                let resolved_values = definitions
                    .iter()
                    .map(|def| {
                        let raw = resolver.resolve(def, row);
                        (def.name.clone(), self.inflector.inflect(&raw, def.case))
                    })
                    .collect();
                let mut task = GenerationTask {
                    row_index,
                    row_data: row.clone(),
                    template_path: self.job.template.clone(),
                    output_folder: self.job.output_folder.clone(),
                    filename_pattern: self.job.filename_pattern.clone(),
                    required_columns: required.to_vec(),
                    placeholder_definitions: definitions.to_vec(),
                    filename_column: self.job.filename_column.clone(),
                    resolved_values,
                    filename: String::new(),
                };
                let column_value = task.filename_column.as_deref().map(|col| row.value(col));
                let name = synthesize(
                    &task.filename_pattern,
                    row_index,
                    task.is_incomplete(),
                    column_value,
                );
                task.filename = filenames.claim(name);
                task
            })
            .collect()
    }

    /// Prepare, execute and summarize the job.
    pub fn run(&mut self, observer: &mut dyn RunObserver) -> Result<RunReport> {
        let start = Instant::now();
        self.transition(RunState::Preparing, observer);
        info!(
            spreadsheet = %self.job.spreadsheet.display(),
            template = %self.job.template.display(),
            workers = self.options.workers,
            "run started"
        );

        let prepared = match self.prepare() {
            Ok(prepared) => prepared,
            Err(err) => {
                warn!(error = %err, "run aborted during preparation");
                self.transition(RunState::Failed, observer);
                return Err(err);
            }
        };
        let total = prepared.tasks.len();

        let mut executor = match self.executor() {
            Ok(executor) => executor,
            Err(err) => {
                warn!(error = %err, "no executor available");
                self.transition(RunState::Failed, observer);
                return Err(err);
            }
        };
        info!(tasks = total, strategy = executor.name(), "tasks prepared");
        self.transition(RunState::Running, observer);

        let mut results = Vec::with_capacity(total);
        let executed = executor.execute_all(prepared.tasks, &mut |result: GenerationResult| {
            results.push(result);
            if let Some(last) = results.last() {
                observer.on_result(last, results.len(), total);
            }
        });
        if let Err(err) = executed {
            warn!(error = %err, "execution failed");
            self.transition(RunState::Failed, observer);
            return Err(err);
        }

        results.sort_by_key(|result| result.index);
        let mut summary: RunSummary = results.iter().collect();
        summary.duration_ms = start.elapsed().as_millis() as u64;

        let state = if summary.processed > 0 {
            RunState::Completed
        } else {
            RunState::Failed
        };
        info!(
            total = summary.total,
            processed = summary.processed,
            with_empty = summary.with_empty,
            errors = summary.errors.len(),
            duration_ms = summary.duration_ms,
            "run finished"
        );
        self.transition(state, observer);

        Ok(RunReport {
            state,
            summary,
            results,
        })
    }

    fn executor(&self) -> Result<Box<dyn Executor>> {
        if self.options.workers <= 1 {
            return Ok(Box::new(SequentialExecutor));
        }
        let command = match &self.options.worker_command {
            Some(command) => command.clone(),
            None => {
                let command = WorkerCommand::current_exe()?;
                info!(
                    program = %command.program.display(),
                    "no worker command configured, re-launching the current executable"
                );
                command
            }
        };
        Ok(Box::new(ProcessPoolExecutor::new(
            self.options.workers,
            self.options.task_timeout,
            command,
        )))
    }

    fn transition(&mut self, state: RunState, observer: &mut dyn RunObserver) {
        self.state = state;
        observer.on_state(state);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    use std::time::Duration;

    use docbatch_core::{GrammaticalCase, SourceType, TaskErrorKind};

    use super::*;

    fn temp_out_dir(label: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("docbatch_{label}_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    fn job(dir: &Path, csv: &str) -> JobConfig {
        let spreadsheet = dir.join("people.csv");
        std::fs::write(&spreadsheet, csv).expect("write csv");
        JobConfig {
            spreadsheet,
            sheet: None,
            template: dir.join("template.docx"),
            output_folder: dir.join("out"),
            filename_pattern: "{i:04d}{suffix}.docx".to_string(),
            filename_column: None,
            generation_date: Some("01.01.2025".to_string()),
            workers: 1,
            task_timeout_secs: 60,
            dropdowns: BTreeMap::new(),
            placeholders: vec![
                PlaceholderDefinition::new("ФИО", SourceType::ExcelColumn, "ФИО")
                    .with_case(GrammaticalCase::Dative)
                    .required(),
                PlaceholderDefinition::new("дата", SourceType::Date, ""),
                PlaceholderDefinition::new("город", SourceType::Static, "Москва").inactive(),
            ],
        }
    }

    #[derive(Default)]
    struct Recorder {
        states: Vec<RunState>,
        progress: Vec<(usize, usize)>,
    }

    impl RunObserver for Recorder {
        fn on_state(&mut self, state: RunState) {
            self.states.push(state);
        }

        fn on_result(&mut self, _result: &GenerationResult, done: usize, total: usize) {
            self.progress.push((done, total));
        }
    }

    #[test]
    fn prepare_resolves_and_inflects_per_row() {
        let dir = temp_out_dir("prepare");
        let coordinator = Coordinator::new(
            job(&dir, "ФИО;Город\nИванов Иван;Тула\n;Орёл\n"),
            GenerationOptions::default(),
        );

        let prepared = coordinator.prepare().expect("prepare");
        assert_eq!(prepared.headers, vec!["ФИО", "Город"]);
        assert_eq!(prepared.tasks.len(), 2);

        let first = &prepared.tasks[0];
        assert_eq!(
            first.resolved_values.get("ФИО").map(String::as_str),
            Some("Иванову Ивану")
        );
        assert_eq!(
            first.resolved_values.get("дата").map(String::as_str),
            Some("01.01.2025")
        );
        assert!(!first.resolved_values.contains_key("город"));
        assert_eq!(first.filename, "0001.docx");
        assert_eq!(prepared.tasks[1].filename, "0002_пусто.docx");
        assert!(dir.join("out").is_dir());

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn missing_required_column_aborts() {
        let dir = temp_out_dir("missing_column");
        let mut coordinator =
            Coordinator::new(job(&dir, "Имя\nИван\n"), GenerationOptions::default());
        let mut recorder = Recorder::default();

        let err = coordinator.run(&mut recorder).expect_err("abort");
        match err {
            GenerationError::MissingRequiredColumns(columns) => assert_eq!(columns, vec!["ФИО"]),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(recorder.states, vec![RunState::Preparing, RunState::Failed]);
        assert_eq!(coordinator.state(), RunState::Failed);
        assert!(!dir.join("out").exists());

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn run_with_missing_template_fails_every_row() {
        let dir = temp_out_dir("no_template");
        let mut coordinator = Coordinator::new(
            job(&dir, "ФИО\nИванов\nПетров\n"),
            GenerationOptions::default(),
        );
        let mut recorder = Recorder::default();

        let report = coordinator.run(&mut recorder).expect("run");
        assert_eq!(report.state, RunState::Failed);
        assert_eq!(report.summary.processed, 0);
        assert_eq!(report.summary.errors.len(), 2);
        assert_eq!(recorder.progress, vec![(1, 2), (2, 2)]);
        assert_eq!(
            recorder.states,
            vec![RunState::Preparing, RunState::Running, RunState::Failed]
        );

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn configured_worker_command_is_used_for_the_pool() {
        let dir = temp_out_dir("worker_command");
        let options = GenerationOptions {
            workers: 2,
            task_timeout: Duration::from_secs(5),
            worker_command: Some(WorkerCommand::new("/nonexistent/docbatch-worker")),
        };
        let mut coordinator = Coordinator::new(job(&dir, "ФИО\nИванов\nПетров\n"), options);

        let report = coordinator.run(&mut NoopObserver).expect("run");
        assert_eq!(report.state, RunState::Failed);
        assert_eq!(report.results.len(), 2);
        assert!(report.results.iter().all(|result| {
            result.error.as_ref().map(|err| err.kind) == Some(TaskErrorKind::WorkerCrashed)
        }));

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn filename_column_must_exist() {
        let dir = temp_out_dir("filename_column");
        let mut config = job(&dir, "ФИО\nИванов\n");
        config.filename_column = Some("Табельный".to_string());
        let coordinator = Coordinator::new(config, GenerationOptions::default());

        assert!(matches!(
            coordinator.prepare(),
            Err(GenerationError::InvalidConfig(_))
        ));

        std::fs::remove_dir_all(dir).ok();
    }
}
