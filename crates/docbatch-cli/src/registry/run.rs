use std::fs::{OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use docbatch_core::{RunStatus, RunSummary};
use docbatch_generate::{JobConfig, RunReport, RunState};

use super::{RegistryError, RegistryResult};

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub run_dir: PathBuf,
    pub job_path: PathBuf,
    pub job: JobConfig,
}

/// JSON config written to each run directory.
#[derive(Debug, Serialize)]
struct RunConfig<'a> {
    run_id: &'a str,
    started_at: String,
    job_path: &'a Path,
    version: &'static str,
    job: &'a JobConfig,
}

/// JSON summary written when a run finishes.
#[derive(Debug, Serialize)]
struct RunSummaryFile<'a> {
    run_id: &'a str,
    finished_at: String,
    state: RunState,
    status: RunStatus,
    #[serde(flatten)]
    summary: &'a RunSummary,
    files: Vec<&'a str>,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub logs_path: PathBuf,
    pub summary_path: PathBuf,
}

pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let root = ctx
        .run_dir
        .join(format!("{timestamp}__run_{}", ctx.run_id));

    create_dir_all(&root)?;

    let config_path = root.join("config.json");
    let logs_path = root.join("logs.ndjson");
    let summary_path = root.join("summary.json");

    let config = RunConfig {
        run_id: &ctx.run_id,
        started_at: ctx.started_at.to_rfc3339(),
        job_path: &ctx.job_path,
        version: env!("CARGO_PKG_VERSION"),
        job: &ctx.job,
    };
    write_json(&config_path, &config)?;

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logs_path)?;

    Ok(RunPaths {
        root,
        config_path,
        logs_path,
        summary_path,
    })
}

pub fn write_summary(paths: &RunPaths, run_id: &str, report: &RunReport) -> RegistryResult<()> {
    let summary = RunSummaryFile {
        run_id,
        finished_at: Utc::now().to_rfc3339(),
        state: report.state,
        status: report.summary.status(),
        summary: &report.summary,
        files: report
            .results
            .iter()
            .filter_map(|result| result.filename.as_deref())
            .collect(),
    };
    write_json(&paths.summary_path, &summary)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> RegistryResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(file, value).map_err(RegistryError::from)
}
