mod inspect;
mod notice;
mod registry;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use docbatch_core::{GenerationResult, GrammaticalCase};
use docbatch_generate::{
    Coordinator, GenerationError, JobConfig, RunObserver, RunState, config::parse_date, read_sheet,
};
use docbatch_morph::Inflector;
use registry::{RunContext, init_run_logging, init_stderr_logging, start_run, write_summary};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("run failed: {0}")]
    RunFailed(String),
}

#[derive(Parser, Debug)]
#[command(name = "docbatch", version, about = "Bulk document generation from spreadsheets")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one document per spreadsheet row.
    Generate(GenerateArgs),
    /// Serve generation tasks over stdin/stdout (started by `generate`).
    #[command(hide = true)]
    Worker,
    /// Inflect a value into a grammatical case.
    Inflect(InflectArgs),
    /// Show how a job's placeholders resolve against its spreadsheet.
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// TOML job file.
    #[arg(long)]
    job: PathBuf,
    /// Worker process count; 1 runs in-process.
    #[arg(long)]
    workers: Option<usize>,
    /// Output folder, overriding the job file.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Generation date (dd.mm.yyyy), overriding the job file.
    #[arg(long)]
    date: Option<String>,
    /// Output directory for run artifacts.
    #[arg(long, default_value = "runs")]
    run_dir: PathBuf,
}

#[derive(Args, Debug)]
struct InflectArgs {
    /// Value to inflect.
    text: String,
    /// Target case; every case is printed when omitted.
    #[arg(long)]
    case: Option<GrammaticalCase>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// TOML job file.
    #[arg(long)]
    job: PathBuf,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Worker => run_worker(),
        Command::Inflect(args) => run_inflect(args),
        Command::Inspect(args) => run_inspect(args),
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let GenerateArgs {
        job: job_path,
        workers,
        out,
        date,
        run_dir,
    } = args;

    let mut job = JobConfig::load(&job_path)?;
    if let Some(workers) = workers {
        if workers == 0 {
            return Err(CliError::InvalidConfig(
                "--workers must be at least 1".to_string(),
            ));
        }
        job.workers = workers;
    }
    if let Some(out) = out {
        job.output_folder = out;
    }
    if let Some(date) = date {
        parse_date(&date)?;
        job.generation_date = Some(date);
    }

    let run_id = Uuid::new_v4().to_string();
    let run_ctx = RunContext {
        run_id: run_id.clone(),
        started_at: chrono::Utc::now(),
        run_dir,
        job_path,
        job: job.clone(),
    };
    let run_paths = start_run(&run_ctx)?;
    init_run_logging(&run_paths.logs_path)?;

    tracing::info!(
        event = "run_started",
        run_id = %run_id,
        job = %run_ctx.job_path.display(),
        workers = job.workers
    );

    let options = job.options();
    let mut coordinator = Coordinator::new(job, options);
    let mut progress = ProgressLog;
    let report = match coordinator.run(&mut progress) {
        Ok(report) => report,
        Err(err) => {
            tracing::warn!(event = "run_aborted", run_id = %run_id, error = %err);
            return Err(err.into());
        }
    };

    write_summary(&run_paths, &run_id, &report)?;
    tracing::info!(
        event = "run_finished",
        run_id = %run_id,
        state = ?report.state,
        processed = report.summary.processed,
        errors = report.summary.errors.len(),
        summary = %run_paths.summary_path.display()
    );

    println!("{}", notice::render(&report.summary));
    println!("run artifacts: {}", run_paths.root.display());

    if report.state == RunState::Failed {
        return Err(CliError::RunFailed(format!(
            "no document was generated ({} rows failed)",
            report.summary.errors.len()
        )));
    }
    Ok(())
}

fn run_worker() -> Result<(), CliError> {
    init_stderr_logging()?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    docbatch_generate::serve(stdin.lock(), stdout.lock())?;
    Ok(())
}

fn run_inflect(args: InflectArgs) -> Result<(), CliError> {
    let inflector = Inflector::new();
    match args.case {
        Some(case) => println!("{}", inflector.inflect(&args.text, case)),
        None => {
            for case in GrammaticalCase::ALL {
                println!("{:<14} {}", case.name(), inflector.inflect(&args.text, case));
            }
        }
    }
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<(), CliError> {
    init_stderr_logging()?;
    let job = JobConfig::load(&args.job)?;
    let sheet = read_sheet(&job.spreadsheet, job.sheet.as_deref())?;
    println!("{}", inspect::render(&sheet, &job.placeholders, &job.dropdowns));
    Ok(())
}

/// Logs each row as its result arrives.
struct ProgressLog;

impl RunObserver for ProgressLog {
    fn on_state(&mut self, state: RunState) {
        tracing::debug!(event = "state_changed", state = ?state);
    }

    fn on_result(&mut self, result: &GenerationResult, done: usize, total: usize) {
        match &result.error {
            None => tracing::info!(
                event = "row_finished",
                row = result.row_number(),
                filename = result.filename.as_deref().unwrap_or_default(),
                incomplete = result.is_incomplete,
                done,
                total
            ),
            Some(error) => tracing::warn!(
                event = "row_failed",
                row = result.row_number(),
                kind = error.kind.as_str(),
                error = %error.message,
                done,
                total
            ),
        }
    }
}
