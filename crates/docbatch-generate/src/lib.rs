//! Bulk document generation for docbatch.
//!
//! A [`Coordinator`] reads a job's spreadsheet once, resolves and inflects
//! every placeholder per row, then hands the self-contained tasks to an
//! [`Executor`]: an in-process loop or a pool of worker processes speaking
//! the [`worker`] protocol. Row failures are reported in the
//! [`RunReport`]; only preparation errors abort a run.

pub mod config;
pub mod coordinator;
pub mod errors;
pub mod execute;
pub mod executor;
pub mod filename;
pub mod resolver;
pub mod spreadsheet;
pub mod worker;

pub use config::{GenerationOptions, JobConfig, WorkerCommand};
pub use coordinator::{Coordinator, NoopObserver, PreparedRun, RunObserver, RunReport, RunState};
pub use errors::{GenerationError, Result};
pub use execute::execute_task;
pub use executor::{Executor, ProcessPoolExecutor, SequentialExecutor};
pub use filename::{FilenameRegistry, synthesize};
pub use resolver::ValueResolver;
pub use spreadsheet::{Sheet, read_sheet};
pub use worker::{WorkerRequest, serve};
