//! Line-delimited JSON protocol spoken between the coordinator and a
//! `docbatch worker` process.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use docbatch_core::GenerationTask;

use crate::errors::Result;
use crate::execute::execute_task;

/// One line written to a worker's stdin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkerRequest {
    Task { task: Box<GenerationTask> },
    Shutdown,
}

impl WorkerRequest {
    pub fn task(task: GenerationTask) -> Self {
        Self::Task {
            task: Box::new(task),
        }
    }

    /// The request encoded as one protocol line, newline included.
    pub fn to_line(&self) -> Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

/// Serve requests from `input` until shutdown or end of input, answering
/// each task with one `GenerationResult` line. Returns the number of tasks
/// served.
pub fn serve<R: BufRead, W: Write>(input: R, mut output: W) -> Result<usize> {
    info!(pid = std::process::id(), "worker started");
    let mut served = 0;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<WorkerRequest>(&line)? {
            WorkerRequest::Shutdown => break,
            WorkerRequest::Task { task } => {
                debug!(row = task.row_number(), "task received");
                let result = execute_task(&task);
                serde_json::to_writer(&mut output, &result)?;
                output.write_all(b"\n")?;
                output.flush()?;
                served += 1;
            }
        }
    }
    info!(pid = std::process::id(), served, "worker stopped");
    Ok(served)
}
