use std::collections::{BTreeSet, VecDeque};
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use docbatch_core::{GenerationResult, GenerationTask, TaskError, TaskErrorKind};

use crate::config::WorkerCommand;
use crate::errors::{GenerationError, Result};
use crate::worker::WorkerRequest;

use super::Executor;

const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Failure talking to one worker process.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("worker io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("worker sent invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("worker closed its output")]
    Closed,
    #[error("worker protocol error: {0}")]
    Protocol(String),
}

/// Fixed-size pool of `docbatch worker` processes.
///
/// Each slot keeps one worker alive across tasks. A worker that times out,
/// crashes or breaks the protocol is killed, the task is recorded as a row
/// error and the slot starts a fresh worker for its next task.
#[derive(Debug, Clone)]
pub struct ProcessPoolExecutor {
    workers: usize,
    task_timeout: Duration,
    command: WorkerCommand,
}

impl ProcessPoolExecutor {
    pub fn new(workers: usize, task_timeout: Duration, command: WorkerCommand) -> Self {
        Self {
            workers: workers.max(1),
            task_timeout,
            command,
        }
    }

    async fn run(
        &self,
        tasks: Vec<GenerationTask>,
        on_result: &mut dyn FnMut(GenerationResult),
    ) -> Result<()> {
        let mut pending: BTreeSet<usize> = tasks.iter().map(|task| task.row_index).collect();
        let slots = self.workers.min(tasks.len());
        let queue = Arc::new(Mutex::new(VecDeque::from(tasks)));
        let (sender, mut receiver) = mpsc::unbounded_channel();

        info!(workers = slots, tasks = pending.len(), "process pool started");
        let mut set = JoinSet::new();
        for id in 0..slots {
            let slot = Slot {
                id,
                queue: Arc::clone(&queue),
                results: sender.clone(),
                command: self.command.clone(),
                task_timeout: self.task_timeout,
            };
            set.spawn(slot.run());
        }
        drop(sender);

        while let Some(result) = receiver.recv().await {
            pending.remove(&result.index);
            on_result(result);
        }
        while let Some(joined) = set.join_next().await {
            if let Err(err) = joined {
                warn!(error = %err, "pool slot aborted");
            }
        }

        for index in pending {
            on_result(GenerationResult::failed(
                index,
                TaskError::new(TaskErrorKind::WorkerCrashed, "no result received from worker"),
            ));
        }
        info!("process pool stopped");
        Ok(())
    }
}

impl Executor for ProcessPoolExecutor {
    fn name(&self) -> &'static str {
        "processes"
    }

    fn execute_all(
        &mut self,
        tasks: Vec<GenerationTask>,
        on_result: &mut dyn FnMut(GenerationResult),
    ) -> Result<()> {
        if tasks.is_empty() {
            return Ok(());
        }
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| GenerationError::WorkerPool(format!("cannot start runtime: {err}")))?;
        runtime.block_on(self.run(tasks, on_result))
    }
}

struct Slot {
    id: usize,
    queue: Arc<Mutex<VecDeque<GenerationTask>>>,
    results: mpsc::UnboundedSender<GenerationResult>,
    command: WorkerCommand,
    task_timeout: Duration,
}

impl Slot {
    async fn run(self) {
        let mut worker: Option<WorkerProcess> = None;
        while let Some(task) = self.next_task() {
            let result = self.dispatch(&mut worker, &task).await;
            if self.results.send(result).is_err() {
                break;
            }
        }
        if let Some(worker) = worker {
            worker.shutdown().await;
        }
    }

    fn next_task(&self) -> Option<GenerationTask> {
        match self.queue.lock() {
            Ok(mut queue) => queue.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        }
    }

    async fn dispatch(
        &self,
        worker: &mut Option<WorkerProcess>,
        task: &GenerationTask,
    ) -> GenerationResult {
        let row = task.row_number();
        if worker.is_none() {
            match WorkerProcess::spawn(&self.command) {
                Ok(process) => {
                    info!(slot = self.id, pid = ?process.child.id(), "worker spawned");
                    *worker = Some(process);
                }
                Err(err) => {
                    warn!(slot = self.id, row, error = %err, "cannot start worker");
                    return crashed(task, format!("cannot start worker: {err}"));
                }
            }
        }
        let Some(process) = worker.as_mut() else {
            return crashed(task, "worker unavailable".to_string());
        };

        let outcome = tokio::time::timeout(self.task_timeout, process.execute(task)).await;
        let failure = match outcome {
            Ok(Ok(result)) => return result,
            Ok(Err(err)) => {
                warn!(slot = self.id, row, error = %err, "worker failed, restarting");
                crashed(task, err.to_string())
            }
            Err(_) => {
                warn!(
                    slot = self.id,
                    row,
                    timeout_ms = self.task_timeout.as_millis() as u64,
                    "task timed out, restarting worker"
                );
                GenerationResult::failed(
                    task.row_index,
                    TaskError::new(
                        TaskErrorKind::Timeout,
                        format!("task exceeded the {:?} timeout", self.task_timeout),
                    ),
                )
            }
        };
        if let Some(process) = worker.take() {
            process.kill().await;
        }
        failure
    }
}

fn crashed(task: &GenerationTask, message: String) -> GenerationResult {
    GenerationResult::failed(
        task.row_index,
        TaskError::new(TaskErrorKind::WorkerCrashed, message),
    )
}

struct WorkerProcess {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    line: String,
}

impl WorkerProcess {
    fn spawn(command: &WorkerCommand) -> std::result::Result<Self, WorkerError> {
        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()?;
        let stdin = child.stdin.take().ok_or(WorkerError::Closed)?;
        let stdout = child.stdout.take().ok_or(WorkerError::Closed)?;
        Ok(Self {
            child,
            stdin,
            stdout: BufReader::new(stdout),
            line: String::new(),
        })
    }

    async fn execute(
        &mut self,
        task: &GenerationTask,
    ) -> std::result::Result<GenerationResult, WorkerError> {
        let mut request = serde_json::to_string(&WorkerRequest::task(task.clone()))?;
        request.push('\n');
        self.stdin.write_all(request.as_bytes()).await?;
        self.stdin.flush().await?;

        self.line.clear();
        if self.stdout.read_line(&mut self.line).await? == 0 {
            return Err(WorkerError::Closed);
        }
        let result: GenerationResult = serde_json::from_str(self.line.trim())?;
        if result.index != task.row_index {
            return Err(WorkerError::Protocol(format!(
                "expected result for row index {}, got {}",
                task.row_index, result.index
            )));
        }
        Ok(result)
    }

    async fn shutdown(mut self) {
        if let Ok(line) = serde_json::to_string(&WorkerRequest::Shutdown) {
            let _ = self.stdin.write_all(format!("{line}\n").as_bytes()).await;
            let _ = self.stdin.flush().await;
        }
        drop(self.stdin);
        match tokio::time::timeout(SHUTDOWN_GRACE, self.child.wait()).await {
            Ok(Ok(status)) => debug!(%status, "worker exited"),
            Ok(Err(err)) => warn!(error = %err, "worker wait failed"),
            Err(_) => {
                warn!("worker ignored shutdown, killing");
                let _ = self.child.kill().await;
            }
        }
    }

    async fn kill(mut self) {
        if let Err(err) = self.child.kill().await {
            debug!(error = %err, "worker kill failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn task(row_index: usize) -> GenerationTask {
        GenerationTask {
            row_index,
            row_data: Default::default(),
            template_path: "template.docx".into(),
            output_folder: std::env::temp_dir(),
            filename_pattern: "{i}".to_string(),
            required_columns: Vec::new(),
            placeholder_definitions: Vec::new(),
            filename_column: None,
            resolved_values: BTreeMap::new(),
            filename: format!("{}.docx", row_index + 1),
        }
    }

    fn run(command: WorkerCommand, tasks: Vec<GenerationTask>) -> Vec<GenerationResult> {
        let mut executor = ProcessPoolExecutor::new(2, Duration::from_secs(5), command);
        let mut results = Vec::new();
        executor
            .execute_all(tasks, &mut |result: GenerationResult| results.push(result))
            .expect("execute");
        results.sort_by_key(|result| result.index);
        results
    }

    #[test]
    fn unstartable_worker_fails_every_row() {
        let command = WorkerCommand::new("/nonexistent/docbatch-worker");
        let results = run(command, (0..3).map(task).collect());

        assert_eq!(results.len(), 3);
        for result in &results {
            assert!(!result.success);
            assert_eq!(
                result.error.as_ref().map(|err| err.kind),
                Some(TaskErrorKind::WorkerCrashed)
            );
        }
    }

    #[cfg(unix)]
    #[test]
    fn worker_exiting_early_is_a_crash() {
        let command = WorkerCommand::new("/bin/sh").arg("-c").arg("exit 0");
        let results = run(command, (0..2).map(task).collect());

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|result| {
            result.error.as_ref().map(|err| err.kind) == Some(TaskErrorKind::WorkerCrashed)
        }));
    }

    #[cfg(unix)]
    #[test]
    fn silent_worker_times_out() {
        let command = WorkerCommand::new("/bin/sh").arg("-c").arg("sleep 30");
        let mut executor = ProcessPoolExecutor::new(1, Duration::from_millis(200), command);
        let mut results = Vec::new();
        executor
            .execute_all(vec![task(0)], &mut |result: GenerationResult| results.push(result))
            .expect("execute");

        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].error.as_ref().map(|err| err.kind),
            Some(TaskErrorKind::Timeout)
        );
        let message = results[0].error.as_ref().map(|err| err.message.as_str());
        assert_eq!(message, Some("task exceeded the 200ms timeout"));
    }

    #[test]
    fn empty_batch_spawns_nothing() {
        let command = WorkerCommand::new("/nonexistent/docbatch-worker");
        assert!(run(command, Vec::new()).is_empty());
    }
}
