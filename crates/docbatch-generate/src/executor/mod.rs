//! Execution strategies for a prepared batch of tasks.

mod process_pool;
mod sequential;

pub use process_pool::{ProcessPoolExecutor, WorkerError};
pub use sequential::SequentialExecutor;

use docbatch_core::{GenerationResult, GenerationTask};

use crate::errors::Result;

/// Runs every task and reports each result as soon as it is known.
///
/// Implementations must deliver exactly one result per task; order is
/// unspecified.
pub trait Executor {
    fn name(&self) -> &'static str;

    fn execute_all(
        &mut self,
        tasks: Vec<GenerationTask>,
        on_result: &mut dyn FnMut(GenerationResult),
    ) -> Result<()>;
}
