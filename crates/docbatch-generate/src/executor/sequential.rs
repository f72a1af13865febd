use docbatch_core::{GenerationResult, GenerationTask};

use crate::errors::Result;
use crate::execute::execute_task;

use super::Executor;

/// In-process loop, one task after another.
#[derive(Debug, Default)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn execute_all(
        &mut self,
        tasks: Vec<GenerationTask>,
        on_result: &mut dyn FnMut(GenerationResult),
    ) -> Result<()> {
        for task in tasks {
            on_result(execute_task(&task));
        }
        Ok(())
    }
}
