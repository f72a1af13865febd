//! The task boundary: one row in, one result out, nothing propagates.

use std::any::Any;

use docbatch_core::{GenerationResult, GenerationTask, TaskError, TaskErrorKind};
use docbatch_docx::Template;
use tracing::{debug, warn};

/// Render one task to its output file.
///
/// Every failure, including a panic inside the substitutor, becomes a
/// failed [`GenerationResult`] for the task's row.
pub fn execute_task(task: &GenerationTask) -> GenerationResult {
    let mut logs = Vec::new();
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        render(task, &mut logs)
    }));

    let result = match outcome {
        Ok(Ok(())) => {
            GenerationResult::succeeded(task.row_index, task.filename.clone(), task.is_incomplete())
        }
        Ok(Err(error)) => GenerationResult::failed(task.row_index, error),
        Err(panic) => GenerationResult::failed(
            task.row_index,
            TaskError::new(TaskErrorKind::Panic, panic_message(panic)),
        ),
    };

    match &result.error {
        None => debug!(row = task.row_number(), filename = %task.filename, "document written"),
        Some(error) => warn!(
            row = task.row_number(),
            kind = error.kind.as_str(),
            error = %error.message,
            "row failed"
        ),
    }
    result.with_logs(logs)
}

fn render(task: &GenerationTask, logs: &mut Vec<String>) -> Result<(), TaskError> {
    let template = Template::open(&task.template_path).map_err(|err| {
        TaskError::new(
            TaskErrorKind::TemplateLoad,
            format!("cannot load template {}: {err}", task.template_path.display()),
        )
    })?;
    logs.push(format!("template loaded: {}", task.template_path.display()));

    let replacements = task.replacements();
    let document = template
        .substitute(&replacements)
        .map_err(|err| TaskError::new(TaskErrorKind::Substitution, err.to_string()))?;
    logs.push(format!(
        "{} placeholder occurrences replaced ({} keys)",
        document.replaced(),
        replacements.len()
    ));

    let path = task.output_path();
    document.save(&path).map_err(|err| {
        TaskError::new(
            TaskErrorKind::Write,
            format!("cannot write {}: {err}", path.display()),
        )
    })?;
    logs.push(format!("written: {}", task.filename));
    Ok(())
}

pub(crate) fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic during task execution".to_string()
    }
}
