//! Core contracts and helpers for docbatch.
//!
//! This crate defines the placeholder, task and result types shared by the
//! inflection engine, the template substitutor, the coordinator and the CLI.

pub mod error;
pub mod pattern;
pub mod placeholder;
pub mod summary;
pub mod task;
pub mod validation;

pub use error::{Error, Result};
pub use pattern::{boundary_pattern, placeholder_literal, placeholder_pattern};
pub use placeholder::{GrammaticalCase, PlaceholderDefinition, SourceType};
pub use summary::{RowError, RunStatus, RunSummary};
pub use task::{GenerationResult, GenerationTask, RowData, TaskError, TaskErrorKind};
pub use validation::validate_definitions;

/// Date format used for every date rendered into a document (`dd.mm.yyyy`).
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Filename suffix applied to rows with blank required values.
pub const EMPTY_SUFFIX: &str = "_пусто";
