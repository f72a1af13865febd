//! End-of-run message printed to stdout.

use docbatch_core::RunSummary;

/// Row errors listed in full before the rest are only counted.
pub const MAX_LISTED_ERRORS: usize = 10;

pub fn render(summary: &RunSummary) -> String {
    let mut out = String::new();
    if summary.errors.is_empty() {
        out.push_str(&format!("Generated all {} documents.", summary.processed));
    } else {
        out.push_str(&format!(
            "Generated {} of {} documents; {} rows failed:",
            summary.processed,
            summary.total,
            summary.errors.len()
        ));
        for error in summary.errors.iter().take(MAX_LISTED_ERRORS) {
            out.push_str(&format!(
                "\n  row {} [{}]: {}",
                error.row,
                error.kind.as_str(),
                error.message
            ));
        }
        let hidden = summary.errors.len().saturating_sub(MAX_LISTED_ERRORS);
        if hidden > 0 {
            out.push_str(&format!("\n  ... and {hidden} more"));
        }
    }
    if summary.with_empty > 0 {
        out.push_str(&format!(
            "\n{} documents have blank required values (marked in the file name).",
            summary.with_empty
        ));
    }
    out
}
