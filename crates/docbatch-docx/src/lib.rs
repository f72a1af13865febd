//! Formatting-preserving placeholder substitution for `.docx` templates.
//!
//! A template is read into memory once. Substitution rewrites the text runs
//! of the main document, headers and footers; styles, numbering, media and
//! every other part of the package are written back as they were read.

pub mod archive;
pub mod error;
pub mod replace;
mod runs;
pub mod template;
mod xml;

pub use archive::Package;
pub use error::{DocxError, Result};
pub use replace::Replacements;
pub use template::{Document, Template, substitute};
