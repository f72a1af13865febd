use thiserror::Error;

/// Errors raised while reading, rewriting or writing a `.docx` package.
#[derive(Debug, Error)]
pub enum DocxError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("malformed xml in {part}: {message}")]
    Malformed { part: String, message: String },
    #[error("missing package part: {0}")]
    MissingPart(String),
    #[error("placeholder pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, DocxError>;

impl DocxError {
    pub(crate) fn malformed(part: &str, message: impl Into<String>) -> Self {
        DocxError::Malformed {
            part: part.to_string(),
            message: message.into(),
        }
    }
}
