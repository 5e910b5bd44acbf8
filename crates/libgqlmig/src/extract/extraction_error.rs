use std::path::PathBuf;
use thiserror::Error;

/// Non-fatal, per-file extraction failure. Recorded in
/// [`ExtractionResult::errors`](crate::extract::ExtractionResult) while the
/// run continues.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionError {
    pub column: Option<usize>,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub message: String,
}
impl ExtractionError {
    pub(crate) fn new<P: Into<PathBuf>, M: Into<String>>(file: P, message: M) -> Self {
        Self {
            column: None,
            file: file.into(),
            line: None,
            message: message.into(),
        }
    }

    pub(crate) fn at<P: Into<PathBuf>, M: Into<String>>(
        file: P,
        message: M,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            column: Some(column),
            file: file.into(),
            line: Some(line),
            message: message.into(),
        }
    }
}
impl std::fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(col)) => write!(
                f,
                "{}:{line}:{col}: {}",
                self.file.display(),
                self.message,
            ),
            _ => write!(f, "{}: {}", self.file.display(), self.message),
        }
    }
}

/// Catastrophic failure that aborts the whole extraction run. Per-file
/// problems never surface here.
#[derive(Debug, Error)]
pub enum ExtractionRunError {
    #[error("invalid glob pattern `{pattern}`: {message}")]
    InvalidGlob {
        message: String,
        pattern: String,
    },

    #[error("extraction root {} does not exist or is not a directory", .0.display())]
    MissingRoot(PathBuf),

    #[error("failed to build extraction worker pool: {0}")]
    WorkerPool(String),
}
