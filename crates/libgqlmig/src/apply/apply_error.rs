use std::path::PathBuf;
use thiserror::Error;

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ApplyError {
    #[error(
        "interpolation placeholder `{placeholder}` is missing from the \
        transformed text of operation `{operation_id}`; refusing to drop a \
        dynamic expression"
    )]
    InterpolationLost {
        operation_id: String,
        placeholder: String,
    },

    /// Fail-closed guard: rewriting source by text search-and-replace is
    /// unsafe and never attempted.
    #[error(
        "operation `{operation_id}` carries no captured source mapping; \
        refusing to fall back to string replacement"
    )]
    MissingSourceAst {
        operation_id: String,
    },

    #[error(
        "edit for operation `{operation_id}` overlaps an already-applied \
        edit in the same file"
    )]
    OverlappingEdit {
        operation_id: String,
    },

    #[error(
        "mapped range {start}..{end} for operation `{operation_id}` is out \
        of bounds for {}",
        file.display(),
    )]
    SpanOutOfBounds {
        end: usize,
        file: PathBuf,
        operation_id: String,
        start: usize,
    },

    #[error(
        "file content has drifted under the mapping for operation \
        `{operation_id}`; re-extract before applying"
    )]
    StaleMapping {
        operation_id: String,
    },
}
