use crate::apply::ApplyError;
use crate::operation::InterpolationSlot;
use crate::source_map::SourceMap;
use crate::source_map::SourceMapping;

/// One pending splice: the transformed GraphQL for the operation at
/// `mapping`'s byte range.
#[derive(Clone, Debug)]
pub struct FileEdit {
    pub mapping: SourceMapping,
    /// Raw replacement for the name-slot interpolation (e.g.
    /// `${queryNames.byIdV2}`) when the transformation rewrote the dynamic
    /// name pattern itself. Otherwise the original expression is
    /// re-inserted.
    pub rename_pattern: Option<String>,
    /// Canonical transformed document text, `__v<N>` placeholders intact.
    pub transformed: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SkippedEdit {
    pub error: ApplyError,
    pub operation_id: String,
}

/// Result of re-projecting edits into one file's text.
#[derive(Clone, Debug)]
pub struct AppliedFile {
    pub code: String,
    /// Line counts of the replaced regions, after and before.
    pub lines_added: usize,
    pub lines_removed: usize,
    pub skipped: Vec<SkippedEdit>,
}
impl AppliedFile {
    pub fn fully_applied(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Builds the edit for one transformed operation, consuming its source
/// mapping.
///
/// An operation with no captured mapping cannot be located in source and
/// is rejected outright; string search-and-replace is never attempted as
/// a fallback.
pub fn edit_for(
    source_map: &SourceMap,
    operation_id: &str,
    transformed: String,
    rename_pattern: Option<String>,
) -> Result<FileEdit, ApplyError> {
    let mapping = source_map.take(operation_id).ok_or_else(|| {
        ApplyError::MissingSourceAst {
            operation_id: operation_id.to_string(),
        }
    })?;
    Ok(FileEdit {
        mapping,
        rename_pattern,
        transformed,
    })
}

/// Splices transformed operation text back into `original` at the byte
/// ranges recorded by extraction.
///
/// Edits are applied in reverse source-position order (highest offset
/// first) so earlier edits never invalidate the ranges of edits not yet
/// applied. A failing edit is skipped and reported; the rest of the file's
/// edits still apply.
pub fn apply_file(original: &str, mut edits: Vec<FileEdit>) -> AppliedFile {
    edits.sort_by(|a, b| b.mapping.span.start.cmp(&a.mapping.span.start));

    let mut code = original.to_string();
    let mut lines_added = 0;
    let mut lines_removed = 0;
    let mut skipped = vec![];
    let mut lowest_applied_start = usize::MAX;

    for edit in edits {
        let span = edit.mapping.span;
        let operation_id = edit.mapping.operation_id.clone();

        if span.end > lowest_applied_start {
            skipped.push(SkippedEdit {
                error: ApplyError::OverlappingEdit {
                    operation_id: operation_id.clone(),
                },
                operation_id,
            });
            continue;
        }
        if span.end > original.len()
            || !original.is_char_boundary(span.start)
            || !original.is_char_boundary(span.end) {
            skipped.push(SkippedEdit {
                error: ApplyError::SpanOutOfBounds {
                    end: span.end,
                    file: edit.mapping.file.clone(),
                    operation_id: operation_id.clone(),
                    start: span.start,
                },
                operation_id,
            });
            continue;
        }
        if &original[span.as_range()] != edit.mapping.original.as_str() {
            skipped.push(SkippedEdit {
                error: ApplyError::StaleMapping {
                    operation_id: operation_id.clone(),
                },
                operation_id,
            });
            continue;
        }

        let replacement = match reproject(&edit) {
            Ok(replacement) => replacement,
            Err(error) => {
                skipped.push(SkippedEdit {
                    error,
                    operation_id,
                });
                continue;
            },
        };

        lines_added += replacement.lines().count();
        lines_removed += edit.mapping.original.lines().count();
        code.replace_range(span.as_range(), &replacement);
        lowest_applied_start = span.start;
    }

    AppliedFile {
        code,
        lines_added,
        lines_removed,
        skipped,
    }
}

/// Restores every dynamic expression the original template contained into
/// the transformed text: `__v<N>` placeholders become their recorded
/// `${...}` expressions (or the rewritten name pattern), and
/// document-position interpolations are re-appended at the end.
fn reproject(edit: &FileEdit) -> Result<String, ApplyError> {
    let mapping = &edit.mapping;
    let mut replacements: Vec<(&str, String)> = vec![];
    let mut tail = String::new();

    for interpolation in &mapping.interpolations {
        match interpolation.slot {
            InterpolationSlot::Document => {
                tail.push('\n');
                tail.push_str(&interpolation.raw);
            },
            InterpolationSlot::Name => {
                let raw = edit
                    .rename_pattern
                    .clone()
                    .unwrap_or_else(|| interpolation.raw.clone());
                replacements.push((interpolation.placeholder.as_str(), raw));
            },
            InterpolationSlot::Selection => {
                replacements.push((
                    interpolation.placeholder.as_str(),
                    interpolation.raw.clone(),
                ));
            },
        }
    }

    // Longest placeholders first so `__v10` never matches a `__v1` pass.
    replacements.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut result = edit.transformed.clone();
    for (placeholder, raw) in replacements {
        if !result.contains(placeholder) {
            return Err(ApplyError::InterpolationLost {
                operation_id: mapping.operation_id.clone(),
                placeholder: placeholder.to_string(),
            });
        }
        result = result.replace(placeholder, &raw);
    }

    if !tail.is_empty() {
        if !result.ends_with('\n') {
            result.push('\n');
        }
        result.push_str(tail.trim_start_matches('\n'));
        result.push('\n');
    }

    Ok(result)
}
