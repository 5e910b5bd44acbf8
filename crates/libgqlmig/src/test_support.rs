use crate::ast;
use crate::loc;
use crate::operation::ExtractedOperation;
use crate::operation::OperationKind;
use crate::operation::OperationName;
use std::path::PathBuf;

/// Builds an operation record directly from parseable normalized text.
pub(crate) fn operation(id: &str, normalized: &str) -> ExtractedOperation {
    operation_named(id, OperationName::Anonymous, normalized)
}

pub(crate) fn operation_named(
    id: &str,
    name: OperationName,
    normalized: &str,
) -> ExtractedOperation {
    ExtractedOperation {
        directives: vec![],
        file: PathBuf::from("test.ts"),
        fragment_refs: vec![],
        id: id.to_string(),
        interpolations: vec![],
        kind: OperationKind::Query,
        name,
        normalized: normalized.to_string(),
        position: loc::FilePosition {
            col: 1,
            file: None,
            line: 1,
        },
        source: normalized.to_string(),
        variables: vec![],
    }
}

/// Canonical serialization of executable-document text; makes assertions
/// robust to formatting differences.
pub(crate) fn canon(source: &str) -> String {
    ast::query::parse(source)
        .unwrap_or_else(|err| panic!("test document failed to parse: {err}"))
        .to_string()
}
