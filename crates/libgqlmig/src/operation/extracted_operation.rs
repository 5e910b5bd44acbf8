use crate::ast;
use crate::loc;
use crate::operation::Interpolation;
use crate::operation::OperationKind;
use crate::operation::OperationName;
use crate::operation::VariableInfo;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Immutable record of one GraphQL operation found in source.
///
/// Created by the extraction engine and never mutated afterwards: a
/// transformation produces new derived text, it does not edit this record
/// in place.
///
/// Two renditions of the operation text are kept. `source` is the raw
/// template content with `${...}` substitutions intact; `normalized` has
/// each substitution replaced by a reserved `__v<N>` placeholder token so
/// that it round-trips through the GraphQL parser.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedOperation {
    pub(crate) directives: Vec<String>,
    pub(crate) file: PathBuf,
    pub(crate) fragment_refs: Vec<String>,
    pub(crate) id: String,
    pub(crate) interpolations: Vec<Interpolation>,
    pub(crate) kind: OperationKind,
    pub(crate) name: OperationName,
    pub(crate) normalized: String,
    pub(crate) position: loc::FilePosition,
    pub(crate) source: String,
    pub(crate) variables: Vec<VariableInfo>,
}
impl ExtractedOperation {
    pub fn directives(&self) -> &[String] {
        &self.directives
    }

    /// Parses the normalized text into an owned AST. Extraction only emits
    /// records whose normalized text parses, so a failure here indicates
    /// the record was constructed by hand with invalid text.
    pub fn document(&self) -> Result<ast::query::Document, OperationParseError> {
        ast::query::parse(&self.normalized)
            .map_err(|err| OperationParseError {
                operation_id: self.id.clone(),
                err,
            })
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn fragment_refs(&self) -> &[String] {
        &self.fragment_refs
    }

    /// Unique within one extraction run.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn interpolations(&self) -> &[Interpolation] {
        &self.interpolations
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn name(&self) -> &OperationName {
        &self.name
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn position(&self) -> &loc::FilePosition {
        &self.position
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn variables(&self) -> &[VariableInfo] {
        &self.variables
    }
}

#[derive(Debug, Error)]
#[error("operation `{operation_id}` has unparseable normalized text: {err}")]
pub struct OperationParseError {
    pub operation_id: String,
    #[source]
    pub err: ast::query::ParseError,
}
