use crate::loc;
use std::path::PathBuf;

/// One `fragment X on T { ... }` definition found in source, either inside
/// an embedded template or in a standalone `.graphql` file.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFragment {
    pub file: PathBuf,
    pub name: String,
    pub position: loc::FilePosition,
    /// Parseable fragment text (placeholder-normalized when the fragment
    /// came from a template with substitutions).
    pub source: String,
    pub type_condition: String,
}
