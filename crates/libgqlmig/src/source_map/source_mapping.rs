use crate::byte_span::ByteSpan;
use crate::operation::Interpolation;
use std::path::PathBuf;

/// Association between an extracted operation and the exact region of host
/// source it came from.
///
/// `span` covers the template content between the backticks, half-open
/// over the owning file's bytes. `original` is the content of that region
/// at extraction time; the applicator refuses to splice when the file has
/// drifted underneath the mapping.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMapping {
    pub file: PathBuf,
    pub interpolations: Vec<Interpolation>,
    pub operation_id: String,
    pub original: String,
    pub span: ByteSpan,
}
