use crate::transform::AppliedChange;
use crate::transform::TransformPattern;
use crate::transform::TransformRule;

/// The result of applying a rule set to one operation.
///
/// Both texts are canonical serializations of the parsed document, so
/// comparing them detects real structural change rather than formatting
/// drift: a rule set that matched nothing yields `original == transformed`
/// and must not be counted as a transformation.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOutcome {
    pub changes: Vec<AppliedChange>,
    pub original: String,
    pub pattern: TransformPattern,
    pub rules: Vec<TransformRule>,
    pub transformed: String,
}
impl TransformOutcome {
    pub fn changed(&self) -> bool {
        self.original != self.transformed
    }
}
