/// Machine-readable record of one rule application site.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedChange {
    /// The field (or argument) text that was replaced.
    pub field: String,
    /// Dot-path of selection names from the operation root to the changed
    /// node.
    pub path: String,
    pub replacement: String,
    /// Kind tag of the rule that produced this change.
    pub rule: String,
}
