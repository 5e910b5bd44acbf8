/// One known dynamic query-name template and its migration metadata.
///
/// `template` is the exact raw substitution text an operation's name must
/// carry to match (e.g. `${queryNames.byIdV1}`).
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamePattern {
    pub deprecated: bool,
    /// Fragment rename to perform alongside the name migration, as
    /// `(from, to)` fragment names.
    pub fragment_substitution: Option<(String, String)>,
    /// Template of the replacement pattern, when one exists.
    pub migration_path: Option<String>,
    pub template: String,
    /// Semantic version of the query shape this template selects.
    pub version: u32,
}
