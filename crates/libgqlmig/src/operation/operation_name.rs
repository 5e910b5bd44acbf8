/// The name of an extracted operation.
///
/// Operation names in scanned source are not always static text: a common
/// pattern routes the name through a runtime lookup table, e.g.
/// ``gql`query ${queryNames.byIdV1} { ... }` ``. Such names are kept as
/// first-class patterns (the raw `${...}` template text) rather than being
/// resolved at extraction time, so a rewritten operation still dispatches
/// through the same runtime name-selection logic.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase", tag = "form", content = "value")]
pub enum OperationName {
    Anonymous,

    /// A dynamic name interpolation, stored as the raw template expression
    /// (e.g. `${queryNames.byIdV1}`).
    Pattern(String),

    Static(String),
}
impl OperationName {
    /// Human-readable rendering for reports and log lines.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Anonymous => "<anonymous>",
            Self::Pattern(template) => template.as_str(),
            Self::Static(name) => name.as_str(),
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Pattern(_))
    }
}
