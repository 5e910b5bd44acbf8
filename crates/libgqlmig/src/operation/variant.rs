/// A source-level expression that drives conditional content in one or
/// more operations. Switches sharing the same condition text across
/// different operations are unified under one switch identity.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantSwitch {
    pub kind: SwitchKind,
    /// The condition's source text (e.g. `useWideFields`).
    pub name: String,
    /// IDs of operations whose content branches on this switch.
    pub operations: Vec<String>,
}
impl VariantSwitch {
    /// The values this switch ranges over. Variant enumeration takes the
    /// Cartesian product of these across an operation's distinct switches.
    pub fn values(&self) -> Vec<SwitchValue> {
        match &self.kind {
            SwitchKind::Boolean => vec![
                SwitchValue::Bool(true),
                SwitchValue::Bool(false),
            ],
            SwitchKind::Enum(choices) => choices
                .iter()
                .map(|choice| SwitchValue::Choice(choice.clone()))
                .collect(),
        }
    }

    pub fn arity(&self) -> usize {
        match &self.kind {
            SwitchKind::Boolean => 2,
            SwitchKind::Enum(choices) => choices.len(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "values")]
pub enum SwitchKind {
    Boolean,
    Enum(Vec<String>),
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase", untagged)]
pub enum SwitchValue {
    Bool(bool),
    Choice(String),
}
impl std::fmt::Display for SwitchValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Choice(choice) => f.write_str(choice),
        }
    }
}

/// One switch pinned to one of its values, as part of a variant's
/// condition mapping.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchAssignment {
    pub switch: String,
    pub value: SwitchValue,
}

/// A fully resolved instantiation of an operation whose content contains
/// compile-time-unknown branches. Every conditional substitution has been
/// replaced by the arm selected by `conditions`, so `source` is plain
/// parseable GraphQL.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryVariant {
    pub conditions: Vec<SwitchAssignment>,
    pub id: String,
    pub original_query_id: String,
    pub source: String,
}
