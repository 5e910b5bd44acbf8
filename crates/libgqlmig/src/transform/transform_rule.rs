/// One rewrite to perform on an operation's syntax tree. Rules are data,
/// not code: the transformer is a pure function of (operation, rule set).
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum TransformRule {
    /// Rename an argument of `field` from `from` to `to`.
    #[serde(rename = "argument-change")]
    ArgumentChange {
        field: String,
        from: String,
        to: String,
    },

    /// Rename fields named `from` to `to`, optionally only where the
    /// enclosing selection matches `parent_type`.
    #[serde(rename = "field-rename")]
    FieldRename {
        from: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent_type: Option<String>,
        to: String,
    },

    /// Replace the connection shape `from { node { ... } }` with
    /// `to { ... }`, hoisting the inner selection set.
    #[serde(rename = "structure-change")]
    StructureChange {
        from: String,
        to: String,
    },
}
impl TransformRule {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ArgumentChange { .. } => "argument-change",
            Self::FieldRename { .. } => "field-rename",
            Self::StructureChange { .. } => "structure-change",
        }
    }
}
