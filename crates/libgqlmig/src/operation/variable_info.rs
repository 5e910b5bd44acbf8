use crate::ast;

/// Summary of one variable definition on an extracted operation.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableInfo {
    pub has_default: bool,
    pub name: String,
    pub type_text: String,
}
impl VariableInfo {
    pub(crate) fn from_ast(var_def: &ast::query::VariableDefinition) -> Self {
        Self {
            has_default: var_def.default_value.is_some(),
            name: var_def.name.clone(),
            type_text: var_def.var_type.to_string(),
        }
    }
}
