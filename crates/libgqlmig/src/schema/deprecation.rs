use crate::ast;
use crate::transform::TransformRule;
use graphql_parser::schema::Definition;
use graphql_parser::schema::TypeDefinition;
use graphql_parser::schema::Value;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;

static USE_REPLACEMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Use `([A-Za-z_][A-Za-z0-9_]*)`").unwrap()
});

/// One deprecated field, harvested from a rules document or from
/// `@deprecated` directives in the schema SDL.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeprecatedField {
    pub field_name: String,
    pub reason: Option<String>,
    pub type_name: String,
}

#[derive(Debug, Error)]
pub enum DeprecationRulesError {
    #[error("deprecation rules document is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, serde::Deserialize)]
struct RuleEntry {
    #[serde(rename = "deprecationReason")]
    deprecation_reason: Option<String>,
    name: String,
}

/// Parses a deprecation rules document: a JSON object mapping GraphQL
/// type name to a list of `{name, deprecationReason}` entries.
pub fn rules_from_json(json: &str) -> Result<Vec<DeprecatedField>, DeprecationRulesError> {
    let by_type: BTreeMap<String, Vec<RuleEntry>> = serde_json::from_str(json)?;
    let mut fields = vec![];
    for (type_name, entries) in by_type {
        for entry in entries {
            fields.push(DeprecatedField {
                field_name: entry.name,
                reason: entry.deprecation_reason,
                type_name: type_name.clone(),
            });
        }
    }
    Ok(fields)
}

/// Harvests `@deprecated(reason: "...")` directives from object and
/// interface types in the schema SDL.
pub fn harvest_sdl(sdl: &str) -> Result<Vec<DeprecatedField>, ast::schema::ParseError> {
    let doc = ast::schema::parse(sdl)?;
    let mut fields = vec![];

    for def in &doc.definitions {
        let (type_name, type_fields) = match def {
            Definition::TypeDefinition(TypeDefinition::Object(object)) => {
                (&object.name, &object.fields)
            },
            Definition::TypeDefinition(TypeDefinition::Interface(interface)) => {
                (&interface.name, &interface.fields)
            },
            _ => continue,
        };
        for field in type_fields {
            let Some(directive) = field
                .directives
                .iter()
                .find(|directive| directive.name == "deprecated")
            else {
                continue;
            };
            let reason = directive.arguments.iter().find_map(|(name, value)| {
                if name == "reason"
                    && let Value::String(reason) = value {
                    Some(reason.clone())
                } else {
                    None
                }
            });
            fields.push(DeprecatedField {
                field_name: field.name.clone(),
                reason,
                type_name: type_name.clone(),
            });
        }
    }
    Ok(fields)
}

/// Converts mechanically actionable deprecations into transformation
/// rules: a reason matching ``Use `X` `` becomes a scoped field rename.
/// Everything else needs a human and produces no rule.
pub fn to_rules(fields: &[DeprecatedField]) -> Vec<TransformRule> {
    let mut rules = vec![];
    for field in fields {
        let Some(reason) = &field.reason else {
            continue;
        };
        let Some(captures) = USE_REPLACEMENT_RE.captures(reason) else {
            continue;
        };
        rules.push(TransformRule::FieldRename {
            from: field.field_name.clone(),
            parent_type: Some(field.type_name.clone()),
            to: captures[1].to_string(),
        });
    }
    rules
}
