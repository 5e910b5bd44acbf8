use crate::ast;
use graphql_parser::query::Definition;
use graphql_parser::query::OperationDefinition;
use graphql_parser::query::Selection;
use sha2::Digest;
use sha2::Sha256;

/// Structural hash of an operation's content, invariant under the
/// operation's (possibly dynamic) name.
///
/// Computed over a canonical serialization of the parsed document with the
/// operation name erased and every `__v<N>` interpolation placeholder
/// normalized to a fixed token, so two operations that differ only in
/// their dynamic name interpolation hash identically.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Fingerprint(String);
impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn fingerprint_document(doc: &ast::query::Document) -> Fingerprint {
    let mut canonical = String::new();
    for def in &doc.definitions {
        match def {
            Definition::Operation(op) => write_operation(&mut canonical, op),
            Definition::Fragment(frag) => {
                canonical.push_str("fragment:");
                canonical.push_str(&normalize_token(&frag.name));
                canonical.push_str(":on:");
                let graphql_parser::query::TypeCondition::On(cond) =
                    &frag.type_condition;
                canonical.push_str(cond);
                write_selection_set(&mut canonical, &frag.selection_set);
            },
        }
    }

    let digest = Sha256::digest(canonical.as_bytes());
    Fingerprint(hex::encode(digest))
}

fn write_operation(out: &mut String, op: &ast::query::OperationDefinition) {
    match op {
        OperationDefinition::SelectionSet(set) => {
            out.push_str("query");
            write_selection_set(out, set);
        },
        OperationDefinition::Query(query) => {
            out.push_str("query");
            write_variables(out, &query.variable_definitions);
            write_selection_set(out, &query.selection_set);
        },
        OperationDefinition::Mutation(mutation) => {
            out.push_str("mutation");
            write_variables(out, &mutation.variable_definitions);
            write_selection_set(out, &mutation.selection_set);
        },
        OperationDefinition::Subscription(subscription) => {
            out.push_str("subscription");
            write_variables(out, &subscription.variable_definitions);
            write_selection_set(out, &subscription.selection_set);
        },
    }
}

fn write_variables(out: &mut String, var_defs: &[ast::query::VariableDefinition]) {
    if var_defs.is_empty() {
        return;
    }
    out.push('(');
    for var_def in var_defs {
        out.push('$');
        out.push_str(&var_def.name);
        out.push(':');
        out.push_str(&var_def.var_type.to_string());
        out.push(',');
    }
    out.push(')');
}

fn write_selection_set(out: &mut String, set: &ast::query::SelectionSet) {
    out.push('{');
    for selection in &set.items {
        match selection {
            Selection::Field(field) => {
                out.push_str(&normalize_token(&field.name));
                if !field.arguments.is_empty() {
                    out.push('(');
                    for (name, value) in &field.arguments {
                        out.push_str(name);
                        out.push(':');
                        out.push_str(&value.to_string());
                        out.push(',');
                    }
                    out.push(')');
                }
                if !field.selection_set.items.is_empty() {
                    write_selection_set(out, &field.selection_set);
                }
                out.push(';');
            },
            Selection::FragmentSpread(spread) => {
                out.push_str("...");
                out.push_str(&normalize_token(&spread.fragment_name));
                out.push(';');
            },
            Selection::InlineFragment(inline) => {
                out.push_str("...on:");
                if let Some(graphql_parser::query::TypeCondition::On(cond)) =
                    &inline.type_condition
                {
                    out.push_str(cond);
                }
                write_selection_set(out, &inline.selection_set);
                out.push(';');
            },
        }
    }
    out.push('}');
}

/// Interpolation placeholders (`__v0`, `__v1`, ...) all normalize to one
/// token so that fingerprints do not depend on substitution ordering.
fn normalize_token(name: &str) -> String {
    let rest = name.strip_prefix("__v");
    match rest {
        Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) =>
            "__interp".to_string(),
        _ => name.to_string(),
    }
}
