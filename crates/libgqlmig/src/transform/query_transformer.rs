use crate::ast;
use crate::transform::AppliedChange;
use crate::transform::TransformError;
use crate::transform::TransformOutcome;
use crate::transform::TransformPattern;
use crate::transform::TransformRule;
use graphql_parser::query::Definition;
use graphql_parser::query::OperationDefinition;
use graphql_parser::query::Selection;

/// Applies `rules` to the parsed syntax tree of `source` and re-serializes.
///
/// This is a tree rewrite, not text substitution: field renames replace
/// only the matched name node, structure changes hoist selection sets, and
/// everything unmatched is left untouched. Given the same source text and
/// rule set the output is byte-identical across runs.
pub fn transform(
    source: &str,
    rules: &[TransformRule],
) -> Result<TransformOutcome, TransformError> {
    let parsed = ast::query::parse(source)?;
    let original = parsed.to_string();

    let mut doc = parsed;
    let mut changes = vec![];
    for rule in rules {
        apply_rule(&mut doc, rule, &mut changes);
    }
    let transformed = doc.to_string();

    Ok(TransformOutcome {
        pattern: TransformPattern::classify(&changes, false),
        changes,
        original,
        rules: rules.to_vec(),
        transformed,
    })
}

/// Renames a fragment across a document: its definition and every spread
/// of it. Used when a registry migration path carries a fragment
/// substitution alongside the name-pattern rewrite.
pub fn rename_fragment(
    source: &str,
    from: &str,
    to: &str,
) -> Result<(String, Vec<AppliedChange>), TransformError> {
    let mut doc = ast::query::parse(source)?;
    let mut changes = vec![];

    for def in &mut doc.definitions {
        match def {
            Definition::Fragment(fragment) if fragment.name == from => {
                changes.push(AppliedChange {
                    field: fragment.name.clone(),
                    path: format!("fragment.{from}"),
                    replacement: to.to_string(),
                    rule: "fragment-rename".to_string(),
                });
                fragment.name = to.to_string();
            },
            Definition::Fragment(fragment) => {
                rename_spreads(&mut fragment.selection_set, from, to, &mut changes);
            },
            Definition::Operation(op) => {
                let set = match op {
                    OperationDefinition::SelectionSet(set) => set,
                    OperationDefinition::Query(query) => &mut query.selection_set,
                    OperationDefinition::Mutation(mutation) => {
                        &mut mutation.selection_set
                    },
                    OperationDefinition::Subscription(subscription) => {
                        &mut subscription.selection_set
                    },
                };
                rename_spreads(set, from, to, &mut changes);
            },
        }
    }

    Ok((doc.to_string(), changes))
}

fn rename_spreads(
    set: &mut ast::query::SelectionSet,
    from: &str,
    to: &str,
    changes: &mut Vec<AppliedChange>,
) {
    for item in &mut set.items {
        match item {
            Selection::FragmentSpread(spread) if spread.fragment_name == from => {
                changes.push(AppliedChange {
                    field: spread.fragment_name.clone(),
                    path: format!("...{from}"),
                    replacement: to.to_string(),
                    rule: "fragment-rename".to_string(),
                });
                spread.fragment_name = to.to_string();
            },
            Selection::FragmentSpread(_) => {},
            Selection::Field(field) => {
                rename_spreads(&mut field.selection_set, from, to, changes);
            },
            Selection::InlineFragment(inline) => {
                rename_spreads(&mut inline.selection_set, from, to, changes);
            },
        }
    }
}

/// Selection context used to evaluate a rule's `parent_type` scope without
/// schema type information: an exact match against an explicit type
/// condition, or a case-insensitive match against the enclosing field's
/// name (`user { ... }` is treated as selecting into `User`).
enum Scope {
    Field(String),
    Type(String),
}
impl Scope {
    fn matches(&self, parent_type: &Option<String>) -> bool {
        let Some(wanted) = parent_type else {
            return true;
        };
        match self {
            Self::Type(name) => name == wanted,
            Self::Field(name) => name.eq_ignore_ascii_case(wanted),
        }
    }
}

fn apply_rule(
    doc: &mut ast::query::Document,
    rule: &TransformRule,
    changes: &mut Vec<AppliedChange>,
) {
    for def in &mut doc.definitions {
        match def {
            Definition::Operation(op) => {
                let (root_type, set) = match op {
                    OperationDefinition::SelectionSet(set) => ("Query", set),
                    OperationDefinition::Query(query) => {
                        ("Query", &mut query.selection_set)
                    },
                    OperationDefinition::Mutation(mutation) => {
                        ("Mutation", &mut mutation.selection_set)
                    },
                    OperationDefinition::Subscription(subscription) => {
                        ("Subscription", &mut subscription.selection_set)
                    },
                };
                let mut path = vec![];
                rewrite_set(set, rule, &Scope::Type(root_type.to_string()), &mut path, changes);
            },
            Definition::Fragment(fragment) => {
                let graphql_parser::query::TypeCondition::On(cond) =
                    &fragment.type_condition;
                let scope = Scope::Type(cond.clone());
                let mut path = vec![];
                rewrite_set(&mut fragment.selection_set, rule, &scope, &mut path, changes);
            },
        }
    }
}

fn rewrite_set(
    set: &mut ast::query::SelectionSet,
    rule: &TransformRule,
    scope: &Scope,
    path: &mut Vec<String>,
    changes: &mut Vec<AppliedChange>,
) {
    for item in &mut set.items {
        match item {
            Selection::Field(field) => {
                rewrite_field(field, rule, scope, path, changes);
            },
            Selection::InlineFragment(inline) => {
                let inline_scope = match &inline.type_condition {
                    Some(graphql_parser::query::TypeCondition::On(cond)) => {
                        Scope::Type(cond.clone())
                    },
                    None => Scope::Type(String::new()),
                };
                rewrite_set(&mut inline.selection_set, rule, &inline_scope, path, changes);
            },
            Selection::FragmentSpread(_) => {},
        }
    }
}

fn rewrite_field(
    field: &mut ast::query::Field,
    rule: &TransformRule,
    scope: &Scope,
    path: &mut Vec<String>,
    changes: &mut Vec<AppliedChange>,
) {
    match rule {
        TransformRule::FieldRename { from, parent_type, to } => {
            if field.name == *from && scope.matches(parent_type) {
                changes.push(AppliedChange {
                    field: field.name.clone(),
                    path: join_path(path, &field.name),
                    replacement: to.clone(),
                    rule: rule.kind().to_string(),
                });
                field.name = to.clone();
            }
        },

        TransformRule::StructureChange { from, to } => {
            if field.name == *from
                && let Some(inner) = connection_inner(field) {
                changes.push(AppliedChange {
                    field: field.name.clone(),
                    path: join_path(path, &field.name),
                    replacement: to.clone(),
                    rule: rule.kind().to_string(),
                });
                field.name = to.clone();
                field.selection_set = inner;
            }
        },

        TransformRule::ArgumentChange { field: field_name, from, to } => {
            if field.name == *field_name {
                for (arg_name, _value) in &mut field.arguments {
                    if arg_name == from {
                        changes.push(AppliedChange {
                            field: arg_name.clone(),
                            path: join_path(path, &field.name),
                            replacement: to.clone(),
                            rule: rule.kind().to_string(),
                        });
                        *arg_name = to.clone();
                    }
                }
            }
        },
    }

    path.push(field.name.clone());
    let child_scope = Scope::Field(field.name.clone());
    rewrite_set(&mut field.selection_set, rule, &child_scope, path, changes);
    path.pop();
}

/// Matches the `edges { node { ... } }` connection shape, returning the
/// inner selection set to hoist.
fn connection_inner(field: &ast::query::Field) -> Option<ast::query::SelectionSet> {
    match field.selection_set.items.as_slice() {
        [Selection::Field(node)]
            if node.name == "node" && !node.selection_set.items.is_empty() => {
            Some(node.selection_set.clone())
        },
        _ => None,
    }
}

fn join_path(path: &[String], leaf: &str) -> String {
    if path.is_empty() {
        leaf.to_string()
    } else {
        format!("{}.{leaf}", path.join("."))
    }
}
