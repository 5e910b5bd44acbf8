use crate::ast;
use graphql_parser::query::Definition;
use graphql_parser::query::OperationDefinition;
use graphql_parser::query::Selection;

/// Structural size measurements of one operation document, the inputs to
/// the complexity factor.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryMetrics {
    /// Deepest selection-set nesting; a root selection set counts as 1.
    pub depth: usize,
    pub field_count: usize,
    /// Number of fragment spread sites (not distinct fragment names).
    pub fragment_count: usize,
    pub variable_count: usize,
}
impl QueryMetrics {
    pub fn from_document(doc: &ast::query::Document) -> Self {
        let mut metrics = Self::default();
        for def in &doc.definitions {
            match def {
                Definition::Operation(op) => {
                    let (var_count, set) = match op {
                        OperationDefinition::SelectionSet(set) => (0, set),
                        OperationDefinition::Query(query) => {
                            (query.variable_definitions.len(), &query.selection_set)
                        },
                        OperationDefinition::Mutation(mutation) => {
                            (mutation.variable_definitions.len(), &mutation.selection_set)
                        },
                        OperationDefinition::Subscription(subscription) => {
                            (
                                subscription.variable_definitions.len(),
                                &subscription.selection_set,
                            )
                        },
                    };
                    metrics.variable_count += var_count;
                    let depth = measure_set(set, 1, &mut metrics);
                    metrics.depth = metrics.depth.max(depth);
                },
                Definition::Fragment(fragment) => {
                    let depth = measure_set(&fragment.selection_set, 1, &mut metrics);
                    metrics.depth = metrics.depth.max(depth);
                },
            }
        }
        metrics
    }
}

fn measure_set(
    set: &ast::query::SelectionSet,
    level: usize,
    metrics: &mut QueryMetrics,
) -> usize {
    let mut deepest = level;
    for item in &set.items {
        match item {
            Selection::Field(field) => {
                metrics.field_count += 1;
                if !field.selection_set.items.is_empty() {
                    let depth = measure_set(&field.selection_set, level + 1, metrics);
                    deepest = deepest.max(depth);
                }
            },
            Selection::FragmentSpread(_) => metrics.fragment_count += 1,
            Selection::InlineFragment(inline) => {
                let depth = measure_set(&inline.selection_set, level + 1, metrics);
                deepest = deepest.max(depth);
            },
        }
    }
    deepest
}
