use crate::ast;
use crate::extract::ExtractionError;
use crate::extract::FragmentTable;
use crate::operation::ExtractedOperation;
use crate::operation::Interpolation;
use crate::operation::InterpolationKind;
use crate::operation::InterpolationSlot;
use crate::operation::QueryVariant;
use crate::operation::SwitchAssignment;
use crate::operation::SwitchValue;
use crate::operation::find_ternary_split;
use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;

static SIMPLE_REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(?:\.[A-Za-z_$][A-Za-z0-9_$]*)*$").unwrap()
});

/// One conditional substitution bound to a switch: which placeholder it
/// owns and the GraphQL text each branch resolves to.
#[derive(Clone, Debug)]
struct SwitchBinding {
    false_arm: String,
    placeholder: String,
    true_arm: String,
}

/// A locally-resolvable switch detected in one operation. Multiple
/// conditionals over the same condition text collapse into one switch
/// with several bindings.
#[derive(Clone, Debug)]
pub(crate) struct DetectedSwitch {
    bindings: Vec<SwitchBinding>,
    pub name: String,
}

/// Finds the variant switches of one operation. Conditionals whose
/// condition is not a simple local reference, or whose arms cannot be
/// resolved to GraphQL text, are left as unresolved interpolations and do
/// not produce switches.
pub(crate) fn detect_switches(
    operation: &ExtractedOperation,
    table: &FragmentTable,
) -> Vec<DetectedSwitch> {
    let mut switches: IndexMap<String, DetectedSwitch> = IndexMap::new();

    for interpolation in operation.interpolations() {
        let Some(binding) = resolve_binding(interpolation, table) else {
            continue;
        };
        let (name, binding) = binding;
        switches
            .entry(name.clone())
            .or_insert_with(|| DetectedSwitch {
                bindings: vec![],
                name,
            })
            .bindings
            .push(binding);
    }

    switches.into_values().collect()
}

fn resolve_binding(
    interpolation: &Interpolation,
    table: &FragmentTable,
) -> Option<(String, SwitchBinding)> {
    if interpolation.kind != InterpolationKind::Conditional
        || interpolation.slot != InterpolationSlot::Selection {
        return None;
    }

    let expression = interpolation.expression.trim();
    let (question, colon) = find_ternary_split(expression)?;
    let condition = expression[..question].trim();
    let true_text = expression[question + 1..colon].trim();
    let false_text = expression[colon + 1..].trim();

    let negations = condition.bytes().take_while(|b| *b == b'!').count();
    let condition = condition[negations..].trim();
    if !SIMPLE_REFERENCE_RE.is_match(condition) {
        return None;
    }

    let mut true_arm = resolve_arm(true_text, table)?;
    let mut false_arm = resolve_arm(false_text, table)?;
    if negations % 2 == 1 {
        std::mem::swap(&mut true_arm, &mut false_arm);
    }

    Some((
        condition.to_string(),
        SwitchBinding {
            false_arm,
            placeholder: interpolation.placeholder.clone(),
            true_arm,
        },
    ))
}

/// Resolves one ternary arm to GraphQL text: a quoted string literal
/// yields its content, and an identifier naming a known fragment yields a
/// spread of that fragment. Anything else is not locally resolvable.
fn resolve_arm(arm: &str, table: &FragmentTable) -> Option<String> {
    let bytes = arm.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'\'' || first == b'"' || first == b'`') && last == first {
            let inner = &arm[1..arm.len() - 1];
            if !inner.contains("${") {
                return Some(inner.to_string());
            }
            return None;
        }
    }
    if SIMPLE_REFERENCE_RE.is_match(arm) && !arm.contains('.') && table.contains(arm) {
        return Some(format!("...{arm}"));
    }
    None
}

/// Enumerates the Cartesian product of an operation's switches, one
/// variant per combination, dropping combinations whose substituted text
/// no longer parses and deduplicating identical resolved texts.
pub(crate) fn expand_variants(
    operation: &ExtractedOperation,
    switches: &[DetectedSwitch],
    errors: &mut Vec<ExtractionError>,
) -> Vec<QueryVariant> {
    if switches.is_empty() {
        return vec![];
    }

    let combination_count = 1usize << switches.len();
    let mut deduped: IndexMap<String, QueryVariant> = IndexMap::new();

    for combination in 0..combination_count {
        let mut replacements: Vec<(String, String)> = vec![];
        let mut conditions = vec![];
        for (index, switch) in switches.iter().enumerate() {
            let value = combination & (1 << index) == 0;
            conditions.push(SwitchAssignment {
                switch: switch.name.clone(),
                value: SwitchValue::Bool(value),
            });
            for binding in &switch.bindings {
                let arm = if value {
                    binding.true_arm.clone()
                } else {
                    binding.false_arm.clone()
                };
                replacements.push((binding.placeholder.clone(), arm));
            }
        }

        let source = substitute_placeholders(operation.normalized(), replacements);
        if let Err(err) = ast::query::parse(&source) {
            errors.push(ExtractionError::new(
                operation.file(),
                format!(
                    "variant of `{}` failed to parse after substitution: {err}",
                    operation.id(),
                ),
            ));
            continue;
        }

        deduped.entry(source.clone()).or_insert_with(|| QueryVariant {
            conditions,
            id: String::new(),
            original_query_id: operation.id().to_string(),
            source,
        });
    }

    deduped
        .into_values()
        .enumerate()
        .map(|(index, mut variant)| {
            variant.id = format!("{}#v{index}", operation.id());
            variant
        })
        .collect()
}

/// Longer placeholders are replaced first so `__v10` is never clobbered
/// by a `__v1` replacement.
fn substitute_placeholders(
    text: &str,
    mut replacements: Vec<(String, String)>,
) -> String {
    replacements.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    let mut result = text.to_string();
    for (placeholder, replacement) in replacements {
        result = result.replace(&placeholder, &replacement);
    }
    result
}
