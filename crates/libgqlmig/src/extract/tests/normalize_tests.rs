use crate::ast;
use crate::extract::normalize::normalize_template;
use crate::extract::template_scanner::scan_templates;
use crate::operation::InterpolationKind;
use crate::operation::InterpolationSlot;
use std::path::Path;

fn normalize(template_text: &str) -> crate::extract::normalize::NormalizedTemplate {
    let text = format!("const q = gql`{template_text}`;");
    let templates = scan_templates(&text, Path::new("src/queries.ts"));
    assert_eq!(templates.len(), 1, "test template should scan");
    normalize_template(&templates[0])
}

#[test]
fn name_interpolation_becomes_placeholder_token() {
    let normalized = normalize("query ${queryNames.byIdV1} { venture { id } }");

    assert_eq!(
        normalized.name_template.as_deref(),
        Some("${queryNames.byIdV1}"),
    );
    assert!(normalized.normalized.contains("query __v0 {"));
    assert_eq!(normalized.interpolations.len(), 1);
    assert_eq!(normalized.interpolations[0].slot, InterpolationSlot::Name);
    assert_eq!(
        normalized.interpolations[0].kind,
        InterpolationKind::QueryName,
    );

    // The normalized text must round-trip through the GraphQL parser.
    ast::query::parse(&normalized.normalized).expect("normalized text should parse");
}

#[test]
fn selection_interpolation_keeps_its_placeholder_in_place() {
    let normalized =
        normalize("query Q { venture { id ${useWide ? 'bio' : ''} } }");

    assert_eq!(normalized.name_template, None);
    assert_eq!(normalized.interpolations.len(), 1);
    let interpolation = &normalized.interpolations[0];
    assert_eq!(interpolation.slot, InterpolationSlot::Selection);
    assert_eq!(interpolation.kind, InterpolationKind::Conditional);
    assert_eq!(interpolation.placeholder, "__v0");
    assert!(normalized.normalized.contains("id __v0 }"));

    ast::query::parse(&normalized.normalized).expect("normalized text should parse");
}

#[test]
fn document_interpolation_is_dropped_and_unnamed() {
    let normalized = normalize("query Q { venture { ...ventureFields } }\n${VENTURE_FIELDS}");

    assert_eq!(normalized.interpolations.len(), 1);
    let interpolation = &normalized.interpolations[0];
    assert_eq!(interpolation.slot, InterpolationSlot::Document);
    assert_eq!(interpolation.placeholder, "");
    assert!(!normalized.normalized.contains("VENTURE_FIELDS"));

    ast::query::parse(&normalized.normalized).expect("normalized text should parse");
}

#[test]
fn multiple_interpolations_number_in_order() {
    let normalized = normalize(
        "query ${queryNames.byIdV1} { venture { ${a ? 'x' : 'y'} ${b ? 'u' : 'w'} } }",
    );
    let placeholders: Vec<&str> = normalized
        .interpolations
        .iter()
        .map(|i| i.placeholder.as_str())
        .collect();
    assert_eq!(placeholders, vec!["__v0", "__v1", "__v2"]);
}
