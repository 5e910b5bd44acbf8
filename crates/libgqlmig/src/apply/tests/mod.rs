use crate::apply::ApplyError;
use crate::apply::FileEdit;
use crate::apply::apply_file;
use crate::byte_span::ByteSpan;
use crate::operation::Interpolation;
use crate::operation::InterpolationKind;
use crate::operation::InterpolationSlot;
use crate::source_map::SourceMapping;
use crate::test_support::canon;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn mapping_for(file_text: &str, operation_id: &str) -> SourceMapping {
    let start = file_text.find('`').expect("test text needs a template") + 1;
    let end = file_text.rfind('`').expect("test text needs a template");
    SourceMapping {
        file: PathBuf::from("src/queries.ts"),
        interpolations: vec![],
        operation_id: operation_id.to_string(),
        original: file_text[start..end].to_string(),
        span: ByteSpan::new(start, end),
    }
}

fn edit(mapping: SourceMapping, transformed: &str) -> FileEdit {
    FileEdit {
        mapping,
        rename_pattern: None,
        transformed: transformed.to_string(),
    }
}

#[test]
fn replaces_only_the_mapped_range() {
    let text = "const A = 1;\nconst Q = gql`query Q { user { name } }`;\nconst B = 2;\n";
    let mapping = mapping_for(text, "op");
    let transformed = canon("query Q { user { fullName } }");

    let applied = apply_file(text, vec![edit(mapping, &transformed)]);
    assert!(applied.fully_applied());
    assert!(applied.code.starts_with("const A = 1;\nconst Q = gql`"));
    assert!(applied.code.ends_with("`;\nconst B = 2;\n"));
    assert!(applied.code.contains("fullName"));
}

#[test]
fn no_op_edit_keeps_surroundings_byte_identical() {
    let text = "before gql`query Q { a }` after";
    let mapping = mapping_for(text, "op");
    let span = mapping.span;
    let transformed = canon("query Q { a }");

    let applied = apply_file(text, vec![edit(mapping, &transformed)]);
    // Everything outside the mapped range is untouched.
    assert_eq!(&applied.code[..span.start], &text[..span.start]);
    let tail_len = text.len() - span.end;
    assert_eq!(
        &applied.code[applied.code.len() - tail_len..],
        &text[span.end..],
    );
}

#[test]
fn multiple_edits_apply_back_to_front() {
    let text = "const A = gql`query A { oldA }`;\nconst B = gql`query B { oldB }`;\n";
    let a_start = text.find("query A").unwrap();
    let a_end = text[a_start..].find('`').unwrap() + a_start;
    let b_start = text.find("query B").unwrap();
    let b_end = text[b_start..].find('`').unwrap() + b_start;

    let make = |id: &str, start: usize, end: usize, new_text: &str| FileEdit {
        mapping: SourceMapping {
            file: PathBuf::from("src/queries.ts"),
            interpolations: vec![],
            operation_id: id.to_string(),
            original: text[start..end].to_string(),
            span: ByteSpan::new(start, end),
        },
        rename_pattern: None,
        transformed: new_text.to_string(),
    };

    // Deliberately passed in ascending order; the applicator must sort
    // descending so offsets stay valid.
    let applied = apply_file(
        text,
        vec![
            make("a", a_start, a_end, &canon("query A { newA }")),
            make("b", b_start, b_end, &canon("query B { newB }")),
        ],
    );

    assert!(applied.fully_applied());
    assert!(applied.code.contains("newA"));
    assert!(applied.code.contains("newB"));
    assert!(!applied.code.contains("oldA"));
    assert!(!applied.code.contains("oldB"));
}

#[test]
fn overlapping_edits_are_skipped() {
    let text = "const Q = gql`query Q { a b }`;";
    let mapping_one = mapping_for(text, "one");
    let mapping_two = mapping_for(text, "two");

    let applied = apply_file(
        text,
        vec![
            edit(mapping_one, &canon("query Q { a }")),
            edit(mapping_two, &canon("query Q { b }")),
        ],
    );

    assert_eq!(applied.skipped.len(), 1);
    assert!(matches!(
        applied.skipped[0].error,
        ApplyError::OverlappingEdit { .. },
    ));
}

#[test]
fn drifted_file_content_fails_the_edit() {
    let text = "const Q = gql`query Q { a }`;";
    let mut mapping = mapping_for(text, "op");
    mapping.original = "query Q { something_else }".to_string();

    let applied = apply_file(text, vec![edit(mapping, &canon("query Q { b }"))]);
    assert_eq!(applied.code, text);
    assert!(matches!(
        applied.skipped[0].error,
        ApplyError::StaleMapping { .. },
    ));
}

#[test]
fn out_of_bounds_span_fails_the_edit() {
    let text = "short";
    let mapping = SourceMapping {
        file: PathBuf::from("src/queries.ts"),
        interpolations: vec![],
        operation_id: "op".to_string(),
        original: "whatever".to_string(),
        span: ByteSpan::new(2, 400),
    };

    let applied = apply_file(text, vec![edit(mapping, "query Q { a }")]);
    assert!(matches!(
        applied.skipped[0].error,
        ApplyError::SpanOutOfBounds { .. },
    ));
}

#[test]
fn dynamic_name_interpolation_is_reinserted() {
    let text = "const Q = gql`query ${queryNames.byIdV1} { venture { id } }`;";
    let mut mapping = mapping_for(text, "op");
    mapping.interpolations = vec![Interpolation {
        expression: "queryNames.byIdV1".to_string(),
        kind: InterpolationKind::QueryName,
        placeholder: "__v0".to_string(),
        raw: "${queryNames.byIdV1}".to_string(),
        slot: InterpolationSlot::Name,
        span: ByteSpan::new(6, 26),
    }];

    let transformed = canon("query __v0 { venture { id name } }");
    let applied = apply_file(text, vec![edit(mapping, &transformed)]);

    assert!(applied.fully_applied());
    assert!(applied.code.contains("query ${queryNames.byIdV1} {"));
    assert!(!applied.code.contains("__v0"));
}

#[test]
fn name_pattern_rewrite_substitutes_the_new_template() {
    let text = "const Q = gql`query ${queryNames.byIdV1} { venture { id } }`;";
    let mut mapping = mapping_for(text, "op");
    mapping.interpolations = vec![Interpolation {
        expression: "queryNames.byIdV1".to_string(),
        kind: InterpolationKind::QueryName,
        placeholder: "__v0".to_string(),
        raw: "${queryNames.byIdV1}".to_string(),
        slot: InterpolationSlot::Name,
        span: ByteSpan::new(6, 26),
    }];

    let applied = apply_file(
        text,
        vec![FileEdit {
            mapping,
            rename_pattern: Some("${queryNames.byIdV2}".to_string()),
            transformed: canon("query __v0 { venture { id } }"),
        }],
    );

    assert!(applied.fully_applied());
    assert!(applied.code.contains("query ${queryNames.byIdV2} {"));
    assert!(!applied.code.contains("byIdV1"));
}

#[test]
fn document_interpolations_are_reappended() {
    let text =
        "const Q = gql`query Q { venture { ...VentureFields } }\n${VENTURE_FIELDS}`;";
    let mut mapping = mapping_for(text, "op");
    mapping.interpolations = vec![Interpolation {
        expression: "VENTURE_FIELDS".to_string(),
        kind: InterpolationKind::Identifier,
        placeholder: String::new(),
        raw: "${VENTURE_FIELDS}".to_string(),
        slot: InterpolationSlot::Document,
        span: ByteSpan::new(40, 57),
    }];

    let transformed = canon("query Q { venture { ...VentureFields } }");
    let applied = apply_file(text, vec![edit(mapping, &transformed)]);

    assert!(applied.fully_applied());
    assert!(applied.code.contains("${VENTURE_FIELDS}"));
}

#[test]
fn lost_interpolation_placeholder_fails_closed() {
    let text = "const Q = gql`query Q { a ${EXTRA} }`;";
    let mut mapping = mapping_for(text, "op");
    mapping.interpolations = vec![Interpolation {
        expression: "EXTRA".to_string(),
        kind: InterpolationKind::Identifier,
        placeholder: "__v0".to_string(),
        raw: "${EXTRA}".to_string(),
        slot: InterpolationSlot::Selection,
        span: ByteSpan::new(26, 34),
    }];

    // The transformed text no longer carries the placeholder, so the
    // dynamic expression would be silently dropped. That must fail.
    let applied = apply_file(text, vec![edit(mapping, &canon("query Q { a }"))]);
    assert_eq!(applied.code, text);
    assert!(matches!(
        applied.skipped[0].error,
        ApplyError::InterpolationLost { .. },
    ));
}

#[test]
fn missing_source_mapping_fails_closed() {
    let source_map = crate::source_map::SourceMap::new();
    let result = crate::apply::edit_for(
        &source_map,
        "never-extracted",
        canon("query Q { a }"),
        None,
    );

    match result {
        Err(ApplyError::MissingSourceAst { operation_id }) => {
            assert_eq!(operation_id, "never-extracted");
        },
        other => panic!("expected MissingSourceAst, got {other:?}"),
    }
}

#[test]
fn edit_for_consumes_the_mapping_exactly_once() {
    let text = "const Q = gql`query Q { a }`;";
    let source_map = crate::source_map::SourceMap::new();
    source_map.register(mapping_for(text, "op"));

    assert!(
        crate::apply::edit_for(&source_map, "op", canon("query Q { a }"), None)
            .is_ok(),
    );
    assert!(matches!(
        crate::apply::edit_for(&source_map, "op", canon("query Q { a }"), None),
        Err(ApplyError::MissingSourceAst { .. }),
    ));
}

#[test]
fn line_counts_reflect_the_replacement() {
    let text = "const Q = gql`query Q { a }`;";
    let mapping = mapping_for(text, "op");
    let transformed = canon("query Q {\n  a\n  b\n}");

    let applied = apply_file(text, vec![edit(mapping, &transformed)]);
    assert_eq!(applied.lines_removed, 1);
    assert!(applied.lines_added >= 4);
}
