use crate::byte_span::ByteSpan;
use crate::source_map::SourceMap;
use crate::source_map::SourceMapping;
use std::path::PathBuf;

fn mapping(operation_id: &str, start: usize, end: usize) -> SourceMapping {
    SourceMapping {
        file: PathBuf::from("src/queries.ts"),
        interpolations: vec![],
        operation_id: operation_id.to_string(),
        original: "query Q { a }".to_string(),
        span: ByteSpan::new(start, end),
    }
}

#[test]
fn registers_and_returns_mappings() {
    let map = SourceMap::new();
    assert!(map.is_empty());
    assert!(map.register(mapping("op-1", 10, 25)));
    assert_eq!(map.len(), 1);

    let found = map.get("op-1").expect("mapping should exist");
    assert_eq!(found.span, ByteSpan::new(10, 25));
}

#[test]
fn duplicate_registration_keeps_first_mapping() {
    let map = SourceMap::new();
    assert!(map.register(mapping("op-1", 10, 25)));
    assert!(!map.register(mapping("op-1", 99, 120)));

    let found = map.get("op-1").expect("mapping should exist");
    assert_eq!(found.span, ByteSpan::new(10, 25));
}

#[test]
fn take_consumes_the_mapping() {
    let map = SourceMap::new();
    map.register(mapping("op-1", 10, 25));

    assert!(map.take("op-1").is_some());
    assert!(map.take("op-1").is_none());
    assert!(map.get("op-1").is_none());
}

#[test]
fn spans_overlap_detection() {
    assert!(ByteSpan::new(0, 10).overlaps(&ByteSpan::new(9, 12)));
    assert!(!ByteSpan::new(0, 10).overlaps(&ByteSpan::new(10, 12)));
    assert!(ByteSpan::new(5, 6).overlaps(&ByteSpan::new(0, 100)));
}
