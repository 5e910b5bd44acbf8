use crate::ast;
use crate::confidence::QueryMetrics;

fn metrics(source: &str) -> QueryMetrics {
    let doc = ast::query::parse(source).expect("test document should parse");
    QueryMetrics::from_document(&doc)
}

#[test]
fn counts_fields_and_depth() {
    let m = metrics("query Q { user { id name posts { title } } }");
    assert_eq!(m.field_count, 5);
    assert_eq!(m.depth, 3);
    assert_eq!(m.fragment_count, 0);
    assert_eq!(m.variable_count, 0);
}

#[test]
fn counts_fragment_spreads_and_variables() {
    let m = metrics(
        "query Q($id: ID!, $wide: Boolean) {\n\
           user(id: $id) {\n\
             ...CoreFields\n\
             ...ExtraFields\n\
           }\n\
         }",
    );
    assert_eq!(m.fragment_count, 2);
    assert_eq!(m.variable_count, 2);
}

#[test]
fn inline_fragments_count_toward_depth() {
    let m = metrics("query Q { node { ... on User { posts { id } } } }");
    assert_eq!(m.depth, 4);
}

#[test]
fn fragment_definitions_are_measured() {
    let m = metrics(
        "query Q { venture { ...Core } }\n\
         fragment Core on Venture { a b c }",
    );
    // 1 operation field + 3 fragment fields; 1 spread site.
    assert_eq!(m.field_count, 4);
    assert_eq!(m.fragment_count, 1);
}
