use crate::ast;
use crate::pattern::fingerprint_document;
use crate::pattern::group_by_fingerprint;
use crate::test_support;

fn fingerprint(source: &str) -> crate::pattern::Fingerprint {
    let doc = ast::query::parse(source).expect("test document should parse");
    fingerprint_document(&doc)
}

#[test]
fn dynamic_name_interpolation_does_not_affect_fingerprint() {
    // Two operations that differ only in their dynamic name placeholder
    // must hash identically.
    let v1 = fingerprint("query __v0 { venture { id name } }");
    let v2 = fingerprint("query __v1 { venture { id name } }");
    assert_eq!(v1, v2);
}

#[test]
fn static_names_do_not_affect_fingerprint() {
    let a = fingerprint("query GetVenture { venture { id name } }");
    let b = fingerprint("query FetchVenture { venture { id name } }");
    assert_eq!(a, b);
}

#[test]
fn selection_differences_change_the_fingerprint() {
    let a = fingerprint("query Q { venture { id name } }");
    let b = fingerprint("query Q { venture { id displayName } }");
    assert_ne!(a, b);
}

#[test]
fn selection_order_is_structural() {
    let a = fingerprint("query Q { venture { id name } }");
    let b = fingerprint("query Q { venture { name id } }");
    assert_ne!(a, b);
}

#[test]
fn arguments_and_variables_participate() {
    let plain = fingerprint("query Q { venture { id } }");
    let with_arg = fingerprint("query Q { venture(id: 4) { id } }");
    assert_ne!(plain, with_arg);

    let with_var =
        fingerprint("query Q($id: ID!) { venture(id: $id) { id } }");
    assert_ne!(with_arg, with_var);
}

#[test]
fn groups_structurally_identical_operations() {
    let op_a = test_support::operation("a", "query __v0 { venture { id name } }");
    let op_b = test_support::operation("b", "query __v1 { venture { id name } }");
    let op_c = test_support::operation("c", "query Q { venture { id } }");

    let groups = group_by_fingerprint([&op_a, &op_b, &op_c]);
    assert_eq!(groups.len(), 2);

    let largest = groups
        .values()
        .max_by_key(|members| members.len())
        .expect("groups should not be empty");
    assert_eq!(largest.len(), 2);
}
