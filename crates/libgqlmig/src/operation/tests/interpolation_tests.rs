use crate::operation::InterpolationKind;
use crate::operation::find_ternary_split;

#[test]
fn classifies_query_name_lookup() {
    assert_eq!(
        InterpolationKind::classify("queryNames.byIdV1"),
        InterpolationKind::QueryName,
    );
    assert_eq!(
        InterpolationKind::classify("queryNames['byIdV1']"),
        InterpolationKind::QueryName,
    );
}

#[test]
fn classifies_identifier_and_member_access() {
    assert_eq!(
        InterpolationKind::classify("ventureFields"),
        InterpolationKind::Identifier,
    );
    assert_eq!(
        InterpolationKind::classify("fragments.venture.core"),
        InterpolationKind::MemberAccess,
    );
}

#[test]
fn classifies_function_call() {
    assert_eq!(
        InterpolationKind::classify("buildFragment('wide')"),
        InterpolationKind::FunctionCall,
    );
    assert_eq!(
        InterpolationKind::classify("fragments.pick(kind)"),
        InterpolationKind::FunctionCall,
    );
}

#[test]
fn classifies_conditional() {
    assert_eq!(
        InterpolationKind::classify("useWide ? wideFields : narrowFields"),
        InterpolationKind::Conditional,
    );
}

#[test]
fn optional_chaining_is_not_conditional() {
    assert_eq!(
        InterpolationKind::classify("config?.fragment"),
        InterpolationKind::Other,
    );
}

#[test]
fn arbitrary_expressions_fall_through_to_other() {
    assert_eq!(
        InterpolationKind::classify("a + b"),
        InterpolationKind::Other,
    );
    assert_eq!(InterpolationKind::classify(""), InterpolationKind::Other);
}

#[test]
fn ternary_split_finds_top_level_operators() {
    let (question, colon) =
        find_ternary_split("flag ? 'a' : 'b'").expect("expected a ternary");
    assert_eq!(question, 5);
    assert_eq!(colon, 11);
}

#[test]
fn ternary_split_skips_quoted_and_nested_operators() {
    // The `?` and `:` inside the string literal must not terminate the
    // outer ternary's scan.
    let expr = "flag ? 'a ? b : c' : fallback";
    let (question, colon) = find_ternary_split(expr).expect("expected a ternary");
    assert_eq!(&expr[..question].trim(), &"flag");
    assert_eq!(&expr[colon + 1..].trim(), &"fallback");
}

#[test]
fn nested_ternary_matches_outer_colon() {
    let expr = "a ? b ? 'x' : 'y' : 'z'";
    let (_, colon) = find_ternary_split(expr).expect("expected a ternary");
    assert_eq!(&expr[colon + 1..].trim(), &"'z'");
}

#[test]
fn no_ternary_in_plain_member_access() {
    assert!(find_ternary_split("queryNames.byIdV1").is_none());
    assert!(find_ternary_split("a ?? b").is_none());
}
