use crate::operation::OperationName;
use crate::pattern::NamePattern;
use crate::pattern::PatternRegistry;
use crate::test_support;

#[test]
fn builtin_registry_flags_v1_patterns_deprecated() {
    let registry = PatternRegistry::with_builtin_patterns();

    let v1 = registry
        .lookup("${queryNames.byIdV1}")
        .expect("v1 pattern should be registered");
    assert!(v1.deprecated);
    assert_eq!(v1.version, 1);
    assert_eq!(v1.migration_path.as_deref(), Some("queryNames.byIdV2"));

    let v2 = registry
        .lookup("${queryNames.byIdV2}")
        .expect("v2 pattern should be registered");
    assert!(!v2.deprecated);
}

#[test]
fn analyze_matches_dynamic_names_only() {
    let registry = PatternRegistry::with_builtin_patterns();

    let dynamic = test_support::operation_named(
        "dyn",
        OperationName::Pattern("${queryNames.byIdV1}".to_string()),
        "query __v0 { venture { id } }",
    );
    let analysis = registry.analyze(&dynamic).expect("analysis should succeed");
    assert!(analysis.name_pattern.is_some());
    assert!(analysis.should_migrate());

    let static_op = test_support::operation_named(
        "static",
        OperationName::Static("GetVenture".to_string()),
        "query GetVenture { venture { id } }",
    );
    let analysis = registry.analyze(&static_op).expect("analysis should succeed");
    assert!(analysis.name_pattern.is_none());
    assert!(!analysis.should_migrate());
}

#[test]
fn recommendation_carries_target_and_fragment_substitution() {
    let registry = PatternRegistry::with_builtin_patterns();
    let operation = test_support::operation_named(
        "dyn",
        OperationName::Pattern("${queryNames.byIdV1}".to_string()),
        "query __v0 { venture { ...ventureFields } }",
    );

    let analysis = registry.analyze(&operation).expect("analysis should succeed");
    let recommendation = registry
        .recommend_migration(&analysis)
        .expect("deprecated pattern should yield a recommendation");
    assert_eq!(recommendation.target_template, "${queryNames.byIdV2}");
    assert_eq!(
        recommendation.fragment_substitution,
        Some(("ventureFields".to_string(), "ventureInfoFields".to_string())),
    );
}

#[test]
fn no_recommendation_without_migration_path() {
    let mut registry = PatternRegistry::empty();
    registry.register(NamePattern {
        deprecated: true,
        fragment_substitution: None,
        migration_path: None,
        template: "${queryNames.legacy}".to_string(),
        version: 1,
    });

    let operation = test_support::operation_named(
        "dyn",
        OperationName::Pattern("${queryNames.legacy}".to_string()),
        "query __v0 { venture { id } }",
    );
    let analysis = registry.analyze(&operation).expect("analysis should succeed");
    assert!(analysis.name_pattern.is_some());
    assert!(!analysis.should_migrate());
    assert!(registry.recommend_migration(&analysis).is_none());
}

#[test]
fn register_replaces_existing_template_entry() {
    let mut registry = PatternRegistry::empty();
    registry.register(NamePattern {
        deprecated: false,
        fragment_substitution: None,
        migration_path: None,
        template: "${queryNames.byIdV1}".to_string(),
        version: 1,
    });
    registry.register(NamePattern {
        deprecated: true,
        fragment_substitution: None,
        migration_path: Some("queryNames.byIdV2".to_string()),
        template: "${queryNames.byIdV1}".to_string(),
        version: 1,
    });

    assert_eq!(registry.len(), 1);
    assert!(registry.lookup("${queryNames.byIdV1}").unwrap().deprecated);
}
