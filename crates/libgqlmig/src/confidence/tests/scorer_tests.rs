use crate::ast;
use crate::confidence::ConfidenceScorer;
use crate::confidence::QueryMetrics;
use crate::confidence::ScoreCategory;
use crate::confidence::ScoreInputs;
use crate::transform::TransformPattern;
use proptest::prelude::*;

fn scorer() -> ConfidenceScorer {
    ConfidenceScorer::default()
}

fn metrics(source: &str) -> QueryMetrics {
    let doc = ast::query::parse(source).expect("test document should parse");
    QueryMetrics::from_document(&doc)
}

fn flat_metrics(
    depth: usize,
    field_count: usize,
    fragment_count: usize,
    variable_count: usize,
) -> QueryMetrics {
    QueryMetrics {
        depth,
        field_count,
        fragment_count,
        variable_count,
    }
}

fn inputs(test_coverage: f64, historical_success: f64) -> ScoreInputs {
    ScoreInputs {
        historical_success: Some(historical_success),
        test_coverage: Some(test_coverage),
    }
}

#[test]
fn simple_field_rename_scores_automatic() {
    let m = metrics("query GetUser { user { id fullName } }");
    let score = scorer().score(
        &m,
        TransformPattern::SimpleFieldRename,
        1,
        &ScoreInputs::default(),
    );

    assert!(score.score >= 90, "got {}", score.score);
    assert_eq!(score.category, ScoreCategory::Automatic);
    assert!(!score.requires_review);
}

#[test]
fn category_boundaries_are_exact() {
    // complexity 100 and patternMatch 100 contribute 60; the remaining
    // 0.2 + 0.2 weighted inputs are chosen to land exactly on the
    // boundary scores.
    let m = flat_metrics(1, 1, 0, 0);

    let at_90 = scorer().score(
        &m,
        TransformPattern::NoChange,
        1,
        &inputs(75.0, 75.0),
    );
    assert_eq!(at_90.score, 90);
    assert_eq!(at_90.category, ScoreCategory::Automatic);
    assert!(!at_90.requires_review);

    let at_89 = scorer().score(
        &m,
        TransformPattern::NoChange,
        1,
        &inputs(72.5, 72.5),
    );
    assert_eq!(at_89.score, 89);
    assert_eq!(at_89.category, ScoreCategory::SemiAutomatic);
    assert!(at_89.requires_review);

    let at_69 = scorer().score(
        &m,
        TransformPattern::NoChange,
        1,
        &inputs(22.5, 22.5),
    );
    assert_eq!(at_69.score, 69);
    assert_eq!(at_69.category, ScoreCategory::Manual);
}

#[test]
fn complexity_penalties_follow_the_calibration() {
    let base = scorer().score(
        &flat_metrics(5, 20, 0, 0),
        TransformPattern::NoChange,
        1,
        &ScoreInputs::default(),
    );
    assert_eq!(base.factors.complexity, 100);

    // One level beyond the depth limit costs 10.
    let deep = scorer().score(
        &flat_metrics(6, 20, 0, 0),
        TransformPattern::NoChange,
        1,
        &ScoreInputs::default(),
    );
    assert_eq!(deep.factors.complexity, 90);

    // Five fields beyond the limit cost 2 each.
    let wide = scorer().score(
        &flat_metrics(5, 25, 0, 0),
        TransformPattern::NoChange,
        1,
        &ScoreInputs::default(),
    );
    assert_eq!(wide.factors.complexity, 90);

    // Fragments cost 8, variables 10.
    let referencing = scorer().score(
        &flat_metrics(5, 20, 2, 1),
        TransformPattern::NoChange,
        1,
        &ScoreInputs::default(),
    );
    assert_eq!(referencing.factors.complexity, 100 - 16 - 10);
}

#[test]
fn multi_rule_transformations_are_dampened() {
    let single = scorer().score(
        &flat_metrics(2, 4, 0, 0),
        TransformPattern::MultiChange,
        1,
        &ScoreInputs::default(),
    );
    let triple = scorer().score(
        &flat_metrics(2, 4, 0, 0),
        TransformPattern::MultiChange,
        3,
        &ScoreInputs::default(),
    );
    assert_eq!(single.factors.complexity, 100);
    assert_eq!(triple.factors.complexity, 70);
}

#[test]
fn pattern_match_table() {
    let m = flat_metrics(1, 1, 0, 0);
    let factor = |pattern| {
        scorer()
            .score(&m, pattern, 1, &ScoreInputs::default())
            .factors
            .pattern_match
    };

    assert_eq!(factor(TransformPattern::NoChange), 100);
    assert_eq!(factor(TransformPattern::SimpleFieldRename), 95);
    assert_eq!(factor(TransformPattern::RootQueryMigration), 95);
    assert_eq!(factor(TransformPattern::ConnectionToArray), 95);
    assert_eq!(factor(TransformPattern::DeprecatedFieldRemoval), 95);
    assert_eq!(factor(TransformPattern::MultiChange), 80);
    assert_eq!(factor(TransformPattern::TypeChange), 80);
    assert_eq!(factor(TransformPattern::Custom), 35);
    assert_eq!(factor(TransformPattern::Complex), 35);
}

#[test]
fn risks_accumulate_but_never_block() {
    let score = scorer().score(
        &flat_metrics(8, 10, 6, 2),
        TransformPattern::Custom,
        1,
        &inputs(20.0, 50.0),
    );

    assert!(score.risks.iter().any(|r| r.contains("nested")));
    assert!(score.risks.iter().any(|r| r.contains("variable")));
    assert!(score.risks.iter().any(|r| r.contains("coverage")));
    assert!(score.risks.iter().any(|r| r.contains("pattern")));
    assert!(score.risks.iter().any(|r| r.contains("fragment")));
    assert_eq!(score.category, ScoreCategory::Manual);
}

proptest! {
    /// Growing any structural metric never raises the complexity factor.
    #[test]
    fn complexity_is_monotonic(
        depth in 1usize..12,
        fields in 1usize..40,
        fragments in 0usize..8,
        variables in 0usize..6,
    ) {
        let scorer = scorer();
        let base = scorer
            .score(
                &flat_metrics(depth, fields, fragments, variables),
                TransformPattern::NoChange,
                1,
                &ScoreInputs::default(),
            )
            .factors
            .complexity;

        for grown in [
            flat_metrics(depth + 1, fields, fragments, variables),
            flat_metrics(depth, fields + 1, fragments, variables),
            flat_metrics(depth, fields, fragments + 1, variables),
            flat_metrics(depth, fields, fragments, variables + 1),
        ] {
            let factor = scorer
                .score(&grown, TransformPattern::NoChange, 1, &ScoreInputs::default())
                .factors
                .complexity;
            prop_assert!(factor <= base);
        }
    }
}
