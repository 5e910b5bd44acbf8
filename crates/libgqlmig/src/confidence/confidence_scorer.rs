use crate::confidence::ConfidenceScore;
use crate::confidence::QueryMetrics;
use crate::confidence::ScoreCategory;
use crate::confidence::ScoreFactors;
use crate::transform::TransformPattern;

/// Factor weights and penalty constants.
///
/// The defaults reproduce the calibration this tool has always shipped
/// with. They are hand-tuned values, kept configurable rather than
/// treated as ground truth.
#[derive(Clone, Copy, Debug)]
pub struct ScoreWeights {
    pub complexity: f64,
    pub depth_limit: usize,
    pub depth_penalty: f64,
    pub field_limit: usize,
    pub field_penalty: f64,
    pub fragment_penalty: f64,
    pub historical_success: f64,
    pub multi_rule_penalty: f64,
    pub pattern_match: f64,
    pub test_coverage: f64,
    pub variable_penalty: f64,
}
impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            complexity: 0.3,
            depth_limit: 5,
            depth_penalty: 10.0,
            field_limit: 20,
            field_penalty: 2.0,
            fragment_penalty: 8.0,
            historical_success: 0.2,
            multi_rule_penalty: 15.0,
            pattern_match: 0.3,
            test_coverage: 0.2,
            variable_penalty: 10.0,
        }
    }
}

/// Externally supplied score factors. Both default when no measurement is
/// available, so mocked and real data share one code path.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScoreInputs {
    /// Success rate (0-100) of previous applications of this pattern.
    pub historical_success: Option<f64>,
    /// Test coverage (0-100) of the code that owns the operation.
    pub test_coverage: Option<f64>,
}

const DEFAULT_TEST_COVERAGE: f64 = 80.0;
const DEFAULT_HISTORICAL_SUCCESS: f64 = 90.0;

#[derive(Clone, Debug, Default)]
pub struct ConfidenceScorer {
    weights: ScoreWeights,
}
impl ConfidenceScorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    /// Scores one transformation attempt from the operation's structural
    /// metrics, the transformation's pattern classification, and the
    /// number of rules that participated.
    pub fn score(
        &self,
        metrics: &QueryMetrics,
        pattern: TransformPattern,
        rule_count: usize,
        inputs: &ScoreInputs,
    ) -> ConfidenceScore {
        let weights = &self.weights;
        let complexity = self.complexity_factor(metrics, rule_count);
        let pattern_match = pattern_match_factor(pattern);
        let test_coverage = inputs
            .test_coverage
            .unwrap_or(DEFAULT_TEST_COVERAGE)
            .clamp(0.0, 100.0);
        let historical_success = inputs
            .historical_success
            .unwrap_or(DEFAULT_HISTORICAL_SUCCESS)
            .clamp(0.0, 100.0);

        let weighted = weights.complexity * complexity
            + weights.pattern_match * pattern_match
            + weights.test_coverage * test_coverage
            + weights.historical_success * historical_success;
        let score = weighted.round().clamp(0.0, 100.0) as u8;

        let mut risks = vec![];
        if metrics.depth > weights.depth_limit {
            risks.push(format!(
                "deeply nested selections (depth {})",
                metrics.depth,
            ));
        }
        if metrics.variable_count > 0 {
            risks.push(format!(
                "operation declares {} variable(s)",
                metrics.variable_count,
            ));
        }
        if test_coverage < 40.0 {
            risks.push(format!("low test coverage ({test_coverage:.0}%)"));
        }
        if matches!(pattern, TransformPattern::Custom | TransformPattern::Complex) {
            risks.push(format!("non-standard transformation pattern ({pattern})"));
        }
        if metrics.fragment_count > 5 {
            risks.push(format!(
                "references {} fragments",
                metrics.fragment_count,
            ));
        }

        ConfidenceScore {
            category: ScoreCategory::from_score(score),
            factors: ScoreFactors {
                complexity: complexity.round() as u8,
                historical_success: historical_success.round() as u8,
                pattern_match: pattern_match.round() as u8,
                test_coverage: test_coverage.round() as u8,
            },
            requires_review: score < 90,
            risks,
            score,
        }
    }

    /// Starts at 100 and decays with structural size. Multi-rule
    /// transformations are additionally dampened by
    /// `max(0, complexity - multi_rule_penalty * (rule_count - 1))` so a
    /// compound-but-simple rewrite is not over-penalized per rule.
    fn complexity_factor(&self, metrics: &QueryMetrics, rule_count: usize) -> f64 {
        let weights = &self.weights;
        let mut complexity = 100.0;
        if metrics.depth > weights.depth_limit {
            complexity -= weights.depth_penalty
                * (metrics.depth - weights.depth_limit) as f64;
        }
        if metrics.field_count > weights.field_limit {
            complexity -= weights.field_penalty
                * (metrics.field_count - weights.field_limit) as f64;
        }
        complexity -= weights.fragment_penalty * metrics.fragment_count as f64;
        complexity -= weights.variable_penalty * metrics.variable_count as f64;
        complexity = complexity.max(0.0);

        if rule_count > 1 {
            complexity = (complexity
                - weights.multi_rule_penalty * (rule_count - 1) as f64)
                .max(0.0);
        }
        complexity
    }
}

fn pattern_match_factor(pattern: TransformPattern) -> f64 {
    match pattern {
        TransformPattern::NoChange => 100.0,
        TransformPattern::SimpleFieldRename
        | TransformPattern::RootQueryMigration
        | TransformPattern::ConnectionToArray
        | TransformPattern::DeprecatedFieldRemoval => 95.0,
        TransformPattern::MultiChange | TransformPattern::TypeChange => 80.0,
        TransformPattern::Custom | TransformPattern::Complex => 35.0,
    }
}
