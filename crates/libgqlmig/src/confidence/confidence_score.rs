/// How a scored transformation may proceed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreCategory {
    /// Safe to apply without review (score >= 90).
    Automatic,
    /// Apply only after human review (score < 70).
    Manual,
    /// Apply with spot-check review (70 <= score < 90).
    SemiAutomatic,
}
impl ScoreCategory {
    pub fn from_score(score: u8) -> Self {
        if score >= 90 {
            Self::Automatic
        } else if score >= 70 {
            Self::SemiAutomatic
        } else {
            Self::Manual
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreFactors {
    pub complexity: u8,
    pub historical_success: u8,
    pub pattern_match: u8,
    pub test_coverage: u8,
}

/// Weighted estimate (0-100) of how safe an automated rewrite is to apply
/// without human review. Derived and recomputed per transformation
/// attempt; never persisted as a source of truth.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceScore {
    pub category: ScoreCategory,
    pub factors: ScoreFactors,
    pub requires_review: bool,
    /// Advisory findings for a human reviewer. Never blocking.
    pub risks: Vec<String>,
    pub score: u8,
}
