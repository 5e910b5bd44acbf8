mod confidence_score;
mod confidence_scorer;
mod query_metrics;

pub use confidence_score::ConfidenceScore;
pub use confidence_score::ScoreCategory;
pub use confidence_score::ScoreFactors;
pub use confidence_scorer::ConfidenceScorer;
pub use confidence_scorer::ScoreInputs;
pub use confidence_scorer::ScoreWeights;
pub use query_metrics::QueryMetrics;

#[cfg(test)]
mod tests;
