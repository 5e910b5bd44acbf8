mod fingerprint;
mod name_pattern;
mod pattern_analysis;
mod pattern_registry;

pub use fingerprint::Fingerprint;
pub use fingerprint::fingerprint_document;
pub use name_pattern::NamePattern;
pub use pattern_analysis::MigrationRecommendation;
pub use pattern_analysis::PatternAnalysis;
pub use pattern_analysis::group_by_fingerprint;
pub use pattern_registry::PatternRegistry;

#[cfg(test)]
mod tests;
