mod applied_change;
mod query_transformer;
mod transform_error;
mod transform_outcome;
mod transform_pattern;
mod transform_rule;

pub use applied_change::AppliedChange;
pub use query_transformer::rename_fragment;
pub use query_transformer::transform;
pub use transform_error::TransformError;
pub use transform_outcome::TransformOutcome;
pub use transform_pattern::TransformPattern;
pub use transform_rule::TransformRule;

#[cfg(test)]
mod tests;
