mod extract_config;
mod extraction_engine;
mod extraction_error;
mod extraction_result;
mod extraction_strategy;
mod fragment_resolver;
mod glob_filter;
mod normalize;
mod raw_template;
mod source_parser;
mod template_scanner;
mod variant_expander;

pub use extract_config::DEFAULT_CONCURRENCY;
pub use extract_config::ExtractionConfig;
pub use extraction_engine::ExtractionEngine;
pub use extraction_error::ExtractionError;
pub use extraction_error::ExtractionRunError;
pub use extraction_result::ExtractionResult;
pub use extraction_result::ExtractionStats;
pub use extraction_strategy::ExtractionStrategy;

pub(crate) use fragment_resolver::FragmentTable;
pub(crate) use raw_template::RawSubstitution;
pub(crate) use raw_template::RawTemplate;

#[cfg(test)]
mod tests;
