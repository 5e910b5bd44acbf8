mod deprecation;
mod schema_load_error;
mod schema_loader;

pub use deprecation::DeprecatedField;
pub use deprecation::DeprecationRulesError;
pub use deprecation::harvest_sdl;
pub use deprecation::rules_from_json;
pub use deprecation::to_rules;
pub use schema_load_error::SchemaLoadError;
pub use schema_loader::LoadedSchema;
pub use schema_loader::SchemaLoader;
pub use schema_loader::SchemaLoaderConfig;
