#[allow(clippy::module_inception)]
mod source_map;
mod source_mapping;

pub use source_map::SourceMap;
pub use source_mapping::SourceMapping;

#[cfg(test)]
mod tests;
