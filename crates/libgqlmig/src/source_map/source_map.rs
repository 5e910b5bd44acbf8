use crate::source_map::SourceMapping;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Registry of [`SourceMapping`]s keyed by operation ID.
///
/// At most one mapping exists per operation ID. Registration is
/// first-write-wins: a duplicate registration is ignored (and logged),
/// since the first captured mapping is the one whose byte offsets match
/// the file text that extraction actually read.
#[derive(Debug, Default)]
pub struct SourceMap {
    mappings: RwLock<HashMap<String, SourceMapping>>,
}
impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a mapping. Returns `false` (without overwriting) when a
    /// mapping is already present for the operation ID.
    pub fn register(&self, mapping: SourceMapping) -> bool {
        let mut mappings = self.mappings.write();
        if mappings.contains_key(&mapping.operation_id) {
            log::debug!(
                "Ignoring duplicate source mapping registration for \
                operation `{}`.",
                mapping.operation_id,
            );
            return false;
        }
        mappings.insert(mapping.operation_id.clone(), mapping);
        true
    }

    pub fn get(&self, operation_id: &str) -> Option<SourceMapping> {
        self.mappings.read().get(operation_id).cloned()
    }

    /// Removes and returns the mapping for `operation_id`. The applicator
    /// consumes each mapping exactly once.
    pub fn take(&self, operation_id: &str) -> Option<SourceMapping> {
        self.mappings.write().remove(operation_id)
    }

    pub fn len(&self) -> usize {
        self.mappings.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.read().is_empty()
    }
}
