use crate::pattern::NamePattern;
use indexmap::IndexMap;

/// Static table of known dynamic query-name templates.
///
/// Callers own their registry instance (constructor injection); the
/// process-wide default lives at the CLI composition root, never in here.
#[derive(Clone, Debug, Default)]
pub struct PatternRegistry {
    patterns: IndexMap<String, NamePattern>,
}
impl PatternRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table covering the `${queryNames.*}` templates this
    /// tool ships migrations for: each deprecated v1 name maps to its v2
    /// replacement, with the fragment rename the v2 shape expects.
    pub fn with_builtin_patterns() -> Self {
        let mut registry = Self::empty();
        registry.register(NamePattern {
            deprecated: true,
            fragment_substitution: Some((
                "ventureFields".to_string(),
                "ventureInfoFields".to_string(),
            )),
            migration_path: Some("queryNames.byIdV2".to_string()),
            template: "${queryNames.byIdV1}".to_string(),
            version: 1,
        });
        registry.register(NamePattern {
            deprecated: false,
            fragment_substitution: None,
            migration_path: None,
            template: "${queryNames.byIdV2}".to_string(),
            version: 2,
        });
        registry.register(NamePattern {
            deprecated: true,
            fragment_substitution: Some((
                "ventureFields".to_string(),
                "ventureInfoFields".to_string(),
            )),
            migration_path: Some("queryNames.byDomainNameV2".to_string()),
            template: "${queryNames.byDomainNameV1}".to_string(),
            version: 1,
        });
        registry.register(NamePattern {
            deprecated: false,
            fragment_substitution: None,
            migration_path: None,
            template: "${queryNames.byDomainNameV2}".to_string(),
            version: 2,
        });
        registry
    }

    /// Inserts or replaces the entry keyed by the pattern's template text.
    pub fn register(&mut self, pattern: NamePattern) {
        self.patterns.insert(pattern.template.clone(), pattern);
    }

    /// Exact-match lookup by raw template text.
    pub fn lookup(&self, template: &str) -> Option<&NamePattern> {
        self.patterns.get(template)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &NamePattern> {
        self.patterns.values()
    }
}
