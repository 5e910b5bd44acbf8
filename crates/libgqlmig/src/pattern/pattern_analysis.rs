use crate::operation::ExtractedOperation;
use crate::operation::OperationName;
use crate::operation::OperationParseError;
use crate::pattern::Fingerprint;
use crate::pattern::NamePattern;
use crate::pattern::PatternRegistry;
use crate::pattern::fingerprint_document;
use indexmap::IndexMap;

/// Result of analyzing one operation against a [`PatternRegistry`].
#[derive(Clone, Debug)]
pub struct PatternAnalysis<'registry> {
    pub fingerprint: Fingerprint,
    /// Present iff the operation's dynamic name template exactly equals a
    /// registered pattern key.
    pub name_pattern: Option<&'registry NamePattern>,
}
impl<'registry> PatternAnalysis<'registry> {
    pub fn should_migrate(&self) -> bool {
        self.name_pattern
            .map(|pattern| pattern.deprecated && pattern.migration_path.is_some())
            .unwrap_or(false)
    }
}

/// Migration target for a deprecated name pattern.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MigrationRecommendation {
    pub fragment_substitution: Option<(String, String)>,
    /// Raw replacement template, `${...}` delimiters included.
    pub target_template: String,
}

impl PatternRegistry {
    /// Matches the operation's dynamic name (if any) against the registry
    /// and computes its name-invariant content fingerprint.
    pub fn analyze<'registry>(
        &'registry self,
        operation: &ExtractedOperation,
    ) -> Result<PatternAnalysis<'registry>, OperationParseError> {
        let name_pattern = match operation.name() {
            OperationName::Pattern(template) => self.lookup(template),
            OperationName::Anonymous | OperationName::Static(_) => None,
        };
        let doc = operation.document()?;
        Ok(PatternAnalysis {
            fingerprint: fingerprint_document(&doc),
            name_pattern,
        })
    }

    /// `Some` iff the matched pattern is flagged deprecated and a
    /// migration path exists.
    pub fn recommend_migration(
        &self,
        analysis: &PatternAnalysis<'_>,
    ) -> Option<MigrationRecommendation> {
        let pattern = analysis.name_pattern?;
        if !pattern.deprecated {
            return None;
        }
        let path = pattern.migration_path.as_ref()?;
        Some(MigrationRecommendation {
            fragment_substitution: pattern.fragment_substitution.clone(),
            target_template: format!("${{{path}}}"),
        })
    }
}

/// Groups operations whose contents are structurally identical after
/// name/interpolation normalization. Duplicate and variant detection
/// builds on these groups.
pub fn group_by_fingerprint<'op>(
    operations: impl IntoIterator<Item = &'op ExtractedOperation>,
) -> IndexMap<Fingerprint, Vec<&'op ExtractedOperation>> {
    let mut groups: IndexMap<Fingerprint, Vec<&'op ExtractedOperation>> =
        IndexMap::new();
    for operation in operations {
        let fingerprint = match operation.document() {
            Ok(doc) => fingerprint_document(&doc),
            Err(err) => {
                log::warn!("Skipping unfingerprintable operation: {err}");
                continue;
            },
        };
        groups.entry(fingerprint).or_default().push(operation);
    }
    groups
}
