use crate::transform::AppliedChange;

/// Shape classification of one transformation, used by the confidence
/// scorer's pattern-match factor.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransformPattern {
    Complex,
    ConnectionToArray,
    Custom,
    DeprecatedFieldRemoval,
    MultiChange,
    NoChange,
    RootQueryMigration,
    SimpleFieldRename,
    TypeChange,
}
impl TransformPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complex => "complex",
            Self::ConnectionToArray => "connection-to-array",
            Self::Custom => "custom",
            Self::DeprecatedFieldRemoval => "deprecated-field-removal",
            Self::MultiChange => "multi-change",
            Self::NoChange => "no-change",
            Self::RootQueryMigration => "root-query-migration",
            Self::SimpleFieldRename => "simple-field-rename",
            Self::TypeChange => "type-change",
        }
    }

    /// Derives the pattern from what actually changed. `name_migrated`
    /// marks a dynamic query-name template rewrite performed alongside
    /// (or instead of) selection changes.
    pub fn classify(
        changes: &[AppliedChange],
        name_migrated: bool,
    ) -> Self {
        if changes.is_empty() {
            return if name_migrated {
                Self::RootQueryMigration
            } else {
                Self::NoChange
            };
        }

        let mut renames = 0usize;
        let mut structures = 0usize;
        let mut arguments = 0usize;
        let mut fragment_renames = 0usize;
        for change in changes {
            match change.rule.as_str() {
                "field-rename" => renames += 1,
                "structure-change" => structures += 1,
                "argument-change" => arguments += 1,
                "fragment-rename" => fragment_renames += 1,
                _ => return Self::Custom,
            }
        }

        // Fragment renames riding along with a name-pattern migration are
        // part of the standard root-query migration shape.
        if name_migrated && renames == 0 && structures == 0 && arguments == 0 {
            return Self::RootQueryMigration;
        }
        if fragment_renames > 0 && (renames > 0 || structures > 0 || arguments > 0) {
            return Self::MultiChange;
        }

        if structures > 0 && renames == 0 && arguments == 0 {
            return Self::ConnectionToArray;
        }
        if arguments > 0 && renames == 0 && structures == 0 {
            return Self::TypeChange;
        }
        if renames > 0 && structures == 0 && arguments == 0 {
            if renames == 1 && !name_migrated {
                return Self::SimpleFieldRename;
            }
            return Self::MultiChange;
        }
        Self::MultiChange
    }
}
impl std::fmt::Display for TransformPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
