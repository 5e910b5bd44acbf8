use crate::extract::ExtractionStrategy;
use std::path::PathBuf;

pub const DEFAULT_CONCURRENCY: usize = 4;

/// Configuration for one extraction run.
#[derive(Clone, Debug)]
pub struct ExtractionConfig {
    /// Upper bound on concurrently processed files.
    pub concurrency: usize,

    /// Enumerate query variants from conditional interpolations.
    pub detect_variants: bool,

    /// Directory of standalone `.graphql`/`.gql` fragment files searched
    /// during fragment resolution, in addition to fragments found
    /// co-located in scanned templates.
    pub fragments_dir: Option<PathBuf>,

    /// Glob patterns (relative to `root`) for files to skip.
    pub ignore: Vec<String>,

    /// Glob patterns (relative to `root`) for files to scan.
    pub include: Vec<String>,

    /// Append resolved fragment text to each referencing operation's
    /// normalized document.
    pub inline_fragments: bool,

    /// Resolve `...FragmentName` spreads against the fragment table.
    pub resolve_fragments: bool,

    pub root: PathBuf,

    pub strategy: ExtractionStrategy,
}
impl ExtractionConfig {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            detect_variants: true,
            fragments_dir: None,
            ignore: vec!["**/node_modules/**".to_string()],
            include: vec![
                "**/*.js".to_string(),
                "**/*.jsx".to_string(),
                "**/*.ts".to_string(),
                "**/*.tsx".to_string(),
            ],
            inline_fragments: false,
            resolve_fragments: true,
            root: root.into(),
            strategy: ExtractionStrategy::default(),
        }
    }
}
