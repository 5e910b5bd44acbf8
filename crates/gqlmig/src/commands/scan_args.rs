use libgqlmig::extract::ExtractionConfig;
use libgqlmig::extract::ExtractionStrategy;
use std::path::PathBuf;

/// Extraction flags shared by the `extract` and `migrate` commands.
#[derive(Debug, clap::Args)]
pub(crate) struct ScanArgs {
    #[arg(
        help="Upper bound on concurrently processed files.",
        long,
        default_value_t=libgqlmig::extract::DEFAULT_CONCURRENCY,
    )]
    pub concurrency: usize,

    #[arg(
        help="Directory of standalone .graphql fragment files.",
        long,
    )]
    pub fragments_dir: Option<PathBuf>,

    #[arg(
        help="Skip fragment resolution.",
        long="no-fragments",
    )]
    pub no_fragments: bool,

    #[arg(
        help="Skip variant enumeration for conditional interpolations.",
        long="no-variants",
    )]
    pub no_variants: bool,

    #[arg(
        help="Root directory to scan for embedded GraphQL.",
        name="DIR",
    )]
    pub root: PathBuf,

    #[arg(
        help="Extraction strategy.",
        long,
        default_value_t=ExtractionStrategy::Hybrid,
    )]
    pub strategy: ExtractionStrategy,
}
impl ScanArgs {
    pub fn to_config(&self) -> ExtractionConfig {
        let mut config = ExtractionConfig::new(&self.root);
        config.concurrency = self.concurrency;
        config.detect_variants = !self.no_variants;
        config.fragments_dir = self.fragments_dir.clone();
        config.resolve_fragments = !self.no_fragments;
        config.strategy = self.strategy;
        config
    }
}
