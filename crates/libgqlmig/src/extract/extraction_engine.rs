use crate::ast;
use crate::extract::ExtractionConfig;
use crate::extract::ExtractionError;
use crate::extract::ExtractionResult;
use crate::extract::ExtractionRunError;
use crate::extract::ExtractionStrategy;
use crate::extract::FragmentTable;
use crate::extract::RawTemplate;
use crate::extract::fragment_resolver;
use crate::extract::glob_filter::GlobFilter;
use crate::extract::normalize;
use crate::extract::source_parser;
use crate::extract::template_scanner;
use crate::extract::variant_expander;
use crate::file_reader;
use crate::loc;
use crate::operation::ExtractedOperation;
use crate::operation::OperationKind;
use crate::operation::OperationName;
use crate::operation::SwitchKind;
use crate::operation::VariableInfo;
use crate::operation::VariantSwitch;
use crate::source_map::SourceMap;
use crate::source_map::SourceMapping;
use graphql_parser::query::Definition;
use graphql_parser::query::OperationDefinition;
use indexmap::IndexMap;
use rayon::prelude::*;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

/// Walks a source tree, locates embedded GraphQL, and emits normalized
/// operation records plus their source mappings.
///
/// Files are processed by a bounded worker pool; per-file failures are
/// recorded and skipped, and only catastrophic I/O (a missing root) fails
/// the run.
#[derive(Debug)]
pub struct ExtractionEngine {
    config: ExtractionConfig,
}

#[derive(Debug, Default)]
struct FileOutcome {
    ast_parsed: bool,
    errors: Vec<ExtractionError>,
    operations: Vec<(ExtractedOperation, Option<SourceMapping>)>,
    pluck_fallback: bool,
    scanned: bool,
}

impl ExtractionEngine {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Runs extraction, registering one source mapping per operation into
    /// `source_map`.
    pub fn extract(
        &self,
        source_map: &SourceMap,
    ) -> Result<ExtractionResult, ExtractionRunError> {
        let started = Instant::now();
        let root = self.config.root.as_path();
        if !root.is_dir() {
            return Err(ExtractionRunError::MissingRoot(root.to_path_buf()));
        }

        let filter = GlobFilter::compile(&self.config.include, &self.config.ignore)?;
        let mut result = ExtractionResult::default();

        let table = FragmentTable::new();
        if self.config.resolve_fragments
            && let Some(fragments_dir) = &self.config.fragments_dir {
            result.errors.extend(table.load_dir(fragments_dir));
        }

        let (files, walk_errors) = self.collect_files(root, &filter);
        result.errors.extend(walk_errors);
        log::debug!(
            "Extracting from {} files under {} with strategy `{}`.",
            files.len(),
            root.display(),
            self.config.strategy,
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.concurrency.max(1))
            .build()
            .map_err(|err| ExtractionRunError::WorkerPool(err.to_string()))?;
        let outcomes: Vec<FileOutcome> = pool.install(|| {
            files
                .par_iter()
                .map(|file| self.process_file(file, &table))
                .collect()
        });

        for outcome in outcomes {
            result.stats.files_scanned += 1;
            if !outcome.scanned {
                result.stats.files_failed += 1;
            }
            if outcome.ast_parsed {
                result.stats.ast_files += 1;
            }
            if outcome.pluck_fallback {
                result.stats.pluck_fallbacks += 1;
            }
            result.errors.extend(outcome.errors);

            for (mut operation, mapping) in outcome.operations {
                if self.config.inline_fragments && !operation.fragment_refs.is_empty() {
                    operation.normalized = fragment_resolver::inline_fragments(
                        &operation.normalized,
                        &operation.fragment_refs,
                        &table,
                    );
                }
                if let Some(mapping) = mapping {
                    source_map.register(mapping);
                }
                result.queries.push(operation);
            }
        }

        if self.config.detect_variants {
            self.expand_all_variants(&mut result, &table);
        }

        for operation in &result.queries {
            match operation.kind() {
                OperationKind::Query => result.stats.queries += 1,
                OperationKind::Mutation => result.stats.mutations += 1,
                OperationKind::Subscription => result.stats.subscriptions += 1,
            }
        }
        result.fragments = table.into_fragments();
        result.stats.fragments = result.fragments.len();
        result.stats.variants = result.variants.len();
        result.stats.duration_ms = started.elapsed().as_millis() as u64;

        Ok(result)
    }

    fn collect_files(
        &self,
        root: &Path,
        filter: &GlobFilter,
    ) -> (Vec<PathBuf>, Vec<ExtractionError>) {
        let mut files = vec![];
        let mut errors = vec![];
        for entry in walkdir::WalkDir::new(root).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    errors.push(ExtractionError::new(
                        root,
                        format!("walk error: {err}"),
                    ));
                    continue;
                },
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let relative = path
                .strip_prefix(root)
                .unwrap_or(path)
                .to_string_lossy()
                .replace('\\', "/");
            if filter.matches(&relative) {
                files.push(path.to_path_buf());
            } else {
                log::trace!("Skipping non-matching file: {relative}.");
            }
        }
        (files, errors)
    }

    fn process_file(&self, path: &Path, table: &FragmentTable) -> FileOutcome {
        let mut outcome = FileOutcome::default();
        let text = match file_reader::read_content(path) {
            Ok(text) => text,
            Err(err) => {
                outcome.errors.push(ExtractionError::new(path, err.to_string()));
                return outcome;
            },
        };

        let templates = match self.config.strategy {
            ExtractionStrategy::Pluck => {
                outcome.scanned = true;
                template_scanner::scan_templates(&text, path)
            },
            ExtractionStrategy::Ast => match source_parser::parse_templates(&text, path) {
                Ok(parsed) => {
                    if parsed.has_errors && parsed.templates.is_empty() {
                        outcome.errors.push(ExtractionError::new(
                            path,
                            "host-language parse produced only error nodes",
                        ));
                        return outcome;
                    }
                    outcome.ast_parsed = true;
                    outcome.scanned = true;
                    parsed.templates
                },
                Err(err) => {
                    outcome.errors.push(ExtractionError::new(path, err.to_string()));
                    return outcome;
                },
            },
            ExtractionStrategy::Hybrid => match source_parser::parse_templates(&text, path) {
                Ok(parsed) => {
                    outcome.ast_parsed = true;
                    outcome.scanned = true;
                    if parsed.has_errors {
                        // Reconcile: AST results win, the text scan fills
                        // in templates the damaged tree missed.
                        let mut templates = parsed.templates;
                        let plucked = template_scanner::scan_templates(&text, path);
                        let mut supplemented = false;
                        for candidate in plucked {
                            let covered = templates.iter().any(|existing| {
                                existing.content_span.overlaps(&candidate.content_span)
                            });
                            if !covered {
                                templates.push(candidate);
                                supplemented = true;
                            }
                        }
                        if supplemented {
                            outcome.pluck_fallback = true;
                        }
                        templates
                    } else {
                        parsed.templates
                    }
                },
                Err(err) => {
                    log::debug!(
                        "Host parse of {} failed ({err}); falling back to \
                        text scan.",
                        path.display(),
                    );
                    outcome.pluck_fallback = true;
                    outcome.scanned = true;
                    template_scanner::scan_templates(&text, path)
                },
            },
        };

        let mut templates = templates;
        templates.sort_by_key(|template| template.content_span.start);

        let root = self.config.root.as_path();
        let relative = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");

        let mut definition_counter = 0usize;
        for template in &templates {
            self.build_records(
                path,
                &relative,
                template,
                table,
                &mut definition_counter,
                &mut outcome,
            );
        }
        outcome
    }

    fn build_records(
        &self,
        path: &Path,
        relative: &str,
        template: &RawTemplate,
        table: &FragmentTable,
        definition_counter: &mut usize,
        outcome: &mut FileOutcome,
    ) {
        let normalized = normalize::normalize_template(template);
        let doc = match ast::query::parse(&normalized.normalized) {
            Ok(doc) => doc,
            Err(err) => {
                outcome.errors.push(ExtractionError::at(
                    path,
                    format!("embedded GraphQL failed to parse: {err}"),
                    template.position.line,
                    template.position.col,
                ));
                return;
            },
        };

        for fragment in fragment_resolver::fragments_in_document(&doc, path) {
            table.insert_if_absent(fragment);
        }

        let operation_defs: Vec<&OperationDefinition<'static, String>> = doc
            .definitions
            .iter()
            .filter_map(|def| match def {
                Definition::Operation(op) => Some(op),
                Definition::Fragment(_) => None,
            })
            .collect();
        let single_operation = operation_defs.len() == 1;

        for (template_index, op_def) in operation_defs.into_iter().enumerate() {
            let index = *definition_counter;
            *definition_counter += 1;

            let name = operation_name(op_def, normalized.name_template.as_deref());
            let kind = operation_kind(op_def);
            let id = format!("{relative}:{index}:{}", id_slug(&name));

            // The template's first operation carries the full normalized
            // text and the byte mapping (a transformation of it rewrites
            // the whole template, later operations included). Further
            // operations in the same template get a per-operation subset
            // document for analysis and fingerprinting, but no mapping:
            // splicing a subset back would drop the template's other
            // operations, so applying them fails loudly instead.
            let mapped = single_operation || template_index == 0;
            let record_text = if mapped {
                normalized.normalized.clone()
            } else {
                subset_document(&doc, op_def).to_string()
            };
            let record_doc = match ast::query::parse(&record_text) {
                Ok(doc) => doc,
                Err(err) => {
                    outcome.errors.push(ExtractionError::at(
                        path,
                        format!("operation `{id}` failed to re-parse: {err}"),
                        template.position.line,
                        template.position.col,
                    ));
                    continue;
                },
            };

            let operation = ExtractedOperation {
                directives: operation_directives(op_def),
                file: path.to_path_buf(),
                fragment_refs: fragment_resolver::unresolved_fragment_refs(&record_doc),
                id: id.clone(),
                interpolations: normalized.interpolations.clone(),
                kind,
                name,
                normalized: record_text,
                position: definition_position(template, op_def),
                source: template.content.clone(),
                variables: operation_variables(op_def),
            };
            let mapping = mapped.then(|| SourceMapping {
                file: path.to_path_buf(),
                interpolations: normalized.interpolations.clone(),
                operation_id: id,
                original: template.content.clone(),
                span: template.content_span,
            });
            outcome.operations.push((operation, mapping));
        }
    }

    fn expand_all_variants(&self, result: &mut ExtractionResult, table: &FragmentTable) {
        let mut unified: IndexMap<String, VariantSwitch> = IndexMap::new();
        let mut variants = vec![];
        let mut errors = vec![];

        for operation in &result.queries {
            let switches = variant_expander::detect_switches(operation, table);
            if switches.is_empty() {
                continue;
            }
            for switch in &switches {
                unified
                    .entry(switch.name.clone())
                    .or_insert_with(|| VariantSwitch {
                        kind: SwitchKind::Boolean,
                        name: switch.name.clone(),
                        operations: vec![],
                    })
                    .operations
                    .push(operation.id().to_string());
            }
            variants.extend(variant_expander::expand_variants(
                operation,
                &switches,
                &mut errors,
            ));
        }

        result.variants = variants;
        result.errors.extend(errors);
        result.switches = unified.into_values().collect();
    }
}

fn operation_kind(op: &OperationDefinition<'static, String>) -> OperationKind {
    match op {
        OperationDefinition::Mutation(_) => OperationKind::Mutation,
        OperationDefinition::Query(_) | OperationDefinition::SelectionSet(_) => {
            OperationKind::Query
        },
        OperationDefinition::Subscription(_) => OperationKind::Subscription,
    }
}

fn operation_name(
    op: &OperationDefinition<'static, String>,
    name_template: Option<&str>,
) -> OperationName {
    let parsed_name = match op {
        OperationDefinition::SelectionSet(_) => None,
        OperationDefinition::Query(query) => query.name.as_deref(),
        OperationDefinition::Mutation(mutation) => mutation.name.as_deref(),
        OperationDefinition::Subscription(subscription) => subscription.name.as_deref(),
    };
    match (parsed_name, name_template) {
        // The parsed name is the name-slot placeholder token; surface the
        // original dynamic template instead.
        (Some(name), Some(template)) if is_placeholder(name) => {
            OperationName::Pattern(template.to_string())
        },
        (Some(name), _) => OperationName::Static(name.to_string()),
        (None, _) => OperationName::Anonymous,
    }
}

fn is_placeholder(name: &str) -> bool {
    name.strip_prefix("__v")
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

fn id_slug(name: &OperationName) -> String {
    match name {
        OperationName::Anonymous => "anon".to_string(),
        OperationName::Static(name) => name.clone(),
        OperationName::Pattern(template) => template
            .trim_start_matches("${")
            .trim_end_matches('}')
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '.' || *ch == '_')
            .collect(),
    }
}

fn operation_variables(op: &OperationDefinition<'static, String>) -> Vec<VariableInfo> {
    let var_defs = match op {
        OperationDefinition::SelectionSet(_) => return vec![],
        OperationDefinition::Query(query) => &query.variable_definitions,
        OperationDefinition::Mutation(mutation) => &mutation.variable_definitions,
        OperationDefinition::Subscription(subscription) => {
            &subscription.variable_definitions
        },
    };
    var_defs.iter().map(VariableInfo::from_ast).collect()
}

fn operation_directives(op: &OperationDefinition<'static, String>) -> Vec<String> {
    let directives = match op {
        OperationDefinition::SelectionSet(_) => return vec![],
        OperationDefinition::Query(query) => &query.directives,
        OperationDefinition::Mutation(mutation) => &mutation.directives,
        OperationDefinition::Subscription(subscription) => &subscription.directives,
    };
    directives.iter().map(|directive| directive.name.clone()).collect()
}

/// Line/column of an operation definition within its file, derived from
/// its position inside the normalized text offset by the template's own
/// file position.
fn definition_position(
    template: &RawTemplate,
    op: &OperationDefinition<'static, String>,
) -> loc::FilePosition {
    let pos = match op {
        OperationDefinition::SelectionSet(set) => set.span.0,
        OperationDefinition::Query(query) => query.position,
        OperationDefinition::Mutation(mutation) => mutation.position,
        OperationDefinition::Subscription(subscription) => subscription.position,
    };
    let line = template.position.line + pos.line - 1;
    let col = if pos.line == 1 {
        template.position.col + pos.column - 1
    } else {
        pos.column
    };
    loc::FilePosition {
        col,
        file: template.position.file.clone(),
        line,
    }
}

/// A document containing just `target` plus every fragment definition of
/// the original document.
fn subset_document(
    doc: &ast::query::Document,
    target: &OperationDefinition<'static, String>,
) -> ast::query::Document {
    let mut definitions = vec![Definition::Operation(target.clone())];
    for def in &doc.definitions {
        if let Definition::Fragment(fragment) = def {
            definitions.push(Definition::Fragment(fragment.clone()));
        }
    }
    ast::query::Document { definitions }
}
