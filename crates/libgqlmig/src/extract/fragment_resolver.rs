use crate::ast;
use crate::extract::ExtractionError;
use crate::loc;
use crate::operation::ExtractedFragment;
use graphql_parser::query::Definition;
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::path::Path;
use walkdir::WalkDir;

const FRAGMENT_FILE_EXTS: &[&str] = &["gql", "graphql"];

/// Shared table of known fragments, filled concurrently while files are
/// scanned. Insert-if-absent: fragment content is expected to be stable,
/// so the first registration wins and later duplicates are dropped.
#[derive(Debug, Default)]
pub(crate) struct FragmentTable {
    fragments: Mutex<IndexMap<String, ExtractedFragment>>,
}
impl FragmentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_if_absent(&self, fragment: ExtractedFragment) {
        let mut fragments = self.fragments.lock();
        if !fragments.contains_key(&fragment.name) {
            fragments.insert(fragment.name.clone(), fragment);
        }
    }

    pub fn get(&self, name: &str) -> Option<ExtractedFragment> {
        self.fragments.lock().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fragments.lock().contains_key(name)
    }

    pub fn into_fragments(self) -> Vec<ExtractedFragment> {
        self.fragments.into_inner().into_values().collect()
    }

    /// Loads standalone fragment files from a configured directory.
    /// Returns per-file errors; the table keeps whatever loaded cleanly.
    pub fn load_dir(&self, dir: &Path) -> Vec<ExtractionError> {
        let mut errors = vec![];
        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    errors.push(ExtractionError::new(
                        dir,
                        format!("failed to walk fragments dir: {err}"),
                    ));
                    continue;
                },
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let ext = path.extension().and_then(|ext| ext.to_str());
            if !ext.is_some_and(|ext| FRAGMENT_FILE_EXTS.contains(&ext)) {
                continue;
            }

            let content = match crate::file_reader::read_content(path) {
                Ok(content) => content,
                Err(err) => {
                    errors.push(ExtractionError::new(path, err.to_string()));
                    continue;
                },
            };
            match ast::query::parse(&content) {
                Ok(doc) => {
                    for fragment in fragments_in_document(&doc, path) {
                        self.insert_if_absent(fragment);
                    }
                },
                Err(err) => {
                    errors.push(ExtractionError::new(
                        path,
                        format!("fragment file failed to parse: {err}"),
                    ));
                },
            }
        }
        errors
    }
}

/// Extracts every fragment definition in `doc` as a standalone record,
/// serialized back to text so each fragment is independently parseable.
pub(crate) fn fragments_in_document(
    doc: &ast::query::Document,
    file: &Path,
) -> Vec<ExtractedFragment> {
    let mut fragments = vec![];
    for def in &doc.definitions {
        if let Definition::Fragment(fragment) = def {
            let graphql_parser::query::TypeCondition::On(type_condition) =
                &fragment.type_condition;
            let rendered = ast::query::Document {
                definitions: vec![Definition::Fragment(fragment.clone())],
            };
            fragments.push(ExtractedFragment {
                file: file.to_path_buf(),
                name: fragment.name.clone(),
                position: loc::FilePosition::from_pos(Some(file), fragment.position),
                source: rendered.to_string(),
                type_condition: type_condition.clone(),
            });
        }
    }
    fragments
}

/// Names of fragments spread in `doc` but not defined in it.
pub(crate) fn unresolved_fragment_refs(doc: &ast::query::Document) -> Vec<String> {
    let mut defined = HashSet::new();
    for def in &doc.definitions {
        if let Definition::Fragment(fragment) = def {
            defined.insert(fragment.name.clone());
        }
    }

    let mut refs = vec![];
    let mut seen = HashSet::new();
    for def in &doc.definitions {
        let selection_set = match def {
            Definition::Operation(op) => operation_selection_set(op),
            Definition::Fragment(fragment) => &fragment.selection_set,
        };
        collect_spreads(selection_set, &defined, &mut seen, &mut refs);
    }
    refs
}

fn operation_selection_set(
    op: &ast::query::OperationDefinition,
) -> &ast::query::SelectionSet {
    use graphql_parser::query::OperationDefinition::*;
    match op {
        SelectionSet(set) => set,
        Query(query) => &query.selection_set,
        Mutation(mutation) => &mutation.selection_set,
        Subscription(subscription) => &subscription.selection_set,
    }
}

fn collect_spreads(
    set: &ast::query::SelectionSet,
    defined: &HashSet<String>,
    seen: &mut HashSet<String>,
    out: &mut Vec<String>,
) {
    use graphql_parser::query::Selection::*;
    for selection in &set.items {
        match selection {
            Field(field) => collect_spreads(&field.selection_set, defined, seen, out),
            FragmentSpread(spread) => {
                if !defined.contains(&spread.fragment_name)
                    && seen.insert(spread.fragment_name.clone()) {
                    out.push(spread.fragment_name.clone());
                }
            },
            InlineFragment(inline) => {
                collect_spreads(&inline.selection_set, defined, seen, out)
            },
        }
    }
}

/// Appends resolved fragment text (transitively) to a normalized document
/// that spreads fragments it does not define.
pub(crate) fn inline_fragments(
    normalized: &str,
    refs: &[String],
    table: &FragmentTable,
) -> String {
    let mut result = normalized.to_string();
    let mut pending: Vec<String> = refs.to_vec();
    let mut inlined = HashSet::new();

    while let Some(name) = pending.pop() {
        if !inlined.insert(name.clone()) {
            continue;
        }
        let Some(fragment) = table.get(&name) else {
            continue;
        };
        result.push('\n');
        result.push_str(fragment.source.trim_end());
        result.push('\n');

        // A fragment may itself spread other fragments.
        if let Ok(doc) = ast::query::parse(&fragment.source) {
            pending.extend(unresolved_fragment_refs(&doc));
        }
    }

    result
}
