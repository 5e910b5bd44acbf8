use crate::byte_span::ByteSpan;
use crate::extract::RawSubstitution;
use crate::extract::RawTemplate;
use crate::extract::template_scanner::KNOWN_TAGS;
use crate::loc;
use std::path::Path;
use thiserror::Error;
use tree_sitter::Node;
use tree_sitter::Parser;

#[derive(Debug, Error)]
pub(crate) enum SourceParseError {
    #[error("failed to load host grammar: {0}")]
    Language(String),

    #[error("host-language parse produced no syntax tree")]
    NoTree,
}

/// Host-AST parse output. `has_errors` reports error-recovery nodes in
/// the syntax tree; the hybrid strategy uses it to decide whether a text
/// scan should supplement these results.
#[derive(Debug)]
pub(crate) struct ParsedTemplates {
    pub has_errors: bool,
    pub templates: Vec<RawTemplate>,
}

/// Host-AST template locator. Parses the file with the TypeScript grammar
/// (TSX grammar for `.tsx`/`.jsx`) and walks for call expressions whose
/// callee is a known GraphQL tag; the grammar represents both
/// ``gql`...` `` and `` gql(`...`) `` as `call_expression` nodes.
pub(crate) fn parse_templates(
    text: &str,
    file: &Path,
) -> Result<ParsedTemplates, SourceParseError> {
    let mut parser = Parser::new();
    let language = match file.extension().and_then(|ext| ext.to_str()) {
        Some("tsx") | Some("jsx") => tree_sitter_typescript::LANGUAGE_TSX,
        _ => tree_sitter_typescript::LANGUAGE_TYPESCRIPT,
    };
    parser
        .set_language(&language.into())
        .map_err(|err| SourceParseError::Language(err.to_string()))?;

    let tree = parser.parse(text, None).ok_or(SourceParseError::NoTree)?;

    let mut templates = vec![];
    collect_templates(tree.root_node(), text, file, &mut templates);
    Ok(ParsedTemplates {
        has_errors: tree.root_node().has_error(),
        templates,
    })
}

fn collect_templates(
    node: Node<'_>,
    text: &str,
    file: &Path,
    out: &mut Vec<RawTemplate>,
) {
    if node.kind() == "call_expression"
        && let Some(tag) = call_tag(node, text)
        && let Some(template) = template_argument(node)
        && let Some(raw) = capture_template(template, text, file, &tag) {
        out.push(raw);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_templates(child, text, file, out);
    }
}

/// Resolves a call expression's callee to a known tag identifier,
/// accepting plain identifiers and member expressions (`Apollo.gql`).
fn call_tag(node: Node<'_>, text: &str) -> Option<String> {
    let function = node.child_by_field_name("function")?;
    let name_node = match function.kind() {
        "identifier" => function,
        "member_expression" => function.child_by_field_name("property")?,
        _ => return None,
    };
    let name = name_node.utf8_text(text.as_bytes()).ok()?;
    if KNOWN_TAGS.contains(&name) {
        Some(name.to_string())
    } else {
        None
    }
}

/// The template literal carrying the GraphQL text: either the tagged
/// template's `arguments` node directly, or the first template argument of
/// a call form.
fn template_argument<'tree>(node: Node<'tree>) -> Option<Node<'tree>> {
    let arguments = node.child_by_field_name("arguments")?;
    match arguments.kind() {
        "template_string" => Some(arguments),
        "arguments" => {
            let mut cursor = arguments.walk();
            let template = arguments
                .named_children(&mut cursor)
                .find(|child| child.kind() == "template_string");
            template
        },
        _ => None,
    }
}

fn capture_template(
    template: Node<'_>,
    text: &str,
    file: &Path,
    tag: &str,
) -> Option<RawTemplate> {
    // Exclude the enclosing backticks from the captured span.
    let content_start = template.start_byte() + 1;
    let content_end = template.end_byte().checked_sub(1)?;
    if content_end < content_start {
        return None;
    }

    let mut substitutions = vec![];
    let mut cursor = template.walk();
    for child in template.named_children(&mut cursor) {
        if child.kind() != "template_substitution" {
            continue;
        }
        let expression = child
            .named_child(0)
            .and_then(|expr| expr.utf8_text(text.as_bytes()).ok())
            .unwrap_or_default();
        substitutions.push(RawSubstitution {
            expression: expression.to_string(),
            span: ByteSpan::new(
                child.start_byte() - content_start,
                child.end_byte() - content_start,
            ),
        });
    }

    Some(RawTemplate {
        content: text[content_start..content_end].to_string(),
        content_span: ByteSpan::new(content_start, content_end),
        position: loc::FilePosition::from_offset(Some(file), text, content_start),
        substitutions,
        tag: tag.to_string(),
    })
}
