use crate::extract::RawTemplate;
use crate::operation::Interpolation;
use crate::operation::InterpolationKind;
use crate::operation::InterpolationSlot;
use regex::Regex;
use std::sync::LazyLock;

static OPERATION_KEYWORD_TAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^A-Za-z0-9_$])(?:query|mutation|subscription)\s*$").unwrap()
});

/// A template with every `${...}` substitution replaced by a reserved
/// placeholder, ready for the GraphQL parser.
#[derive(Clone, Debug)]
pub(crate) struct NormalizedTemplate {
    pub interpolations: Vec<Interpolation>,
    /// Raw text of the name-slot substitution, when the operation's name
    /// is dynamic.
    pub name_template: Option<String>,
    pub normalized: String,
}

/// Rewrites template content into parseable GraphQL.
///
/// Substitutions in name or selection position become `__v<N>` tokens
/// (valid GraphQL names, reserved by convention for re-projection).
/// Document-position substitutions, i.e. fragment documents appended
/// outside any selection braces, are dropped from the normalized text
/// and re-appended by the applicator.
pub(crate) fn normalize_template(raw: &RawTemplate) -> NormalizedTemplate {
    let content = raw.content.as_str();
    let mut interpolations = vec![];
    let mut name_template = None;
    let mut normalized = String::with_capacity(content.len());
    let mut brace_depth = 0usize;
    let mut cursor = 0usize;

    for (index, substitution) in raw.substitutions.iter().enumerate() {
        let segment = &content[cursor..substitution.span.start];
        brace_depth = advance_depth(brace_depth, segment);
        normalized.push_str(segment);

        let slot = if brace_depth > 0 {
            InterpolationSlot::Selection
        } else if OPERATION_KEYWORD_TAIL_RE.is_match(segment)
            || (segment.trim().is_empty()
                && OPERATION_KEYWORD_TAIL_RE.is_match(&normalized)) {
            InterpolationSlot::Name
        } else {
            InterpolationSlot::Document
        };

        let placeholder = match slot {
            InterpolationSlot::Document => String::new(),
            InterpolationSlot::Name | InterpolationSlot::Selection => {
                format!("__v{index}")
            },
        };
        normalized.push_str(&placeholder);

        let raw_text = &content[substitution.span.as_range()];
        if slot == InterpolationSlot::Name && name_template.is_none() {
            name_template = Some(raw_text.to_string());
        }

        interpolations.push(Interpolation {
            expression: substitution.expression.clone(),
            kind: InterpolationKind::classify(&substitution.expression),
            placeholder,
            raw: raw_text.to_string(),
            slot,
            span: substitution.span,
        });

        cursor = substitution.span.end;
    }

    normalized.push_str(&content[cursor..]);

    NormalizedTemplate {
        interpolations,
        name_template,
        normalized,
    }
}

fn advance_depth(mut depth: usize, segment: &str) -> usize {
    for byte in segment.bytes() {
        match byte {
            b'{' => depth += 1,
            b'}' => depth = depth.saturating_sub(1),
            _ => {},
        }
    }
    depth
}
