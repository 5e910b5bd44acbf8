use crate::byte_span::ByteSpan;
use regex::Regex;
use std::sync::LazyLock;

static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap()
});
static MEMBER_ACCESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(?:\.[A-Za-z_$][A-Za-z0-9_$]*)+$").unwrap()
});
static FUNCTION_CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(?:\.[A-Za-z_$][A-Za-z0-9_$]*)*\s*\(.*\)$").unwrap()
});
static QUERY_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^queryNames(?:\.[A-Za-z_$][A-Za-z0-9_$]*|\[[^\]]+\])$").unwrap()
});

/// Classification of the expression inside one `${...}` template
/// substitution.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InterpolationKind {
    /// A ternary over a locally-determined switch expression. Drives
    /// variant enumeration.
    Conditional,
    FunctionCall,
    Identifier,
    MemberAccess,
    Other,
    /// A `queryNames.*` lookup. Matched against the pattern registry.
    QueryName,
}
impl InterpolationKind {
    /// Classifies a substitution expression from its source text.
    ///
    /// This intentionally recognizes only shallow, locally-decidable shapes.
    /// Anything requiring data-flow analysis lands in `Other` and the
    /// containing operation is extracted as a single non-variant record.
    pub fn classify(expression: &str) -> Self {
        let expression = expression.trim();
        if find_ternary_split(expression).is_some() {
            return Self::Conditional;
        }
        if QUERY_NAME_RE.is_match(expression) {
            return Self::QueryName;
        }
        if IDENTIFIER_RE.is_match(expression) {
            return Self::Identifier;
        }
        if MEMBER_ACCESS_RE.is_match(expression) {
            return Self::MemberAccess;
        }
        if FUNCTION_CALL_RE.is_match(expression) {
            return Self::FunctionCall;
        }
        Self::Other
    }
}

/// Where in the template an interpolation sits. Determines how the
/// placeholder is emitted during normalization and re-projected on apply.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InterpolationSlot {
    /// Top-level of the template, outside any selection braces. Typically a
    /// fragment document appended after the operation text.
    Document,
    /// Immediately after the `query`/`mutation`/`subscription` keyword.
    Name,
    /// Inside a selection set or argument list.
    Selection,
}

/// One `${...}` substitution captured from an embedded GraphQL template.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interpolation {
    /// The substitution expression without the `${` / `}` delimiters.
    pub expression: String,
    pub kind: InterpolationKind,
    /// The reserved `__v<N>` token standing in for this substitution in the
    /// normalized GraphQL text. Empty for `Document`-slot interpolations,
    /// which are dropped from the normalized text and re-appended on apply.
    pub placeholder: String,
    /// The raw substitution text, `${` / `}` included.
    pub raw: String,
    pub slot: InterpolationSlot,
    /// Span of `raw` relative to the start of the template content.
    pub span: ByteSpan,
}

/// Locates the `?` and `:` of a top-level ternary in `expression`,
/// returning their byte offsets. Quotes, parens, braces, brackets, and
/// nested ternaries are respected; optional-chaining `?.` is not a ternary.
pub(crate) fn find_ternary_split(expression: &str) -> Option<(usize, usize)> {
    let bytes = expression.as_bytes();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut question: Option<usize> = None;
    let mut ternary_nesting = 0usize;
    let mut idx = 0;
    while idx < bytes.len() {
        let byte = bytes[idx];
        if let Some(open) = quote {
            if byte == b'\\' {
                idx += 2;
                continue;
            }
            if byte == open {
                quote = None;
            }
            idx += 1;
            continue;
        }
        match byte {
            b'\'' | b'"' | b'`' => quote = Some(byte),
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b'?' if depth == 0 => {
                // `?.` and `??` are not conditional operators
                if bytes.get(idx + 1) == Some(&b'.') || bytes.get(idx + 1) == Some(&b'?') {
                    idx += 2;
                    continue;
                }
                if question.is_none() {
                    question = Some(idx);
                } else {
                    ternary_nesting += 1;
                }
            },
            b':' if depth == 0 => {
                if let Some(q) = question {
                    if ternary_nesting == 0 {
                        return Some((q, idx));
                    }
                    ternary_nesting -= 1;
                }
            },
            _ => {},
        }
        idx += 1;
    }
    None
}
