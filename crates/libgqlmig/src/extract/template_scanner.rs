use crate::byte_span::ByteSpan;
use crate::extract::RawSubstitution;
use crate::extract::RawTemplate;
use crate::loc;
use memchr::memchr;
use std::path::Path;

/// Tag identifiers that mark a template literal as GraphQL-bearing, in
/// both tagged-template (``gql`...` ``) and call (`` gql(`...`) ``) form,
/// including member-expression tags such as `Apollo.gql`.
pub(crate) const KNOWN_TAGS: &[&str] = &["GraphQL", "gql", "graphql"];

/// Text-scanning ("pluck") template locator. No host-language parsing:
/// tolerant of files the AST strategy rejects, at the cost of exactness.
pub(crate) fn scan_templates(text: &str, file: &Path) -> Vec<RawTemplate> {
    let bytes = text.as_bytes();
    let mut templates = vec![];
    let mut cursor = 0;

    while let Some(offset) = memchr(b'`', &bytes[cursor..]) {
        let tick = cursor + offset;
        let tag = match tag_before(text, tick) {
            Some(tag) => tag,
            None => {
                cursor = tick + 1;
                continue;
            },
        };

        let content_start = tick + 1;
        match scan_template_body(text, content_start) {
            Some((content_end, substitutions)) => {
                templates.push(RawTemplate {
                    content: text[content_start..content_end].to_string(),
                    content_span: ByteSpan::new(content_start, content_end),
                    position: loc::FilePosition::from_offset(
                        Some(file),
                        text,
                        content_start,
                    ),
                    substitutions,
                    tag,
                });
                cursor = content_end + 1;
            },
            None => {
                // Unterminated template; skip past the opening tick.
                cursor = tick + 1;
            },
        }
    }

    templates
}

/// Resolves the tag expression immediately preceding a backtick at
/// `tick`, accepting an optional open-paren for the call form. Returns the
/// tag's final identifier segment when it is a known GraphQL tag.
fn tag_before(text: &str, tick: usize) -> Option<String> {
    let bytes = text.as_bytes();
    let mut idx = tick;

    while idx > 0 && bytes[idx - 1].is_ascii_whitespace() {
        idx -= 1;
    }
    if idx > 0 && bytes[idx - 1] == b'(' {
        idx -= 1;
        while idx > 0 && bytes[idx - 1].is_ascii_whitespace() {
            idx -= 1;
        }
    }

    let word_end = idx;
    while idx > 0 {
        let byte = bytes[idx - 1];
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$' || byte == b'.' {
            idx -= 1;
        } else {
            break;
        }
    }
    if idx == word_end {
        return None;
    }

    let word = &text[idx..word_end];
    let segment = word.rsplit('.').next().unwrap_or(word);
    if KNOWN_TAGS.contains(&segment) {
        Some(segment.to_string())
    } else {
        None
    }
}

/// Scans from just past the opening backtick to the matching closing
/// backtick, collecting `${...}` substitutions along the way. Returns
/// `None` for unterminated templates.
fn scan_template_body(
    text: &str,
    content_start: usize,
) -> Option<(usize, Vec<RawSubstitution>)> {
    let bytes = text.as_bytes();
    let mut substitutions = vec![];
    let mut idx = content_start;

    while idx < bytes.len() {
        match bytes[idx] {
            b'\\' => idx += 2,
            b'`' => {
                return Some((idx, substitutions));
            },
            b'$' if bytes.get(idx + 1) == Some(&b'{') => {
                let close = matching_brace(bytes, idx + 2)?;
                substitutions.push(RawSubstitution {
                    expression: text[idx + 2..close].to_string(),
                    span: ByteSpan::new(
                        idx - content_start,
                        close + 1 - content_start,
                    ),
                });
                idx = close + 1;
            },
            _ => idx += 1,
        }
    }

    None
}

/// Finds the `}` matching an already-consumed `${`, starting at the first
/// byte of the expression. Braces nest; quoted strings are opaque.
fn matching_brace(bytes: &[u8], mut idx: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut quote: Option<u8> = None;

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
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            },
            _ => {},
        }
        idx += 1;
    }

    None
}
