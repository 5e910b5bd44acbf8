use crate::byte_span::ByteSpan;
use crate::loc;

/// One `${...}` substitution found in a template, prior to classification.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct RawSubstitution {
    /// The expression text without the `${` / `}` delimiters.
    pub expression: String,
    /// Span of the full `${...}` text, relative to the template content
    /// start.
    pub span: ByteSpan,
}

/// A GraphQL-bearing template literal located in a source file, before
/// normalization. Produced by both the pluck scanner and the host-AST
/// parser.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct RawTemplate {
    /// Template content between the backticks, substitutions intact.
    pub content: String,
    /// Absolute span of `content` within the owning file's bytes.
    pub content_span: ByteSpan,
    /// Position of the template content start within the file.
    pub position: loc::FilePosition,
    pub substitutions: Vec<RawSubstitution>,
    /// The tag expression's final identifier (`gql`, `graphql`, ...).
    pub tag: String,
}
