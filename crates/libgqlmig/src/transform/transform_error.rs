use crate::ast;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("transform input failed to parse: {0}")]
    Parse(#[from] ast::query::ParseError),
}
