use std::path::Path;
use std::path::PathBuf;

/// Very similar to graphql_parser's [Pos](graphql_parser::Pos), except it
/// includes a PathBuf to the file. Both `line` and `col` are 1-based.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FilePosition {
    pub col: usize,
    pub file: Option<PathBuf>,
    pub line: usize,
}
impl FilePosition {
    pub(crate) fn from_pos<P: AsRef<Path>>(
        file: Option<P>,
        pos: graphql_parser::Pos,
    ) -> Self {
        Self {
            col: pos.column,
            file: file.map(|f| f.as_ref().to_path_buf()),
            line: pos.line,
        }
    }

    /// Computes the line/column position of a byte offset within `text`.
    pub(crate) fn from_offset<P: AsRef<Path>>(
        file: Option<P>,
        text: &str,
        offset: usize,
    ) -> Self {
        let clamped = offset.min(text.len());
        let mut line = 1;
        let mut line_start = 0;
        for (idx, byte) in text.as_bytes()[..clamped].iter().enumerate() {
            if *byte == b'\n' {
                line += 1;
                line_start = idx + 1;
            }
        }
        Self {
            col: clamped - line_start + 1,
            file: file.map(|f| f.as_ref().to_path_buf()),
            line,
        }
    }
}
