use std::path::Path;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, FileAccessError>;

pub fn read_content<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let file_path = file_path.as_ref();
    if !file_path.is_file() {
        return Err(FileAccessError::PathIsNotAFile(file_path.to_path_buf()));
    }

    let bytes = std::fs::read(file_path)
        .map_err(|err| FileAccessError::FileReadError {
            file_path: file_path.to_path_buf(),
            err,
        })?;

    let content = String::from_utf8(bytes)
        .map_err(|err| FileAccessError::FileDecodeError {
            file_path: file_path.to_path_buf(),
            err,
        })?;

    Ok(content)
}

/// Writes `content` back to `file_path` verbatim. Used by the code
/// applicator outside of dry-run mode.
pub fn write_content<P: AsRef<Path>>(file_path: P, content: &str) -> Result<()> {
    let file_path = file_path.as_ref();
    std::fs::write(file_path, content.as_bytes())
        .map_err(|err| FileAccessError::FileWriteError {
            file_path: file_path.to_path_buf(),
            err,
        })
}

#[derive(Debug)]
pub enum FileAccessError {
    FileDecodeError {
        file_path: PathBuf,
        err: std::string::FromUtf8Error,
    },

    FileReadError {
        file_path: PathBuf,
        err: std::io::Error,
    },

    FileWriteError {
        file_path: PathBuf,
        err: std::io::Error,
    },

    PathIsNotAFile(PathBuf),
}
impl std::fmt::Display for FileAccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileDecodeError { file_path, err } =>
                write!(f, "{} is not valid utf8: {err}", file_path.display()),
            Self::FileReadError { file_path, err } =>
                write!(f, "failed to read {}: {err}", file_path.display()),
            Self::FileWriteError { file_path, err } =>
                write!(f, "failed to write {}: {err}", file_path.display()),
            Self::PathIsNotAFile(file_path) =>
                write!(f, "{} is not a file", file_path.display()),
        }
    }
}
impl std::error::Error for FileAccessError {}
impl std::cmp::PartialEq for FileAccessError {
    fn eq(&self, other: &Self) -> bool {
        use FileAccessError::*;
        match (&*self, &*other) {
            (FileDecodeError {
                file_path: self_file_path,
                err: self_err,
            }, FileDecodeError {
                file_path: other_file_path,
                err: other_err,
            }) => {
                self_file_path.eq(other_file_path)
                && self_err.eq(other_err)
            },

            (FileReadError {
                file_path: self_file_path,
                err: self_err,
            }, FileReadError {
                file_path: other_file_path,
                err: other_err,
            }) => {
                self_file_path == other_file_path
                && self_err.kind() == other_err.kind()
            },

            (FileWriteError {
                file_path: self_file_path,
                err: self_err,
            }, FileWriteError {
                file_path: other_file_path,
                err: other_err,
            }) => {
                self_file_path == other_file_path
                && self_err.kind() == other_err.kind()
            },

            (PathIsNotAFile(self_path), PathIsNotAFile(other_path)) => {
                self_path.eq(other_path)
            },

            _ => false,
        }
    }
}
