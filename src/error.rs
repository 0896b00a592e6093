use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    /// The root, a directory below it, or a candidate file could not be read.
    #[error("cannot read {}", .path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AuditError {
    pub fn file_system(path: impl Into<PathBuf>, source: io::Error) -> Self {
        AuditError::FileSystem {
            path: path.into(),
            source,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            AuditError::FileSystem { path, .. } => path,
        }
    }
}

impl From<walkdir::Error> for AuditError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
        let source = match err.into_io_error() {
            Some(io_err) => io_err,
            None => io::Error::other("filesystem loop detected"),
        };
        AuditError::FileSystem { path, source }
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;
