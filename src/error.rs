use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Format,
    Permission,
    Io,
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Name field is required.")]
    MissingName,

    #[error("Invalid desktop entry file: Missing [Desktop Entry] section")]
    MissingSection,

    #[error("Cannot create directory: {}. Permission denied.", .0.display())]
    CreateDirDenied(PathBuf),

    #[error("Cannot write to {}. Permission denied.", .0.display())]
    WriteDenied(PathBuf),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl EditorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EditorError::MissingName => ErrorKind::Validation,
            EditorError::MissingSection => ErrorKind::Format,
            EditorError::CreateDirDenied(_) | EditorError::WriteDenied(_) => ErrorKind::Permission,
            EditorError::Io { .. } => ErrorKind::Io,
        }
    }

    /// Maps a failed `create_dir_all` on `dir`.
    pub fn create_dir(dir: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::PermissionDenied => EditorError::CreateDirDenied(dir.to_path_buf()),
            _ => EditorError::Io { path: dir.to_path_buf(), source },
        }
    }

    /// Maps a failed write or chmod of `path`.
    pub fn write(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::PermissionDenied => EditorError::WriteDenied(path.to_path_buf()),
            _ => EditorError::Io { path: path.to_path_buf(), source },
        }
    }

    pub fn read(path: &Path, source: io::Error) -> Self {
        EditorError::Io { path: path.to_path_buf(), source }
    }
}
