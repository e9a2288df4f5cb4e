use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DocumentError {
    fn io(action: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> Self + use<> {
        let path = path.to_path_buf();
        move |source| Self::Io {
            action,
            path,
            source,
        }
    }
}

pub fn read_document(path: &Path) -> Result<String, DocumentError> {
    std::fs::read_to_string(path).map_err(DocumentError::io("read", path))
}

/// Directory a document's temporary sibling is created in
fn parent_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}

/// Replace the file at `path` with `contents`
///
/// The text is written to a temporary file next to `path` and persisted over
/// it. The temporary file is removed if any step fails, so a failed write
/// leaves neither a half-written document nor stray files.
pub fn write_document_atomic(path: &Path, contents: &str) -> Result<(), DocumentError> {
    let dir = parent_dir(path);
    let mut temp = NamedTempFile::new_in(dir)
        .map_err(DocumentError::io("create a temporary file in", dir))?;

    temp.write_all(contents.as_bytes())
        .map_err(DocumentError::io("write", temp.path()))?;
    temp.flush().map_err(DocumentError::io("flush", temp.path()))?;

    temp.persist(path)
        .map_err(|err| DocumentError::io("replace", path)(err.error))?;
    Ok(())
}
