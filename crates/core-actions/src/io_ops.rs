//! File load/save helpers.
//!
//! Loading accepts `\n` and `\r\n` line endings and produces a clean
//! document. Saving always writes `\n` after every line, truncating the file
//! to the exact serialized length before writing it.

use core_state::EditorState;
use core_text::{Document, split_lines};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("no file name")]
    NoFileName,
    #[error("can't open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("can't read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("can't truncate {}: {source}", path.display())]
    Truncate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("can't write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    /// Underlying OS error, when there is one.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            FileError::NoFileName => None,
            FileError::Open { source, .. }
            | FileError::Read { source, .. }
            | FileError::Truncate { source, .. }
            | FileError::Write { source, .. } => Some(source),
        }
    }
}

/// Read `path` into a fresh, clean document.
pub fn load_file(path: &Path, tab_stop: usize) -> Result<Document, FileError> {
    let content = std::fs::read(path).map_err(|source| {
        tracing::error!(target: "io", path = %path.display(), error = %source, "file_read_error");
        FileError::Read {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let lines = split_lines(&content);
    tracing::info!(
        target: "io",
        path = %path.display(),
        bytes = content.len(),
        lines = lines.len(),
        "file_loaded"
    );
    Ok(Document::from_lines(lines, tab_stop))
}

fn open_for_save(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.read(true).write(true).create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    options.open(path)
}

/// Write the serialized document to `path`. Returns the byte count written.
pub fn save_file(path: &Path, document: &Document) -> Result<usize, FileError> {
    let bytes = document.to_bytes();
    let mut file = open_for_save(path).map_err(|source| FileError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    file.set_len(bytes.len() as u64)
        .map_err(|source| FileError::Truncate {
            path: path.to_path_buf(),
            source,
        })?;
    file.write_all(&bytes)
        .and_then(|()| file.flush())
        .map_err(|source| FileError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(bytes.len())
}

/// Save the document to its associated file and mark it clean on success.
/// A failure leaves the dirty flag untouched.
pub fn save(state: &mut EditorState) -> Result<usize, FileError> {
    let path = state.file_name.clone().ok_or(FileError::NoFileName)?;
    match save_file(&path, &state.document) {
        Ok(n) => {
            state.document.mark_clean();
            tracing::info!(target: "io", path = %path.display(), bytes = n, "file_saved");
            Ok(n)
        }
        Err(e) => {
            tracing::error!(target: "io", error = %e, "file_save_error");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_strips_crlf_and_final_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crlf.txt");
        std::fs::write(&path, b"a\r\nb\r\n").unwrap();
        let doc = load_file(&path, 2).unwrap();
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.line(0).unwrap().as_bytes(), b"a");
        assert_eq!(doc.line(1).unwrap().as_bytes(), b"b");
        assert!(!doc.is_dirty());
    }

    #[test]
    fn load_missing_file_reports_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("nope"), 2).unwrap_err();
        assert!(matches!(err, FileError::Read { .. }));
        assert!(err.io_error().is_some());
    }

    #[test]
    fn save_truncates_longer_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, b"a much longer previous body\n").unwrap();
        let doc = Document::from_lines(["hi"], 2);
        assert_eq!(save_file(&path, &doc).unwrap(), 3);
        assert_eq!(std::fs::read(&path).unwrap(), b"hi\n");
    }

    #[test]
    fn save_without_name_fails() {
        let mut st = EditorState::new(Document::from_lines(["x"], 2));
        assert!(matches!(save(&mut st), Err(FileError::NoFileName)));
    }

    #[test]
    fn save_clears_dirty_flag() {
        let dir = tempfile::tempdir().unwrap();
        let mut st = EditorState::new(Document::default());
        st.document.insert_line(0, "x");
        st.file_name = Some(dir.path().join("f.txt"));
        assert!(st.dirty());
        assert_eq!(save(&mut st).unwrap(), 2);
        assert!(!st.dirty());
    }

    #[test]
    fn failed_save_keeps_dirty_flag() {
        let dir = tempfile::tempdir().unwrap();
        let mut st = EditorState::new(Document::default());
        st.document.insert_line(0, "x");
        st.file_name = Some(dir.path().join("missing-dir").join("f.txt"));
        let err = save(&mut st).unwrap_err();
        assert!(matches!(err, FileError::Open { .. }));
        assert!(st.dirty());
    }

    #[cfg(unix)]
    #[test]
    fn new_file_gets_0644() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mode.txt");
        save_file(&path, &Document::from_lines(["m"], 2)).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        // umask can only remove bits
        assert_eq!(mode & !0o644, 0);
    }
}
