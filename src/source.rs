//! Reading documents from the file system.
//!
//! Every regular file under a directory is one document. Directories are
//! walked recursively in sorted order so results never depend on the order
//! the file system lists entries in.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::errors::DocumentReadError;

/// All regular files below `dir`, sorted by path.
///
/// Symbolic links are skipped, whether they point at files or directories.
pub fn walk_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>, DocumentReadError> {
    let mut files = Vec::new();
    let mut pending = vec![dir.as_ref().to_path_buf()];

    while let Some(current) = pending.pop() {
        let entries = fs::read_dir(&current).map_err(|e| DocumentReadError::io(&current, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| DocumentReadError::io(&current, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| DocumentReadError::io(&path, e))?;

            if file_type.is_dir() {
                pending.push(path);
            } else if file_type.is_file() {
                files.push(path);
            } else {
                // symlinks and special files are not followed
                trace!(path = %path.display(), "skipping non-regular entry");
            }
        }
    }

    files.sort();
    trace!(dir = %dir.as_ref().display(), files = files.len(), "walked directory");
    Ok(files)
}

/// Read one document as text.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD instead of failing
/// the whole document.
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<String, DocumentReadError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| DocumentReadError::io(path, e))?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => Ok(String::from_utf8_lossy(e.as_bytes()).into_owned()),
    }
}

/// Documents of a directory, read lazily one at a time.
pub fn read_directory<P: AsRef<Path>>(
    dir: P,
) -> Result<impl Iterator<Item = Result<String, DocumentReadError>>, DocumentReadError> {
    Ok(walk_files(dir)?.into_iter().map(read_document))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_is_recursive_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("nested").join("c.txt"), "c").unwrap();

        let files = walk_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            names,
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("b.txt"),
                Path::new("nested").join("c.txt"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_skipped() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        fs::write(outside.path().join("linked.txt"), "linked").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        symlink(outside.path().join("linked.txt"), dir.path().join("file-link")).unwrap();
        symlink(outside.path(), dir.path().join("dir-link")).unwrap();

        let files = walk_files(dir.path()).unwrap();
        assert_eq!(files, vec![dir.path().join("a.txt")]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = walk_files(dir.path().join("nope"));
        assert!(matches!(result, Err(DocumentReadError::Io { .. })));
    }

    #[test]
    fn test_read_document_decodes_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        fs::write(&path, b"caf\xe9 free").unwrap();

        let text = read_document(&path).unwrap();
        assert!(text.ends_with(" free"));
        assert!(text.starts_with("caf"));
    }
}
