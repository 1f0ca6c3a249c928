//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{ExpenseError, ExpenseResult};

/// Open a file for reading, returning `None` if it doesn't exist
pub fn open_optional<P: AsRef<Path>>(path: P) -> ExpenseResult<Option<BufReader<File>>> {
    let path = path.as_ref();

    match File::open(path) {
        Ok(file) => Ok(Some(BufReader::new(file))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ExpenseError::Storage(format!(
            "Failed to open {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Temp file used while writing `path`, in the same directory
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("data"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write a file atomically (write to temp, then rename)
///
/// The file is either completely replaced or left untouched.
pub fn write_atomic<P, F>(path: P, write: F) -> ExpenseResult<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut dyn Write) -> ExpenseResult<()>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            ExpenseError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path);

    let file = File::create(&temp_path)
        .map_err(|e| ExpenseError::Storage(format!("Failed to create temp file: {}", e)))?;
    let mut writer = BufWriter::new(file);

    let written = write(&mut writer).and_then(|_| {
        writer
            .flush()
            .map_err(|e| ExpenseError::Storage(format!("Failed to flush data: {}", e)))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| ExpenseError::Storage(format!("Failed to sync data: {}", e)))
    });

    if let Err(e) = written {
        drop(writer);
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    drop(writer);

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ExpenseError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.csv");

        assert!(open_optional(&path).unwrap().is_none());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.csv");

        write_atomic(&path, |out| {
            out.write_all(b"hello")?;
            Ok(())
        })
        .unwrap();

        let mut contents = String::new();
        open_optional(&path)
            .unwrap()
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "hello");
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.csv");

        write_atomic(&path, |out| {
            out.write_all(b"data")?;
            Ok(())
        })
        .unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("test.csv.tmp").exists());
    }

    #[test]
    fn test_failed_write_keeps_original() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.csv");
        fs::write(&path, "original").unwrap();

        let result = write_atomic(&path, |out| {
            out.write_all(b"partial")?;
            Err(ExpenseError::Storage("boom".into()))
        });

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
        assert!(!temp_dir.path().join("test.csv.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("test.csv");

        write_atomic(&path, |_| Ok(())).unwrap();
        assert!(path.exists());
    }
}
