//! # Files Module
//!
//! The file-access capability injected into house loading and save-game
//! handling, plus the file-name rules shared by both.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::rc::Rc;

/// Blocking text-file access by path.
///
/// The game never touches the filesystem directly; everything goes through
/// this capability so tests can run against an in-memory store.
pub trait FileAccess {
    /// Whether a file exists at `path`.
    fn exists(&self, path: &str) -> bool;

    /// Reads the full contents of the file at `path`.
    fn read_text(&self, path: &str) -> io::Result<String>;

    /// Writes `contents` to `path`, replacing any existing file.
    fn write_text(&mut self, path: &str, contents: &str) -> io::Result<()>;

    /// Deletes the file at `path`.
    fn delete(&mut self, path: &str) -> io::Result<()>;
}

/// File access backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileAccess;

impl FileAccess for StdFileAccess {
    fn exists(&self, path: &str) -> bool {
        std::path::Path::new(path).exists()
    }

    fn read_text(&self, path: &str) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write_text(&mut self, path: &str, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn delete(&mut self, path: &str) -> io::Result<()> {
        std::fs::remove_file(path)
    }
}

/// In-memory file access for tests and scripted sessions.
///
/// Clones share the same backing store, so a test can keep a handle to the
/// files a game controller writes.
///
/// # Examples
///
/// ```
/// use hideseek::{FileAccess, MemoryFileAccess};
///
/// let mut files = MemoryFileAccess::new();
/// let handle = files.clone();
/// files.write_text("save.json", "{}").unwrap();
/// assert!(handle.exists("save.json"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFileAccess {
    files: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryFileAccess {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files currently stored.
    pub fn len(&self) -> usize {
        self.files.borrow().len()
    }

    /// Whether the store holds no files.
    pub fn is_empty(&self) -> bool {
        self.files.borrow().is_empty()
    }
}

impl FileAccess for MemoryFileAccess {
    fn exists(&self, path: &str) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn read_text(&self, path: &str) -> io::Result<String> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.to_string()))
    }

    fn write_text(&mut self, path: &str, contents: &str) -> io::Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_string(), contents.to_string());
        Ok(())
    }

    fn delete(&mut self, path: &str) -> io::Result<()> {
        self.files
            .borrow_mut()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.to_string()))
    }
}

/// Whether `name` is usable as a layout or save-game file name: non-empty,
/// with no backslashes, forward slashes, or whitespace.
///
/// # Examples
///
/// ```
/// use hideseek::is_valid_file_name;
///
/// assert!(is_valid_file_name("my_saved_game"));
/// assert!(!is_valid_file_name(""));
/// assert!(!is_valid_file_name("saves/latest"));
/// assert!(!is_valid_file_name("my saved game"));
/// ```
pub fn is_valid_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c == '\\' || c == '/' || c.is_whitespace())
}

/// Appends the save-file extension: `"house"` becomes `"house.json"`.
pub fn with_json_extension(name: &str) -> String {
    format!("{}.{}", name, crate::config::SAVE_FILE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_validity() {
        assert!(is_valid_file_name("DefaultHouse"));
        assert!(is_valid_file_name("save-2.v1"));
        assert!(!is_valid_file_name(""));
        assert!(!is_valid_file_name(" "));
        assert!(!is_valid_file_name("a\\b"));
        assert!(!is_valid_file_name("a/b"));
        assert!(!is_valid_file_name("a b"));
        assert!(!is_valid_file_name("a\tb"));
    }

    #[test]
    fn test_with_json_extension() {
        assert_eq!(with_json_extension("DefaultHouse"), "DefaultHouse.json");
    }

    #[test]
    fn test_memory_file_access_round_trip() {
        let mut files = MemoryFileAccess::new();
        assert!(!files.exists("a.json"));

        files.write_text("a.json", "contents").unwrap();
        assert!(files.exists("a.json"));
        assert_eq!(files.read_text("a.json").unwrap(), "contents");

        files.delete("a.json").unwrap();
        assert!(!files.exists("a.json"));
        assert!(files.is_empty());
    }

    #[test]
    fn test_memory_file_access_missing_file_errors() {
        let mut files = MemoryFileAccess::new();
        assert!(files.read_text("missing.json").is_err());
        assert!(files.delete("missing.json").is_err());
    }

    #[test]
    fn test_memory_file_access_clones_share_store() {
        let mut files = MemoryFileAccess::new();
        let handle = files.clone();
        files.write_text("shared.json", "x").unwrap();
        assert!(handle.exists("shared.json"));
        assert_eq!(handle.len(), 1);
    }
}
