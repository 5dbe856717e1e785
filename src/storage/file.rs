//! File-backed key-value store (native only).

use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError};

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default data directory: `<data_dir>/keepsake`, falling back to
    /// `~/.local/share/keepsake`.
    pub fn default_dir() -> Option<PathBuf> {
        if let Some(data_dir) = dirs::data_dir() {
            Some(data_dir.join("keepsake"))
        } else {
            dirs::home_dir().map(|home| home.join(".local").join("share").join("keepsake"))
        }
    }

    /// Directory holding the stored files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are plain identifiers; keep anything path-like out of the file name
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", file_name))
    }
}

impl KeyValueStore for FileStore {
    fn read_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No stored value at {:?}", path);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write_raw(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);

        // Write to a sibling temp file first so a crash never leaves a truncated collection
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        log::debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "keepsake-file-store-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_missing_key_reads_none() {
        let store = FileStore::new(temp_dir("missing"));
        assert_eq!(store.read_raw("photos").unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let dir = temp_dir("write");
        let mut store = FileStore::new(&dir);
        store.write_raw("photos", "[]").unwrap();
        store.write_raw("photos", "[1]").unwrap();

        assert_eq!(store.read_raw("photos").unwrap().as_deref(), Some("[1]"));
        assert!(dir.join("photos.json").exists());
        assert!(!dir.join("photos.json.tmp").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_key_is_sanitized() {
        let store = FileStore::new("/tmp/x");
        assert_eq!(
            store.path_for("../evil/key"),
            PathBuf::from("/tmp/x/.._evil_key.json")
        );
    }
}
