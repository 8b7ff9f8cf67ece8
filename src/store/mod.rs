//! File-backed configuration store
//!
//! Every call reloads the file, so there is no cached state between calls.
//! Mutations are read-modify-write of the whole document:
//! 1. `read_all` loads the file, bootstrapping defaults when it is absent
//! 2. the path accessor edits the in-memory tree
//! 3. `write_all` backs up the existing file and rewrites it

pub mod backup;
pub mod defaults;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use cfgstore_doc::{codec, path, CodecError, Document, KeyPath, Value};

pub use backup::{backup_path, create_backup, list_backups};
pub use defaults::BuiltinDefaults;

/// Store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("backup to {} failed: {source}", .path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("encode error: {0}")]
    Encode(#[from] CodecError),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Configuration stored in a single YAML file.
///
/// There is no locking. Two writers racing on the same file can interleave
/// their read/write cycles and the later write discards the earlier change.
/// Callers that need several writers must serialize access themselves.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    defaults: BuiltinDefaults,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            defaults: BuiltinDefaults::default(),
        }
    }

    /// Use a different skeleton for first-time bootstrap.
    pub fn with_defaults(mut self, defaults: BuiltinDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, writing the default skeleton first if the file is absent.
    ///
    /// Unparseable content reads as an empty document and is left on disk untouched.
    pub fn read_all(&self) -> Result<Document> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "config file not found, creating defaults");
            let doc = self.defaults.to_document();
            self.write_all(&doc)?;
            return Ok(doc);
        }

        let bytes = fs::read(&self.path).map_err(|source| self.io_error(source))?;
        let doc = match std::str::from_utf8(&bytes) {
            Ok(text) => codec::from_yaml_lenient(text),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "configuration is not UTF-8, using empty document");
                Document::new()
            }
        };
        tracing::debug!(path = %self.path.display(), keys = doc.len(), "loaded configuration");
        Ok(doc)
    }

    /// Replace the file with `doc`, backing up the current file first.
    ///
    /// No backup means no write. The document is encoded before the file is
    /// touched, so an encoding failure leaves the old file intact.
    pub fn write_all(&self, doc: &Document) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?;
                tracing::info!(dir = %dir.display(), "created config directory");
            }
        }

        if self.path.exists() {
            create_backup(&self.path)?;
        }

        let text = codec::to_yaml(doc)?;
        fs::write(&self.path, text).map_err(|source| self.io_error(source))?;
        tracing::info!(path = %self.path.display(), "configuration written");
        Ok(())
    }

    /// Value at a dot-separated path, or `None` if any segment is missing.
    pub fn get_by_path(&self, key: &str) -> Result<Option<Value>> {
        let doc = self.read_all()?;
        Ok(path::get(&doc, &KeyPath::parse(key)).cloned())
    }

    /// Set the value at a dot-separated path and persist the whole document.
    pub fn set_by_path(&self, key: &str, value: impl Into<Value>) -> Result<()> {
        let doc = self.read_all()?;
        let doc = path::set(doc, &KeyPath::parse(key), value.into());
        self.write_all(&doc)
    }

    /// Backup snapshots of this store's file, oldest first.
    pub fn backups(&self) -> Result<Vec<PathBuf>> {
        list_backups(&self.path)
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> ConfigStore {
        ConfigStore::new(dir.path().join("config.yaml"))
    }

    #[test]
    fn test_read_all_bootstraps_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let doc = store.read_all().unwrap();

        assert!(store.path().exists());
        assert_eq!(doc["database"].as_mapping().unwrap()["port"], Value::Int(27017));
        assert!(store.backups().unwrap().is_empty());
    }

    #[test]
    fn test_write_all_creates_nested_dirs() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("a").join("b").join("config.yaml"));
        let mut doc = Document::new();
        doc.insert("k".into(), Value::from("v"));

        store.write_all(&doc).unwrap();

        assert_eq!(fs::read_to_string(store.path()).unwrap(), "k: v\n");
    }

    #[test]
    fn test_empty_file_reads_as_empty_document() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "").unwrap();

        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_file_reads_empty_and_is_untouched() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "key: [unclosed").unwrap();

        assert!(store.read_all().unwrap().is_empty());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "key: [unclosed");
        assert!(store.backups().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_utf8_reads_empty_and_is_untouched() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), b"a: \xff\xfe\n").unwrap();

        assert!(store.read_all().unwrap().is_empty());
        assert_eq!(store.get_by_path("a").unwrap(), None);
        assert_eq!(fs::read(store.path()).unwrap(), b"a: \xff\xfe\n");
    }

    #[test]
    fn test_invalid_utf8_recovers_on_set() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), b"a: \xff\xfe\n").unwrap();

        store.set_by_path("a", 1i64).unwrap();

        assert_eq!(fs::read_to_string(store.path()).unwrap(), "a: 1\n");
        let backups = store.backups().unwrap();
        assert_eq!(backups.len(), 1);
        assert_eq!(fs::read(&backups[0]).unwrap(), b"a: \xff\xfe\n");
    }

    #[test]
    fn test_with_defaults_overrides_skeleton() {
        let dir = TempDir::new().unwrap();
        let defaults = BuiltinDefaults {
            environment: "staging".to_string(),
            ..BuiltinDefaults::default()
        };
        let store = store_in(&dir).with_defaults(defaults);

        assert_eq!(
            store.get_by_path("application.environment").unwrap(),
            Some(Value::from("staging"))
        );
    }

    #[test]
    fn test_read_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path());

        assert!(matches!(store.read_all(), Err(StoreError::Io { .. })));
    }

    #[test]
    fn test_error_display_names_path() {
        let err = StoreError::Io {
            path: PathBuf::from("/x/config.yaml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "I/O error at /x/config.yaml: denied");
    }
}
