//! cfgstore - file-backed hierarchical configuration
//!
//! Stores a service's configuration as a single human-editable YAML file,
//! addressed by dot-separated keys. Missing files are bootstrapped with a
//! default skeleton and every overwrite is preceded by a timestamped backup.

pub mod store;

pub use cfgstore_doc::{Document, KeyPath, Value};
pub use store::{BuiltinDefaults, ConfigStore, StoreError};
