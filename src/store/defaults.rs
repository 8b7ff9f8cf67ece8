//! Default document
//!
//! The skeleton written the first time a store is read and no file exists.

use cfgstore_doc::{Document, Value};
use chrono::{Local, NaiveDateTime};

/// Tag recorded under `metadata.createdBy` for bootstrapped files.
pub const CREATED_BY: &str = "cfgstore-init";

/// Built-in default configuration values
#[derive(Debug, Clone)]
pub struct BuiltinDefaults {
    /// Application name (default: "Inventory & Orders Service")
    pub app_name: String,

    /// Application version (default: "1.0.0")
    pub app_version: String,

    /// Deployment environment (default: "development")
    pub environment: String,

    /// Database host (default: "localhost")
    pub database_host: String,

    /// Database port (default: 27017)
    pub database_port: u16,

    /// Database name (default: "inventory")
    pub database_name: String,

    /// Broker bootstrap servers (default: "localhost:9092")
    pub bootstrap_servers: String,

    /// Schema registry URL (default: "http://localhost:8081")
    pub schema_registry_url: String,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            app_name: "Inventory & Orders Service".to_string(),
            app_version: "1.0.0".to_string(),
            environment: "development".to_string(),
            database_host: "localhost".to_string(),
            database_port: 27017,
            database_name: "inventory".to_string(),
            bootstrap_servers: "localhost:9092".to_string(),
            schema_registry_url: "http://localhost:8081".to_string(),
        }
    }
}

impl BuiltinDefaults {
    /// Build the document, stamping `metadata.createdAt` with the current local time.
    pub fn to_document(&self) -> Document {
        self.to_document_at(Local::now().naive_local())
    }

    /// Build the document with an explicit creation time.
    pub fn to_document_at(&self, created_at: NaiveDateTime) -> Document {
        let mut doc = Document::new();
        doc.insert(
            "application".to_string(),
            section([
                ("name", Value::from(self.app_name.as_str())),
                ("version", Value::from(self.app_version.as_str())),
                ("environment", Value::from(self.environment.as_str())),
            ]),
        );
        doc.insert(
            "database".to_string(),
            section([
                ("host", Value::from(self.database_host.as_str())),
                ("port", Value::from(self.database_port)),
                ("name", Value::from(self.database_name.as_str())),
            ]),
        );
        doc.insert(
            "kafka".to_string(),
            section([
                ("bootstrap.servers", Value::from(self.bootstrap_servers.as_str())),
                ("schema.registry.url", Value::from(self.schema_registry_url.as_str())),
            ]),
        );
        // populated later through set_by_path
        doc.insert("features".to_string(), Value::empty_mapping());
        doc.insert(
            "metadata".to_string(),
            section([
                (
                    "createdAt",
                    Value::from(created_at.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
                ),
                ("createdBy", Value::from(CREATED_BY)),
            ]),
        );
        doc
    }
}

fn section<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::Mapping(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    )
}
