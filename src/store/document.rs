//! JSON document access for the endpoint field.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::DocumentConfig;
use crate::health::Endpoint;
use crate::store::types::{CurrentEndpoint, StoreError, StoreResult, WriteOutcome};

const TEMP_SUFFIX: &str = ".rpc-failover.tmp";

/// Reads and rewrites the endpoint field of a JSON document on disk.
#[derive(Debug, Clone)]
pub struct EndpointStore {
    path: PathBuf,
    field_path: Vec<String>,
}

impl EndpointStore {
    /// `field` is a dotted path such as `wallet.nodeRpc`.
    pub fn new(path: impl Into<PathBuf>, field: &str) -> Self {
        Self {
            path: path.into(),
            field_path: field.split('.').map(str::to_string).collect(),
        }
    }

    pub fn from_config(config: &DocumentConfig) -> Self {
        Self::new(config.path.clone(), &config.endpoint_field)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn field_name(&self) -> String {
        self.field_path.join(".")
    }

    /// Current endpoint value, or `None` (logged) when the document cannot
    /// be read or the field is absent or null.
    ///
    /// A present value that does not parse as an endpoint is returned as
    /// `CurrentEndpoint::Invalid` so the caller can replace it.
    pub fn read_current_endpoint(&self) -> Option<CurrentEndpoint> {
        let document = match self.load_document() {
            Ok(document) => document,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read current RPC");
                return None;
            }
        };

        let raw = match lookup(&document, &self.field_path) {
            Some(Value::String(raw)) => raw.clone(),
            Some(Value::Null) | None => {
                tracing::error!(
                    path = %self.path.display(),
                    field = %self.field_name(),
                    "Failed to read current RPC: field not found"
                );
                return None;
            }
            Some(other) => other.to_string(),
        };

        match Endpoint::parse(&raw) {
            Ok(endpoint) => Some(CurrentEndpoint::Valid(endpoint)),
            Err(e) => {
                tracing::warn!(
                    field = %self.field_name(),
                    value = %raw,
                    error = %e,
                    "Current RPC is not a valid endpoint"
                );
                Some(CurrentEndpoint::Invalid(raw))
            }
        }
    }

    /// Point the endpoint field at `new`, rewriting the whole document.
    ///
    /// Returns `WriteOutcome::Unchanged` without touching the file when the
    /// field already holds `new`.
    pub fn write_endpoint(&self, new: &Endpoint) -> StoreResult<WriteOutcome> {
        let mut document = self.load_document()?;

        let outcome = set_field(&mut document, &self.field_path, new.as_str()).map_err(|reason| {
            StoreError::ConfigMalformed {
                path: self.path.clone(),
                reason,
            }
        })?;

        match outcome {
            WriteOutcome::Unchanged => {
                tracing::info!(endpoint = %new, "RPC already set");
                return Ok(outcome);
            }
            WriteOutcome::Updated => {
                tracing::info!(field = %self.field_name(), endpoint = %new, "Updated endpoint field");
            }
            WriteOutcome::Created => {
                tracing::info!(
                    field = %self.field_name(),
                    endpoint = %new,
                    "Endpoint field was absent; created field path"
                );
            }
        }

        self.persist(&document)?;
        tracing::info!(path = %self.path.display(), "Changes saved");

        Ok(outcome)
    }

    fn load_document(&self) -> StoreResult<Value> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::ConfigMissing(self.path.clone()));
            }
            Err(e) => {
                return Err(StoreError::ConfigMalformed {
                    path: self.path.clone(),
                    reason: format!("unreadable: {}", e),
                });
            }
        };

        let document: Value = serde_json::from_str(&content).map_err(|e| StoreError::ConfigMalformed {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        if !document.is_object() {
            return Err(StoreError::ConfigMalformed {
                path: self.path.clone(),
                reason: "top-level value is not an object".to_string(),
            });
        }

        Ok(document)
    }

    /// Write to a sibling temp file, then rename it over the document.
    fn persist(&self, document: &Value) -> StoreResult<()> {
        let write_error = |source: io::Error| StoreError::ConfigWriteError {
            path: self.path.clone(),
            source,
        };

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        document
            .serialize(&mut serializer)
            .map_err(|e| write_error(io::Error::from(e)))?;
        buf.push(b'\n');

        let tmp = self.temp_path();
        fs::write(&tmp, &buf).map_err(write_error)?;

        copy_permissions(&self.path, &tmp);

        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(write_error(e));
        }

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name: OsString = self.path.file_name().map(OsString::from).unwrap_or_default();
        name.push(TEMP_SUFFIX);
        self.path.with_file_name(name)
    }
}

/// Best effort: a failure is logged and the temp file keeps default permissions.
fn copy_permissions(from: &Path, to: &Path) {
    let result = fs::metadata(from).and_then(|metadata| fs::set_permissions(to, metadata.permissions()));
    if let Err(e) = result {
        tracing::warn!(
            from = %from.display(),
            to = %to.display(),
            error = %e,
            "Failed to copy document permissions to temp file"
        );
    }
}

fn lookup<'a>(document: &'a Value, path: &[String]) -> Option<&'a Value> {
    path.iter().try_fold(document, |node, segment| node.get(segment))
}

/// Set the string at `path`, materializing missing parent objects.
fn set_field(document: &mut Value, path: &[String], value: &str) -> Result<WriteOutcome, String> {
    let (last, parents) = path.split_last().ok_or_else(|| "empty field path".to_string())?;

    let mut node = document;
    for (depth, segment) in parents.iter().enumerate() {
        node = match node {
            Value::Object(map) => map
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new())),
            _ => return Err(format!("'{}' is not an object", path[..depth].join("."))),
        };
    }

    let map = match node {
        Value::Object(map) => map,
        _ => return Err(format!("'{}' is not an object", parents.join("."))),
    };

    let outcome = match map.get(last) {
        Some(Value::String(current)) if current == value => return Ok(WriteOutcome::Unchanged),
        Some(_) => WriteOutcome::Updated,
        None => WriteOutcome::Created,
    };

    map.insert(last.clone(), Value::String(value.to_string()));
    Ok(outcome)
}
