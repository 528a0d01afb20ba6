use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use jsonschema::JSONSchema;
use serde_json::Value;

/// A schema document read from disk together with its compiled validator.
#[derive(Debug)]
pub struct Schema {
    path: PathBuf,
    value: Value,
    compiled: JSONSchema,
}

impl Schema {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn compiled(&self) -> &JSONSchema {
        &self.compiled
    }
}

/// Read `path` as text and parse the whole of it as JSON.
///
/// The file handle is closed before parsing starts.
pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path_ref = path.as_ref();

    let contents = fs::read_to_string(path_ref).map_err(|e| Error::from_io(path_ref, e))?;

    serde_json::from_str(&contents).map_err(|e| Error::MalformedJson {
        path: path_ref.to_path_buf(),
        source: e,
    })
}

pub fn load_schema<P: AsRef<Path>>(path: P) -> Result<Schema> {
    let path_buf = PathBuf::from(path.as_ref());
    let value = read_json(&path_buf)?;

    let compiled = JSONSchema::compile(&value).map_err(|e| Error::InvalidSchema {
        path: path_buf.clone(),
        message: e.to_string(),
    })?;

    let schema = Schema {
        path: path_buf,
        value,
        compiled,
    };
    tracing::debug!(schema = %schema.path().display(), "Schema loaded");

    Ok(schema)
}
