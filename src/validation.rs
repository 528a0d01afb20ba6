use std::fmt;

use jsonschema::paths::PathChunk;
use jsonschema::ValidationError;
use serde_json::Value;

use crate::schema::Schema;

/// One step of a location inside a schema document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<PathChunk> for PathSegment {
    fn from(chunk: PathChunk) -> Self {
        match chunk {
            PathChunk::Property(name) => PathSegment::Key(name.into()),
            PathChunk::Keyword(keyword) => PathSegment::Key(keyword.to_string()),
            PathChunk::Index(idx) => PathSegment::Index(idx),
        }
    }
}

/// Absolute location within the schema of the keyword that rejected an instance.
///
/// Renders as a JSON Pointer fragment, e.g. `#/properties/name/type`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchemaPath(Vec<PathSegment>);

impl SchemaPath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("#")?;
        for segment in &self.0 {
            match segment {
                PathSegment::Key(key) => {
                    write!(f, "/{}", key.replace('~', "~0").replace('/', "~1"))?
                }
                PathSegment::Index(idx) => write!(f, "/{}", idx)?,
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub message: String,
    pub schema_path: SchemaPath,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.schema_path)
    }
}

impl From<ValidationError<'_>> for ValidationFailure {
    fn from(error: ValidationError<'_>) -> Self {
        let message = error.to_string();
        let segments = error
            .schema_path
            .into_iter()
            .map(PathSegment::from)
            .collect();

        ValidationFailure {
            message,
            schema_path: SchemaPath(segments),
        }
    }
}

/// Validate `instance`, keeping only the first violation the validator reports.
pub fn validate(schema: &Schema, instance: &Value) -> Result<(), ValidationFailure> {
    match schema.compiled().validate(instance) {
        Ok(()) => Ok(()),
        Err(mut errors) => match errors.next() {
            Some(first) => Err(ValidationFailure::from(first)),
            None => Ok(()),
        },
    }
}
